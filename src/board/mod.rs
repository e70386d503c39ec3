//! Board topology and occupancy.
//!
//! `BoardTopology` is the static geometry (sections, ring ordering,
//! entrances, castles); `Board` couples it with the current peg positions.

pub mod occupancy;
pub mod space;
pub mod topology;

pub use occupancy::Board;
pub use space::{Space, SpaceId, SpaceKind};
pub use topology::{
    BoardTopology, SectionSpaces, CASTLE_SLOTS, COME_OUT_INDEX, CORNER_INDEX, ENTRANCE_INDEX,
    HOME_CAPACITY, TRACK_SPACES_PER_SECTION,
};
