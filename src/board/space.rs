//! Space identity and classification.
//!
//! Every hole on the board is a `Space`. Spaces never move; pegs move
//! between them. Occupancy lives in [`crate::board::Board`], not here.

use serde::{Deserialize, Serialize};

/// Unique space identifier, assigned densely at board build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpaceId(pub u32);

impl SpaceId {
    /// Create a new space ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SpaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Space({})", self.0)
    }
}

/// What kind of space this is.
///
/// - `Home`: per-player start area, capacity 4, owner's pegs only
/// - `Normal` / `Corner`: shared track, unbounded mixed occupancy
/// - `Entrance`: the shared track space immediately before a castle
///   (local index 3 of its section); the pivot for castle-entry arithmetic
/// - `Castle`: per-player private slot, capacity 1, owner's pegs only
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceKind {
    Home,
    Normal,
    Corner,
    Entrance,
    Castle,
}

impl SpaceKind {
    /// Is this space part of the shared circular track?
    #[must_use]
    pub const fn is_track(self) -> bool {
        matches!(self, SpaceKind::Normal | SpaceKind::Corner | SpaceKind::Entrance)
    }

    /// May pegs of different players share this space?
    ///
    /// This is exactly what enables bumping.
    #[must_use]
    pub const fn is_shared(self) -> bool {
        self.is_track()
    }
}

/// One hole on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub kind: SpaceKind,
    /// Owning section (every space belongs to exactly one section).
    pub section: u8,
    /// Local index within its group: track local 0..12, castle slot 0..5,
    /// home always 0.
    pub index: u8,
}
