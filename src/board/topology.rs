//! Static board geometry.
//!
//! The board is a ring of per-player sections. Each section contributes:
//!
//! - 1 home space (capacity 4)
//! - 12 track spaces, local indices 0..12: local 0 is the section corner,
//!   local 3 is the castle entrance, the rest are normal spaces
//! - 5 castle slots (capacity 1 each)
//!
//! Pegs come out of home onto local index 4, the space just past the
//! entrance, so a fresh peg travels a full lap before it can enter its
//! castle.
//!
//! All track spaces, sorted by (section, local index), form the global
//! circular ordering. Step distances across section boundaries are forward
//! offsets on this ring with wraparound.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::space::{Space, SpaceId, SpaceKind};

/// Track spaces contributed by each section.
pub const TRACK_SPACES_PER_SECTION: usize = 12;
/// Local track index of the castle entrance.
pub const ENTRANCE_INDEX: u8 = 3;
/// Local track index pegs land on when coming out of home.
pub const COME_OUT_INDEX: u8 = 4;
/// Local track index of the section corner.
pub const CORNER_INDEX: u8 = 0;
/// Castle slots per section.
pub const CASTLE_SLOTS: usize = 5;
/// Home capacity per section.
pub const HOME_CAPACITY: usize = 4;

/// The space IDs making up one section.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SectionSpaces {
    pub home: SpaceId,
    pub track: [SpaceId; TRACK_SPACES_PER_SECTION],
    pub castle: [SpaceId; CASTLE_SLOTS],
}

/// Immutable board geometry, built once per game and shared via `Arc`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardTopology {
    sections: Vec<SectionSpaces>,
    /// All spaces, indexed by `SpaceId` raw value.
    spaces: Vec<Space>,
    /// Track spaces in circuit order.
    ring: Vec<SpaceId>,
    /// Inverse of `ring`.
    ring_pos: FxHashMap<SpaceId, usize>,
}

impl BoardTopology {
    /// Build the geometry for `num_sections` sections.
    #[must_use]
    pub fn build(num_sections: usize) -> Arc<Self> {
        assert!(
            (2..=8).contains(&num_sections),
            "board supports 2-8 sections, got {num_sections}"
        );

        let mut spaces = Vec::new();
        let mut sections = Vec::with_capacity(num_sections);
        let mut ring = Vec::with_capacity(num_sections * TRACK_SPACES_PER_SECTION);

        let mut alloc = |kind: SpaceKind, section: u8, index: u8, spaces: &mut Vec<Space>| {
            let id = SpaceId(spaces.len() as u32);
            spaces.push(Space { id, kind, section, index });
            id
        };

        for section in 0..num_sections as u8 {
            let home = alloc(SpaceKind::Home, section, 0, &mut spaces);

            let mut track = [SpaceId(0); TRACK_SPACES_PER_SECTION];
            for local in 0..TRACK_SPACES_PER_SECTION as u8 {
                let kind = match local {
                    CORNER_INDEX => SpaceKind::Corner,
                    ENTRANCE_INDEX => SpaceKind::Entrance,
                    _ => SpaceKind::Normal,
                };
                let id = alloc(kind, section, local, &mut spaces);
                track[local as usize] = id;
                ring.push(id);
            }

            let mut castle = [SpaceId(0); CASTLE_SLOTS];
            for slot in 0..CASTLE_SLOTS as u8 {
                castle[slot as usize] = alloc(SpaceKind::Castle, section, slot, &mut spaces);
            }

            sections.push(SectionSpaces { home, track, castle });
        }

        let ring_pos = ring.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        Arc::new(Self { sections, spaces, ring, ring_pos })
    }

    /// Number of sections.
    #[must_use]
    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }

    /// Look up a space. Absent IDs return `None`.
    #[must_use]
    pub fn get(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.get(id.raw() as usize)
    }

    /// Look up a space that is known to exist.
    ///
    /// Panics on an unknown ID; use [`BoardTopology::get`] for fallible
    /// lookup.
    #[must_use]
    pub fn space(&self, id: SpaceId) -> &Space {
        &self.spaces[id.raw() as usize]
    }

    /// Iterate over every space on the board.
    pub fn all_spaces(&self) -> impl Iterator<Item = &Space> {
        self.spaces.iter()
    }

    /// A section's home space.
    #[must_use]
    pub fn home_of(&self, section: u8) -> SpaceId {
        self.sections[section as usize].home
    }

    /// A section's castle entrance (track local index 3).
    #[must_use]
    pub fn entrance_of(&self, section: u8) -> SpaceId {
        self.sections[section as usize].track[ENTRANCE_INDEX as usize]
    }

    /// The space pegs land on when coming out of a section's home.
    #[must_use]
    pub fn come_out_of(&self, section: u8) -> SpaceId {
        self.sections[section as usize].track[COME_OUT_INDEX as usize]
    }

    /// A castle slot (0..5) of a section.
    #[must_use]
    pub fn castle_slot(&self, section: u8, slot: u8) -> SpaceId {
        self.sections[section as usize].castle[slot as usize]
    }

    /// A track space by section and local index.
    #[must_use]
    pub fn track_space(&self, section: u8, local: u8) -> SpaceId {
        self.sections[section as usize].track[local as usize]
    }

    /// Total number of track spaces on the ring.
    #[must_use]
    pub fn ring_len(&self) -> usize {
        self.ring.len()
    }

    /// Ring position of a track space. `None` for home/castle spaces.
    #[must_use]
    pub fn ring_position(&self, id: SpaceId) -> Option<usize> {
        self.ring_pos.get(&id).copied()
    }

    /// Track space at a ring position (taken modulo ring length).
    #[must_use]
    pub fn ring_space(&self, pos: usize) -> SpaceId {
        self.ring[pos % self.ring.len()]
    }

    /// Forward steps from one track space to another, with wraparound.
    ///
    /// Returns `None` if either space is off the ring.
    #[must_use]
    pub fn forward_distance(&self, from: SpaceId, to: SpaceId) -> Option<usize> {
        let a = self.ring_position(from)?;
        let b = self.ring_position(to)?;
        let len = self.ring.len();
        Some((b + len - a) % len)
    }

    /// The track space `offset` steps from `from` (negative = backward).
    ///
    /// Returns `None` if `from` is off the ring.
    #[must_use]
    pub fn step_from(&self, from: SpaceId, offset: isize) -> Option<SpaceId> {
        let pos = self.ring_position(from)? as isize;
        let len = self.ring.len() as isize;
        let target = (pos + offset).rem_euclid(len) as usize;
        Some(self.ring[target])
    }
}
