//! Peg occupancy: which peg is where.
//!
//! Two id-keyed maps are kept in lockstep and updated transactionally:
//! `pegs_by_space` (space -> pegs) and `space_of_peg` (peg -> space). Both
//! use `im` persistent maps so cloning a board is O(1).
//!
//! Capacity invariants are enforced here with assertions: violating them
//! means the move generator and applier are out of sync, which is a
//! programming error, not a game situation.

use std::sync::Arc;

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::player::{PegId, PlayerId};

use super::space::{SpaceId, SpaceKind};
use super::topology::{BoardTopology, CASTLE_SLOTS, HOME_CAPACITY};

/// Board geometry plus current peg positions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    /// Static geometry, shared across snapshots.
    pub topology: Arc<BoardTopology>,
    pegs_by_space: ImHashMap<SpaceId, Vector<PegId>>,
    space_of_peg: ImHashMap<PegId, SpaceId>,
}

impl Board {
    /// Create a board with every player's pegs in their home.
    #[must_use]
    pub fn new(topology: Arc<BoardTopology>, player_count: usize) -> Self {
        let mut board = Self {
            topology,
            pegs_by_space: ImHashMap::new(),
            space_of_peg: ImHashMap::new(),
        };

        for player in PlayerId::all(player_count) {
            let home = board.topology.home_of(player.0);
            for peg in PegId::all_for(player) {
                board.insert(peg, home);
            }
        }

        board
    }

    /// Where a peg currently sits. Absent pegs return `None`.
    #[must_use]
    pub fn space_of(&self, peg: PegId) -> Option<SpaceId> {
        self.space_of_peg.get(&peg).copied()
    }

    /// Pegs currently on a space, in arrival order.
    #[must_use]
    pub fn pegs_at(&self, space: SpaceId) -> Vector<PegId> {
        self.pegs_by_space.get(&space).cloned().unwrap_or_default()
    }

    /// Does `player` have a peg on `space`?
    #[must_use]
    pub fn has_own_peg(&self, space: SpaceId, player: PlayerId) -> bool {
        self.pegs_at(space).iter().any(|p| p.owner == player)
    }

    /// Opponent pegs on a space, from `player`'s point of view.
    #[must_use]
    pub fn opponents_at(&self, space: SpaceId, player: PlayerId) -> SmallVec<[PegId; 4]> {
        self.pegs_at(space)
            .iter()
            .filter(|p| p.owner != player)
            .copied()
            .collect()
    }

    /// A player's pegs grouped by the kind of space they occupy.
    #[must_use]
    pub fn pegs_by_kind(&self, player: PlayerId, kind: SpaceKind) -> Vec<(PegId, SpaceId)> {
        PegId::all_for(player)
            .filter_map(|peg| {
                let space = self.space_of(peg)?;
                (self.topology.space(space).kind == kind).then_some((peg, space))
            })
            .collect()
    }

    /// A player's pegs currently on the shared track.
    #[must_use]
    pub fn pegs_on_track(&self, player: PlayerId) -> Vec<(PegId, SpaceId)> {
        PegId::all_for(player)
            .filter_map(|peg| {
                let space = self.space_of(peg)?;
                self.topology.space(space).kind.is_track().then_some((peg, space))
            })
            .collect()
    }

    /// Total pegs a player has on the board. Always 4 (peg conservation).
    #[must_use]
    pub fn peg_count(&self, player: PlayerId) -> usize {
        PegId::all_for(player)
            .filter(|peg| self.space_of(*peg).is_some())
            .count()
    }

    /// Move a peg to a new space, updating both indexes transactionally.
    ///
    /// Panics if the peg is unknown, the space is unknown, or the target's
    /// capacity/ownership invariant would be violated.
    pub fn relocate(&mut self, peg: PegId, to: SpaceId) {
        let from = self
            .space_of(peg)
            .unwrap_or_else(|| panic!("unknown peg {peg}"));

        self.check_capacity(peg, to);

        let mut at_from = self.pegs_at(from);
        let idx = at_from
            .iter()
            .position(|p| *p == peg)
            .unwrap_or_else(|| panic!("occupancy desync for {peg}"));
        at_from.remove(idx);
        if at_from.is_empty() {
            self.pegs_by_space.remove(&from);
        } else {
            self.pegs_by_space.insert(from, at_from);
        }

        self.insert(peg, to);
    }

    fn insert(&mut self, peg: PegId, space: SpaceId) {
        let mut at_space = self.pegs_at(space);
        at_space.push_back(peg);
        self.pegs_by_space.insert(space, at_space);
        self.space_of_peg.insert(peg, space);
    }

    fn check_capacity(&self, peg: PegId, to: SpaceId) {
        let space = self
            .topology
            .get(to)
            .unwrap_or_else(|| panic!("unknown space {to}"));

        match space.kind {
            SpaceKind::Home => {
                assert_eq!(
                    space.section, peg.owner.0,
                    "home spaces hold only the owner's pegs"
                );
                assert!(
                    self.pegs_at(to).len() < HOME_CAPACITY,
                    "home capacity exceeded at {to}"
                );
            }
            SpaceKind::Castle => {
                assert_eq!(
                    space.section, peg.owner.0,
                    "castle slots hold only the owner's pegs"
                );
                assert!(
                    self.pegs_at(to).is_empty(),
                    "castle slot {to} already occupied"
                );
            }
            _ => {
                // Shared track: mixed occupancy, unbounded. Capture is the
                // applier's job.
            }
        }

        debug_assert!(space.kind != SpaceKind::Castle || (space.index as usize) < CASTLE_SLOTS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(BoardTopology::build(4), 4)
    }

    #[test]
    fn test_new_places_all_pegs_home() {
        let board = board();

        for player in PlayerId::all(4) {
            let home = board.topology.home_of(player.0);
            assert_eq!(board.pegs_at(home).len(), 4);
            assert_eq!(board.peg_count(player), 4);
            for peg in PegId::all_for(player) {
                assert_eq!(board.space_of(peg), Some(home));
            }
        }
    }

    #[test]
    fn test_relocate_updates_both_indexes() {
        let mut board = board();
        let peg = PegId::new(PlayerId::new(0), 0);
        let target = board.topology.come_out_of(0);

        board.relocate(peg, target);

        assert_eq!(board.space_of(peg), Some(target));
        assert!(board.pegs_at(target).contains(&peg));
        assert_eq!(board.pegs_at(board.topology.home_of(0)).len(), 3);
    }

    #[test]
    fn test_shared_space_allows_mixed_occupancy() {
        let mut board = board();
        let mine = PegId::new(PlayerId::new(0), 0);
        let theirs = PegId::new(PlayerId::new(1), 0);
        let target = board.topology.track_space(2, 6);

        board.relocate(mine, target);
        board.relocate(theirs, target);

        assert!(board.has_own_peg(target, PlayerId::new(0)));
        assert_eq!(board.opponents_at(target, PlayerId::new(0)).to_vec(), vec![theirs]);
    }

    #[test]
    #[should_panic(expected = "castle slot")]
    fn test_castle_slot_capacity_one() {
        let mut board = board();
        let slot = board.topology.castle_slot(0, 2);

        board.relocate(PegId::new(PlayerId::new(0), 0), slot);
        board.relocate(PegId::new(PlayerId::new(0), 1), slot);
    }

    #[test]
    #[should_panic(expected = "owner's pegs")]
    fn test_castle_rejects_foreign_pegs() {
        let mut board = board();
        let slot = board.topology.castle_slot(0, 0);
        board.relocate(PegId::new(PlayerId::new(1), 0), slot);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = board();
        let snapshot = board.clone();
        let peg = PegId::new(PlayerId::new(0), 0);

        board.relocate(peg, board.topology.come_out_of(0));

        // The snapshot still sees the peg at home
        assert_eq!(snapshot.space_of(peg), Some(snapshot.topology.home_of(0)));
    }
}
