//! Move application.
//!
//! `apply_move` takes a snapshot and one generated `Move` and returns the
//! successor snapshot. It trusts the generator: a `Move` that was never
//! generated for the given state may trip an occupancy assertion. Game-level
//! illegality is the generator's concern; desync here is a programming
//! error.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::{GameState, PegId};

use super::kind::Move;

/// Result of applying one move.
#[derive(Clone, Debug)]
pub struct ApplyOutcome {
    /// The successor snapshot.
    pub state: GameState,
    /// Opponent pegs sent back to their owners' homes by this landing.
    pub bumped: SmallVec<[PegId; 4]>,
    /// Human-readable capture notice, when a bump happened.
    pub bump: Option<String>,
}

/// Apply a generated move to a snapshot.
///
/// Opponent pegs on a shared landing space are bumped back to their
/// owners' homes first, then the mover relocates. The played card moves
/// from hand to discard pile unless the move is a split's first leg, which
/// keeps the card live for the second leg.
#[must_use]
pub fn apply_move(state: &GameState, mv: &Move) -> ApplyOutcome {
    assert_eq!(
        state.board.space_of(mv.peg),
        Some(mv.from),
        "move origin desync for {}",
        mv.peg
    );

    let mut next = state.clone();

    let bumped = if next.board.topology.space(mv.to).kind.is_track() {
        next.board.opponents_at(mv.to, mv.player)
    } else {
        SmallVec::new()
    };
    for victim in &bumped {
        let home = next.board.topology.home_of(victim.owner.0);
        next.board.relocate(*victim, home);
        debug!(peg = %victim, "peg bumped home");
    }

    next.board.relocate(mv.peg, mv.to);

    if !mv.kind.retains_card() {
        let card = next
            .remove_from_hand(mv.player, mv.card)
            .unwrap_or_else(|| panic!("played card {} not in hand", mv.card));
        next.discard_pile.push_back(card);
    }

    let bump = bump_message(&next, &bumped);
    debug!(
        player = %mv.player,
        peg = %mv.peg,
        from = %mv.from,
        to = %mv.to,
        kind = ?mv.kind,
        bumped = bumped.len(),
        "move applied"
    );

    ApplyOutcome { state: next, bumped, bump }
}

fn bump_message(state: &GameState, bumped: &[PegId]) -> Option<String> {
    if bumped.is_empty() {
        return None;
    }
    let names: Vec<&str> = bumped
        .iter()
        .filter_map(|peg| state.player(peg.owner).map(|p| p.name.as_str()))
        .collect();
    Some(format!("Bumped {} back home!", names.join(" and ")))
}
