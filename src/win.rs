//! Win detection.
//!
//! A team wins when every peg owned by every player on that team sits in a
//! castle slot. Pure queries; the turn controller is responsible for
//! freezing the game once a winner appears.

use crate::board::SpaceKind;
use crate::core::{GamePhase, GameState, TeamId, PEGS_PER_PLAYER};

/// The winning team, if any player configuration has finished.
///
/// Checks teams in seat order, so the result is deterministic even in the
/// (unreachable) case of two finished teams.
#[must_use]
pub fn winning_team(state: &GameState) -> Option<TeamId> {
    let mut seen: Vec<TeamId> = Vec::new();

    for player in &state.players {
        if seen.contains(&player.team) {
            continue;
        }
        seen.push(player.team);

        let done = state
            .players
            .iter()
            .filter(|p| p.team == player.team)
            .all(|p| state.board.pegs_by_kind(p.id, SpaceKind::Castle).len() == PEGS_PER_PLAYER);
        if done {
            return Some(player.team);
        }
    }

    None
}

/// Has the game ended?
#[must_use]
pub fn is_game_over(state: &GameState) -> bool {
    state.phase == GamePhase::GameOver || state.winner.is_some()
}
