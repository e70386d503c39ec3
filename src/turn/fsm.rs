//! Turn-protocol state: what the current player has committed to so far.
//!
//! Everything here is plain serializable data. The controller transitions
//! it through named events; transports can snapshot a half-finished split
//! and resume it elsewhere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{CardId, PegId, PlayerId, TeamId};
use crate::moves::{Direction, Move};

/// Progress through a 7/9 split.
///
/// Plain plays never leave `None`. A 7 goes `None -> SplitChosen ->
/// StepsChosen -> FirstLegDone`; a 9 inserts `DirectionChosen` before the
/// step choice. `DeadEnd` marks a first leg whose second half has no legal
/// mover left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitProgress {
    #[default]
    None,
    /// The player opted to split instead of moving the full value.
    SplitChosen,
    /// First-leg direction picked (9 only; a 7 always moves forward).
    DirectionChosen { direction: Direction },
    /// First-leg step count picked; candidates can now be generated.
    StepsChosen {
        steps: u8,
        direction: Option<Direction>,
    },
    /// First leg applied; the card is still in hand.
    FirstLegDone {
        first_peg: PegId,
        remaining: u8,
        direction: Direction,
    },
    /// First leg applied but no peg can take the second leg.
    DeadEnd { first_peg: PegId },
}

/// A pending castle-entry decision.
///
/// Raised whenever a chosen peg's candidates include a castle landing (and
/// the peg is not already inside the castle). `regular` is the track
/// alternative when one exists; declining without one re-raises the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlePrompt {
    pub peg: PegId,
    pub regular: Option<Move>,
    pub castle: Move,
}

/// Per-turn transient state, reset when the turn passes.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct TurnState {
    pub selected_card: Option<CardId>,
    pub split: SplitProgress,
    pub castle_prompt: Option<CastlePrompt>,
}

impl TurnState {
    /// Forget everything; the next event starts from scratch.
    pub fn reset(&mut self) {
        *self = TurnState::default();
    }
}

/// Caller mistakes at the turn-protocol boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("game is not in the playing phase")]
    NotPlaying,
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),
    #[error("card {0} is not in the current player's hand")]
    CardNotInHand(CardId),
    #[error("no card is selected")]
    NoCardSelected,
    #[error("event does not apply to the current turn state")]
    InvalidEvent,
    #[error("steps {steps} outside {min}..={max}")]
    StepsOutOfRange { steps: u8, min: u8, max: u8 },
    #[error("no legal move for {0}")]
    NoMoveForPeg(PegId),
    #[error("move was not generated for this state")]
    UnknownMove,
    #[error("hand discard is not available")]
    DiscardUnavailable,
}

/// What an accepted event did, and what the caller should do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnFeedback {
    /// Move committed; the turn has passed.
    Applied { bump: Option<String> },
    /// Several destinations exist; call `play_move` with one of them.
    ChooseDestination { moves: Vec<Move> },
    /// A castle landing is available; call `confirm_castle`.
    CastleChoiceRequired { peg: PegId },
    /// First split leg committed; pick a second peg from `pegs`.
    SecondLegReady { pegs: Vec<PegId>, bump: Option<String> },
    /// First split leg committed but no peg can take the second; call
    /// `skip_second_leg`.
    NoValidSecondLeg { bump: Option<String> },
    /// Hand discarded and redrawn; the turn has passed.
    HandRedrawn,
    /// The committed move ended the game.
    GameOver { team: TeamId, bump: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_state_reset() {
        let mut turn = TurnState {
            selected_card: Some(CardId(3)),
            split: SplitProgress::SplitChosen,
            castle_prompt: None,
        };
        turn.reset();

        assert_eq!(turn.selected_card, None);
        assert_eq!(turn.split, SplitProgress::None);
    }

    #[test]
    fn test_split_progress_round_trips_through_serde() {
        let progress = SplitProgress::FirstLegDone {
            first_peg: PegId::new(PlayerId::new(1), 2),
            remaining: 4,
            direction: Direction::Backward,
        };
        let json = serde_json::to_string(&progress).unwrap();
        let back: SplitProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(progress, back);
    }
}
