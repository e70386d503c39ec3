//! Candidate moves and their tagged kinds.
//!
//! A `Move` is one concrete, applicable relocation: one peg, one
//! destination. When a card play is ambiguous (regular track landing vs
//! castle entry), the generator emits several `Move` values and the turn
//! controller asks the player to pick; nothing here is a grab-bag of
//! optional flags.

use serde::{Deserialize, Serialize};

use crate::board::SpaceId;
use crate::core::{CardId, PegId, PlayerId};

/// Movement direction along the shared track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The other direction. A 9-split's second leg always uses this.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Step offset sign for ring walking.
    #[must_use]
    pub const fn signed(self, steps: u8) -> isize {
        match self {
            Direction::Forward => steps as isize,
            Direction::Backward => -(steps as isize),
        }
    }
}

/// What a move is, carrying exactly the fields that kind needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Bring a peg out of home onto the section's come-out space
    /// (Ace and face cards only).
    ComeOut,
    /// Move along the shared track, landing on a track space.
    Advance { steps: u8, direction: Direction },
    /// Land in a castle slot: entering from the track, or advancing within
    /// the castle when the peg is already inside.
    CastleEntry { slot: u8 },
    /// First leg of a 7/9 split. The card stays in hand until the second
    /// leg resolves. `castle_slot` is set when this leg ends in the castle.
    SplitFirstLeg {
        steps: u8,
        direction: Direction,
        remaining: u8,
        castle_slot: Option<u8>,
    },
    /// Second leg of a 7/9 split; discards the card.
    SplitSecondLeg {
        steps: u8,
        direction: Direction,
        castle_slot: Option<u8>,
    },
    /// Joker teleport onto a track space holding an opponent peg.
    JokerCapture,
}

impl MoveKind {
    /// Does applying this move keep the card in hand?
    ///
    /// True only mid-split: a split card is a single logical action across
    /// two relocations and is discarded once, after the second.
    #[must_use]
    pub const fn retains_card(self) -> bool {
        matches!(self, MoveKind::SplitFirstLeg { .. })
    }

    /// Does this move land in a castle slot?
    #[must_use]
    pub const fn is_castle_landing(self) -> bool {
        match self {
            MoveKind::CastleEntry { .. } => true,
            MoveKind::SplitFirstLeg { castle_slot, .. }
            | MoveKind::SplitSecondLeg { castle_slot, .. } => castle_slot.is_some(),
            _ => false,
        }
    }
}

/// One concrete candidate move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub player: PlayerId,
    pub card: CardId,
    pub peg: PegId,
    pub from: SpaceId,
    pub to: SpaceId,
    pub kind: MoveKind,
}

/// Caller-supplied parameters for multi-step cards (7 and 9 splits).
///
/// Plain plays pass no modifiers. A split's first leg passes `steps` (and
/// `direction` for the 9); the second leg additionally sets
/// `is_second_move` and `first_move_peg` so the already-moved peg is
/// excluded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub steps: Option<u8>,
    pub direction: Option<Direction>,
    pub is_second_move: bool,
    pub first_move_peg: Option<PegId>,
}
