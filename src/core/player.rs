//! Player, team, and peg identification.
//!
//! ## PlayerId / TeamId
//!
//! Type-safe indices. Players are 0-based and double as section indices:
//! player `i` owns board section `i`.
//!
//! ## PegId
//!
//! Every peg carries its owner and a slot number 0..4. Identity is stable
//! for the whole game; pegs are never created or destroyed, only relocated.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};

/// Number of pegs each player owns, for the whole game.
pub const PEGS_PER_PLAYER: usize = 4;

/// Player identifier. 0-based index into `GameState::players`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Team identifier. Players sharing a team share the win condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// Stable peg identity: owner plus slot 0..4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PegId {
    /// Owning player. Never changes, even when the peg is bumped home.
    pub owner: PlayerId,
    /// Slot 0..PEGS_PER_PLAYER within the owner's set.
    pub slot: u8,
}

impl PegId {
    /// Create a peg ID.
    #[must_use]
    pub const fn new(owner: PlayerId, slot: u8) -> Self {
        Self { owner, slot }
    }

    /// All pegs owned by a player.
    pub fn all_for(owner: PlayerId) -> impl Iterator<Item = PegId> {
        (0..PEGS_PER_PLAYER as u8).map(move |slot| PegId { owner, slot })
    }
}

impl std::fmt::Display for PegId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}-peg-{}", self.owner.0, self.slot)
    }
}

/// One seated player: identity, team, hand, and owned section.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: TeamId,
    /// Display color, opaque to the engine.
    pub color: String,
    /// Ordered hand of cards.
    pub hand: Vector<Card>,
    /// The board section this player owns (home, track slice, castle).
    pub section: u8,
}

impl Player {
    /// All pegs owned by this player.
    pub fn pegs(&self) -> impl Iterator<Item = PegId> {
        PegId::all_for(self.id)
    }

    /// Find a card in this player's hand by ID.
    #[must_use]
    pub fn card_in_hand(&self, card: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == card)
    }
}
