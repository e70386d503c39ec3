//! # peg-pursuit
//!
//! Rules engine for a card-driven peg race: 2-8 players race four pegs
//! each around a shared circular track and into a private five-slot
//! castle, moving by playing standard playing cards.
//!
//! ## Design Principles
//!
//! 1. **Snapshot State**: `GameState` is a cheap-to-clone immutable
//!    snapshot (`im` collections, `Arc` topology). Engine operations take
//!    a snapshot and return a new one.
//!
//! 2. **Generate, Then Apply**: `possible_moves` enumerates every legal
//!    destination; `apply_move` commits exactly one. Ambiguity (track
//!    landing vs castle entry, joker targets) surfaces as multiple
//!    candidates, never as flags on a single move.
//!
//! 3. **Explicit Turn Protocol**: multi-step plays (7/9 splits, castle
//!    prompts) live in a serializable FSM driven through named events on
//!    `TurnController`. A half-finished split survives a snapshot round
//!    trip.
//!
//! ## Modules
//!
//! - `core`: players, pegs, cards, deck building, RNG, game state
//! - `board`: static topology (sections, ring, castles) and peg occupancy
//! - `moves`: legal-move generation and application
//! - `turn`: the turn controller and its FSM
//! - `win`: win detection
//! - `session`: in-memory session store for transports
//! - `snapshot`: bincode snapshot codec

pub mod board;
pub mod core;
pub mod moves;
pub mod session;
pub mod snapshot;
pub mod turn;
pub mod win;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use crate::core::{
    build_draw_pile, Card, CardId, GamePhase, GameRng, GameRngState, GameState, PegId, Player,
    PlayerId, Rank, SetupError, Suit, TeamId, HAND_SIZE, PEGS_PER_PLAYER,
};

pub use crate::board::{Board, BoardTopology, Space, SpaceId, SpaceKind};

pub use crate::moves::{apply_move, possible_moves, ApplyOutcome, Direction, Modifiers, Move, MoveKind};

pub use crate::turn::{
    CastlePrompt, SplitProgress, TurnController, TurnError, TurnFeedback, TurnState,
};

pub use crate::win::{is_game_over, winning_team};

pub use crate::session::{Session, SessionStore};
