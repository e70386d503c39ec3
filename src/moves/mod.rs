//! Move generation and application.
//!
//! The generator enumerates candidates; the applier commits one. Both are
//! pure snapshot-in, snapshot-out functions; the turn controller sequences
//! them.

pub mod applier;
pub mod generator;
pub mod kind;

pub use applier::{apply_move, ApplyOutcome};
pub use generator::possible_moves;
pub use kind::{Direction, Modifiers, Move, MoveKind};
