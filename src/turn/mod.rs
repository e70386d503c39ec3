//! The turn protocol: card selection, split choreography, castle prompts,
//! and turn handoff.

pub mod controller;
pub mod fsm;

pub use controller::TurnController;
pub use fsm::{CastlePrompt, SplitProgress, TurnError, TurnFeedback, TurnState};
