//! Core types: players, pegs, cards, RNG, and the game snapshot.

pub mod card;
pub mod player;
pub mod rng;
pub mod state;

pub use card::{build_draw_pile, Card, CardId, Rank, Suit};
pub use player::{PegId, Player, PlayerId, TeamId, PEGS_PER_PLAYER};
pub use rng::{GameRng, GameRngState};
pub use state::{GamePhase, GameState, SetupError, HAND_SIZE};
