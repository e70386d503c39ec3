//! Game state: the immutable snapshot every engine operation consumes.
//!
//! `GameState` uses `im` persistent collections and an `Arc`-shared board
//! topology, so cloning a snapshot is cheap. Engine operations take a state
//! and return a new one; nothing here performs I/O or blocks.
//!
//! ## Lifecycle
//!
//! Created once in the `Welcome` phase, dealt into `Playing` by
//! [`GameState::shuffle_and_deal`], and frozen at `GameOver` once a team
//! gets all pegs home to the castle.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::board::{Board, BoardTopology};

use super::card::{build_draw_pile, Card, CardId};
use super::player::{Player, PlayerId, TeamId};
use super::rng::GameRng;

/// Cards dealt to each player.
pub const HAND_SIZE: usize = 5;

/// Coarse game lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Welcome,
    Setup,
    Playing,
    GameOver,
}

/// Errors building a new game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("player count {0} outside 2..=8")]
    PlayerCount(usize),
    #[error("{sections} sections cannot seat {players} players")]
    TooFewSections { players: usize, sections: usize },
    #[error("sections outside 2..=8: {0}")]
    SectionCount(usize),
    #[error("expected one {what} per player")]
    MismatchedSeats { what: &'static str },
}

/// Complete game snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Seated players in turn order.
    pub players: Vec<Player>,
    /// Index into `players`; always valid, wraps modulo player count.
    pub current_player: usize,
    pub board: Board,
    /// Face-down draw pile; the top is the back of the vector.
    pub draw_pile: Vector<Card>,
    pub discard_pile: Vector<Card>,
    /// Winning team once decided.
    pub winner: Option<TeamId>,
    pub rng: GameRng,
}

impl GameState {
    /// Create the initial snapshot: pegs in home, full unshuffled draw
    /// pile, empty hands, phase `Welcome`.
    ///
    /// Player `i` is seated in board section `i`. `num_sections` may exceed
    /// the player count; extra sections stay unowned.
    pub fn new(
        names: &[String],
        teams: &[TeamId],
        num_sections: usize,
        colors: &[String],
        seed: u64,
    ) -> Result<Self, SetupError> {
        let player_count = names.len();
        if !(2..=8).contains(&player_count) {
            return Err(SetupError::PlayerCount(player_count));
        }
        if !(2..=8).contains(&num_sections) {
            return Err(SetupError::SectionCount(num_sections));
        }
        if num_sections < player_count {
            return Err(SetupError::TooFewSections { players: player_count, sections: num_sections });
        }
        if teams.len() != player_count {
            return Err(SetupError::MismatchedSeats { what: "team" });
        }
        if colors.len() != player_count {
            return Err(SetupError::MismatchedSeats { what: "color" });
        }

        let topology = BoardTopology::build(num_sections);
        let board = Board::new(topology, player_count);

        let players = (0..player_count)
            .map(|i| Player {
                id: PlayerId::new(i as u8),
                name: names[i].clone(),
                team: teams[i],
                color: colors[i].clone(),
                hand: Vector::new(),
                section: i as u8,
            })
            .collect();

        debug!(player_count, num_sections, "created initial game state");

        Ok(Self {
            phase: GamePhase::Welcome,
            players,
            current_player: 0,
            board,
            draw_pile: build_draw_pile(player_count).into_iter().collect(),
            discard_pile: Vector::new(),
            winner: None,
            rng: GameRng::new(seed),
        })
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Look up a player. Absent IDs return `None`.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Mutable player lookup.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Shuffle the draw pile and deal [`HAND_SIZE`] cards to every player,
    /// transitioning `Welcome`/`Setup` into `Playing`.
    ///
    /// A no-op (logged) on any other phase.
    #[must_use]
    pub fn shuffle_and_deal(&self) -> GameState {
        if !matches!(self.phase, GamePhase::Welcome | GamePhase::Setup) {
            warn!(phase = ?self.phase, "shuffle_and_deal called outside setup");
            return self.clone();
        }

        let mut next = self.clone();

        let mut pile: Vec<Card> = next.draw_pile.iter().copied().collect();
        next.rng.shuffle(&mut pile);
        next.draw_pile = pile.into_iter().collect();

        for idx in 0..next.players.len() {
            for _ in 0..HAND_SIZE {
                if let Some(card) = next.draw_from_pile() {
                    next.players[idx].hand.push_back(card);
                }
            }
        }

        next.phase = GamePhase::Playing;
        debug!("shuffled and dealt; game is live");
        next
    }

    /// Pure turn advancement: next player modulo player count.
    #[must_use]
    pub fn advance_to_next_player(&self) -> GameState {
        let mut next = self.clone();
        next.current_player = (next.current_player + 1) % next.players.len();
        debug!(next_player = %next.current().id, "turn advanced");
        next
    }

    /// Take the top card of the draw pile, reshuffling the discard pile
    /// into the draw pile when it runs dry. `None` only when both piles
    /// are empty.
    pub fn draw_from_pile(&mut self) -> Option<Card> {
        if self.draw_pile.is_empty() && !self.discard_pile.is_empty() {
            let mut pile: Vec<Card> = self.discard_pile.iter().copied().collect();
            self.rng.shuffle(&mut pile);
            self.draw_pile = pile.into_iter().collect();
            self.discard_pile = Vector::new();
            debug!(cards = self.draw_pile.len(), "reshuffled discard pile into draw pile");
        }
        self.draw_pile.pop_back()
    }

    /// Remove a card from a player's hand. `None` if absent.
    pub fn remove_from_hand(&mut self, player: PlayerId, card: CardId) -> Option<Card> {
        let hand = &mut self.player_mut(player)?.hand;
        let idx = hand.iter().position(|c| c.id == card)?;
        Some(hand.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn four_player_state(seed: u64) -> GameState {
        let names: Vec<String> = ["Ada", "Ben", "Cleo", "Dev"].iter().map(|s| s.to_string()).collect();
        let teams = vec![TeamId(0), TeamId(1), TeamId(0), TeamId(1)];
        let colors: Vec<String> = ["#f00", "#0f0", "#00f", "#ff0"].iter().map(|s| s.to_string()).collect();
        GameState::new(&names, &teams, 4, &colors, seed).unwrap()
    }

    #[test]
    fn test_new_game_starts_in_welcome() {
        let state = four_player_state(42);

        assert_eq!(state.phase, GamePhase::Welcome);
        assert_eq!(state.player_count(), 4);
        assert_eq!(state.current_player, 0);
        assert_eq!(state.draw_pile.len(), 54);
        assert!(state.players.iter().all(|p| p.hand.is_empty()));
        assert!(state.winner.is_none());
    }

    #[test]
    fn test_setup_validation() {
        let names = vec!["Solo".to_string()];
        let err = GameState::new(&names, &[TeamId(0)], 2, &["#fff".to_string()], 1);
        assert_eq!(err.unwrap_err(), SetupError::PlayerCount(1));

        let names: Vec<String> = (0..3).map(|i| format!("P{i}")).collect();
        let teams = vec![TeamId(0), TeamId(1), TeamId(0)];
        let colors: Vec<String> = (0..3).map(|_| "#fff".to_string()).collect();
        let err = GameState::new(&names, &teams, 2, &colors, 1);
        assert_eq!(err.unwrap_err(), SetupError::TooFewSections { players: 3, sections: 2 });

        let err = GameState::new(&names, &teams[..2], 4, &colors, 1);
        assert_eq!(err.unwrap_err(), SetupError::MismatchedSeats { what: "team" });
    }

    #[test]
    fn test_shuffle_and_deal() {
        let state = four_player_state(42).shuffle_and_deal();

        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.players.iter().all(|p| p.hand.len() == HAND_SIZE));
        assert_eq!(state.draw_pile.len(), 54 - 4 * HAND_SIZE);
    }

    #[test]
    fn test_shuffle_is_seed_deterministic() {
        let a = four_player_state(7).shuffle_and_deal();
        let b = four_player_state(7).shuffle_and_deal();
        let c = four_player_state(8).shuffle_and_deal();

        assert_eq!(a.players[0].hand, b.players[0].hand);
        assert_ne!(
            a.draw_pile.iter().collect::<Vec<_>>(),
            c.draw_pile.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_advance_wraps() {
        let mut state = four_player_state(42);
        state.current_player = 3;

        let next = state.advance_to_next_player();
        assert_eq!(next.current_player, 0);
        // Original snapshot untouched
        assert_eq!(state.current_player, 3);
    }

    #[test]
    fn test_draw_reshuffles_discard_when_empty() {
        let mut state = four_player_state(42).shuffle_and_deal();

        // Drain the draw pile into the discard pile
        while let Some(card) = state.draw_pile.pop_back() {
            state.discard_pile.push_back(card);
        }
        let discarded = state.discard_pile.len();
        assert!(discarded > 0);

        let drawn = state.draw_from_pile();
        assert!(drawn.is_some());
        assert!(state.discard_pile.is_empty());
        assert_eq!(state.draw_pile.len(), discarded - 1);
    }

    #[test]
    fn test_remove_from_hand() {
        let mut state = four_player_state(42).shuffle_and_deal();
        let player = state.players[0].id;
        let card = state.players[0].hand[0];

        let removed = state.remove_from_hand(player, card.id);
        assert_eq!(removed, Some(card));
        assert_eq!(state.players[0].hand.len(), HAND_SIZE - 1);
        assert_eq!(state.remove_from_hand(player, card.id), None);
    }
}
