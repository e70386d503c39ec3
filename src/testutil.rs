//! Shared test fixtures.
//!
//! States built here skip dealing: hands start empty and tests inject the
//! exact cards they need with [`give_card`], keeping every scenario
//! deterministic without threading seeds around.

use crate::core::{Card, CardId, GamePhase, GameState, PlayerId, Rank, Suit, TeamId};

/// A fresh `Welcome`-phase state with `n` players on `n` sections,
/// alternating between two teams.
pub(crate) fn state_with_players(n: usize) -> GameState {
    let names: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
    let teams: Vec<TeamId> = (0..n).map(|i| TeamId((i % 2) as u8)).collect();
    let colors: Vec<String> = (0..n).map(|i| format!("#00{i:02x}00")).collect();
    GameState::new(&names, &teams, n, &colors, 42).expect("valid test setup")
}

/// Like [`state_with_players`] but already in the `Playing` phase, with
/// empty hands and every peg in home.
pub(crate) fn playing_state(n: usize) -> GameState {
    let mut state = state_with_players(n);
    state.phase = GamePhase::Playing;
    state
}

/// Put a card of the given rank into a player's hand, returning its ID.
///
/// IDs start at 1000 to stay clear of anything in the draw pile.
pub(crate) fn give_card(state: &mut GameState, player: PlayerId, rank: Rank) -> CardId {
    let serial: u16 = state.players.iter().map(|p| p.hand.len() as u16).sum();
    let id = CardId(1000 + serial);
    let suit = (rank != Rank::Joker).then_some(Suit::Spades);
    state.players[player.index()].hand.push_back(Card::new(id, rank, suit));
    id
}
