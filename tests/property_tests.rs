//! Property tests: randomized play sequences and board setups must never
//! break the occupancy invariants.

use proptest::prelude::*;

use peg_pursuit::{
    possible_moves, Card, CardId, GamePhase, GameState, Move, PegId, PlayerId, Rank, SpaceKind,
    Suit, TeamId, TurnController, PEGS_PER_PLAYER,
};

fn new_game(players: usize, seed: u64) -> GameState {
    let names: Vec<String> = (0..players).map(|i| format!("P{i}")).collect();
    let teams: Vec<TeamId> = (0..players).map(|i| TeamId((i % 2) as u8)).collect();
    let colors: Vec<String> = (0..players).map(|i| format!("#0{i:05x}")).collect();
    GameState::new(&names, &teams, players, &colors, seed).unwrap()
}

fn assert_invariants(state: &GameState) {
    for player in PlayerId::all(state.player_count()) {
        assert_eq!(state.board.peg_count(player), PEGS_PER_PLAYER);
    }
    for space in state.board.topology.all_spaces() {
        let pegs = state.board.pegs_at(space.id);
        match space.kind {
            SpaceKind::Home => {
                assert!(pegs.len() <= PEGS_PER_PLAYER);
                assert!(pegs.iter().all(|p| p.owner.0 == space.section));
            }
            SpaceKind::Castle => assert!(pegs.len() <= 1),
            _ => {}
        }
    }
}

proptest! {
    /// Drive a real dealt game by arbitrary choice indices. Whatever gets
    /// played, pegs are conserved and capacities hold after every move.
    #[test]
    fn prop_random_play_preserves_invariants(
        seed in 0u64..512,
        choices in proptest::collection::vec(0usize..128, 1..48),
    ) {
        let mut ctl = TurnController::new(new_game(4, seed).shuffle_and_deal());

        for &choice in &choices {
            if ctl.state().phase != GamePhase::Playing {
                break;
            }
            let player = ctl.state().current().id;

            if ctl.can_discard_hand(player) {
                ctl.discard_and_redraw(player).unwrap();
                assert_invariants(ctl.state());
                continue;
            }

            // Every playable (card, move) pair under plain modifiers
            let hand: Vec<CardId> = ctl.state().current().hand.iter().map(|c| c.id).collect();
            let mut candidates: Vec<(CardId, Move)> = Vec::new();
            for card in hand {
                for mv in possible_moves(ctl.state(), player, card, None) {
                    candidates.push((card, mv));
                }
            }
            if candidates.is_empty() {
                break;
            }

            let (card, mv) = candidates[choice % candidates.len()];
            ctl.select_card(player, card).unwrap();
            ctl.play_move(player, mv).unwrap();
            assert_invariants(ctl.state());
        }
    }

    /// For arbitrary own-peg placements on the ring, no generated move may
    /// land on an own peg, and generation is deterministic.
    #[test]
    fn prop_no_move_lands_on_own_peg(
        positions in proptest::collection::vec(0usize..48, 1..=4),
        rank_pick in 0usize..9,
    ) {
        let ranks = [
            Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six,
            Rank::Eight, Rank::Ten, Rank::Seven, Rank::Nine,
        ];
        let rank = ranks[rank_pick];

        let mut state = new_game(4, 1);
        state.phase = GamePhase::Playing;
        let player = PlayerId::new(0);
        let topo = state.board.topology.clone();

        let mut placed: Vec<usize> = positions;
        placed.sort_unstable();
        placed.dedup();
        for (slot, pos) in placed.iter().enumerate() {
            state.board.relocate(PegId::new(player, slot as u8), topo.ring_space(*pos));
        }

        let card = CardId::new(9000);
        state.players[0]
            .hand
            .push_back(Card::new(card, rank, Some(Suit::Spades)));

        let moves = possible_moves(&state, player, card, None);
        for mv in &moves {
            prop_assert!(!state.board.has_own_peg(mv.to, player));
        }
        prop_assert_eq!(possible_moves(&state, player, card, None), moves);
    }
}
