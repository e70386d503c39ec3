//! Capture (bump) behavior: landings on occupied shared spaces and joker
//! teleports.

use peg_pursuit::{
    possible_moves, Card, CardId, GamePhase, GameState, MoveKind, PegId, PlayerId, Rank, Suit,
    TeamId, TurnController, TurnFeedback,
};

fn playing(players: usize) -> GameState {
    let names: Vec<String> = (0..players).map(|i| format!("P{i}")).collect();
    let teams: Vec<TeamId> = (0..players).map(|i| TeamId((i % 2) as u8)).collect();
    let colors: Vec<String> = (0..players).map(|i| format!("#0{i:05x}")).collect();
    let mut state = GameState::new(&names, &teams, players, &colors, 42).unwrap();
    state.phase = GamePhase::Playing;
    state
}

fn give(state: &mut GameState, player: PlayerId, rank: Rank) -> CardId {
    let serial: u16 = state.players.iter().map(|p| p.hand.len() as u16).sum();
    let id = CardId::new(4000 + serial);
    let suit = (rank != Rank::Joker).then_some(Suit::Diamonds);
    state.players[player.index()].hand.push_back(Card::new(id, rank, suit));
    id
}

/// Landing on an opponent sends it back to its own home and reports the
/// bump.
#[test]
fn test_landing_on_opponent_bumps_it_home() {
    let mut state = playing(4);
    let player = PlayerId::new(0);
    let mine = PegId::new(player, 0);
    let victim = PegId::new(PlayerId::new(3), 2);
    let topo = state.board.topology.clone();
    state.board.relocate(mine, topo.track_space(1, 1));
    state.board.relocate(victim, topo.track_space(1, 7));
    let six = give(&mut state, player, Rank::Six);

    let mut ctl = TurnController::new(state);
    ctl.select_card(player, six).unwrap();
    let feedback = ctl.play_peg(player, mine).unwrap();

    let TurnFeedback::Applied { bump } = feedback else {
        panic!("expected Applied, got {feedback:?}");
    };
    assert_eq!(bump.as_deref(), Some("Bumped P3 back home!"));
    assert_eq!(ctl.state().board.space_of(victim), Some(topo.home_of(3)));
    assert_eq!(ctl.state().board.space_of(mine), Some(topo.track_space(1, 7)));
}

/// Every opponent peg stacked on the landing space goes home, not just the
/// first one.
#[test]
fn test_stacked_opponents_all_bumped() {
    let mut state = playing(4);
    let player = PlayerId::new(0);
    let mine = PegId::new(player, 0);
    let v1 = PegId::new(PlayerId::new(1), 0);
    let v2 = PegId::new(PlayerId::new(2), 0);
    let topo = state.board.topology.clone();
    state.board.relocate(mine, topo.track_space(1, 1));
    state.board.relocate(v1, topo.track_space(1, 3));
    state.board.relocate(v2, topo.track_space(1, 3));
    let two = give(&mut state, player, Rank::Two);

    let mut ctl = TurnController::new(state);
    ctl.select_card(player, two).unwrap();
    ctl.play_peg(player, mine).unwrap();

    assert_eq!(ctl.state().board.space_of(v1), Some(topo.home_of(1)));
    assert_eq!(ctl.state().board.space_of(v2), Some(topo.home_of(2)));
    assert_eq!(ctl.state().board.pegs_at(topo.track_space(1, 3)).len(), 1);
}

/// A bumped peg keeps its identity and can come out again later.
#[test]
fn test_bumped_peg_returns_to_play() {
    let mut state = playing(2);
    let bully = PlayerId::new(0);
    let victim_owner = PlayerId::new(1);
    let victim = PegId::new(victim_owner, 0);
    let topo = state.board.topology.clone();
    state.board.relocate(PegId::new(bully, 0), topo.track_space(0, 6));
    state.board.relocate(victim, topo.track_space(0, 8));
    let two = give(&mut state, bully, Rank::Two);
    let ace = give(&mut state, victim_owner, Rank::Ace);

    let mut ctl = TurnController::new(state);
    ctl.select_card(bully, two).unwrap();
    ctl.play_peg(bully, PegId::new(bully, 0)).unwrap();
    assert_eq!(ctl.state().board.space_of(victim), Some(topo.home_of(1)));

    // Victim's turn: the ace brings the same peg straight back out
    ctl.select_card(victim_owner, ace).unwrap();
    let feedback = ctl.play_peg(victim_owner, victim).unwrap();
    assert!(matches!(feedback, TurnFeedback::Applied { .. }));
    assert_eq!(ctl.state().board.space_of(victim), Some(topo.come_out_of(1)));
}

/// The joker teleports from home straight onto an occupied space; the
/// occupant goes home.
#[test]
fn test_joker_teleports_from_home_and_captures() {
    let mut state = playing(4);
    let player = PlayerId::new(0);
    let victim = PegId::new(PlayerId::new(2), 0);
    let topo = state.board.topology.clone();
    state.board.relocate(victim, topo.track_space(3, 9));
    let joker = give(&mut state, player, Rank::Joker);

    let moves = possible_moves(&state, player, joker, None);
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|m| m.kind == MoveKind::JokerCapture));

    let mut ctl = TurnController::new(state);
    ctl.select_card(player, joker).unwrap();
    let feedback = ctl.play_peg(player, PegId::new(player, 0)).unwrap();
    assert!(matches!(feedback, TurnFeedback::Applied { .. }));
    assert_eq!(ctl.state().board.space_of(victim), Some(topo.home_of(2)));
    assert_eq!(
        ctl.state().board.space_of(PegId::new(player, 0)),
        Some(topo.track_space(3, 9))
    );
}

/// With several opponent-occupied spaces, the joker play needs a
/// destination pick.
#[test]
fn test_joker_multiple_targets_requires_destination_choice() {
    let mut state = playing(4);
    let player = PlayerId::new(0);
    let topo = state.board.topology.clone();
    state.board.relocate(PegId::new(PlayerId::new(1), 0), topo.track_space(1, 2));
    state.board.relocate(PegId::new(PlayerId::new(2), 0), topo.track_space(2, 2));
    let joker = give(&mut state, player, Rank::Joker);

    let mut ctl = TurnController::new(state);
    ctl.select_card(player, joker).unwrap();
    let feedback = ctl.play_peg(player, PegId::new(player, 0)).unwrap();

    let TurnFeedback::ChooseDestination { moves } = feedback else {
        panic!("expected ChooseDestination, got {feedback:?}");
    };
    assert_eq!(moves.len(), 2);

    let pick = moves[1];
    ctl.play_move(player, pick).unwrap();
    assert_eq!(ctl.state().board.space_of(PegId::new(player, 0)), Some(pick.to));
}

/// A joker cannot land on a space shared with one of its own pegs, and has
/// no targets on castle or home spaces.
#[test]
fn test_joker_respects_own_pegs_and_safe_zones() {
    let mut state = playing(4);
    let player = PlayerId::new(0);
    let topo = state.board.topology.clone();
    // Opponent stacked with one of ours: not a target
    let shared = topo.track_space(1, 2);
    state.board.relocate(PegId::new(player, 0), shared);
    state.board.relocate(PegId::new(PlayerId::new(1), 0), shared);
    // Opponent safe inside its castle: not a target
    state.board.relocate(PegId::new(PlayerId::new(2), 0), topo.castle_slot(2, 0));
    let joker = give(&mut state, player, Rank::Joker);

    assert!(possible_moves(&state, player, joker, None).is_empty());
}
