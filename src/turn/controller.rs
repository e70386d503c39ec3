//! The turn controller: the only writer of game state.
//!
//! Wraps a `GameState` and a `TurnState` and exposes the turn protocol as
//! named events. Every event authenticates the acting player, validates
//! against the current FSM state, and either rejects with a `TurnError` or
//! commits and reports what to do next via `TurnFeedback`.
//!
//! ## Protocol
//!
//! ```text
//! select_card ── plain card ──────────────► play_peg / play_move
//!             ── 7: choose_split ──────────► choose_steps ─► play_peg
//!             ── 9: choose_split ─► choose_direction ─► choose_steps ─► play_peg
//! play_peg ── one destination ─► committed
//!          ── castle candidate ─► confirm_castle
//!          ── several targets ──► play_move
//! split first leg ─► SecondLegReady ─► play_peg (or skip_second_leg on a
//! dead end)
//! ```
//!
//! A committed non-split move ends the turn: the player draws back to a
//! full hand, the winner check runs, and play passes on.

use tracing::{debug, info};

use crate::board::SpaceKind;
use crate::core::{CardId, GamePhase, GameState, PegId, PlayerId, Rank, TeamId, HAND_SIZE};
use crate::moves::{apply_move, possible_moves, Direction, Modifiers, Move, MoveKind};
use crate::win::winning_team;

use super::fsm::{CastlePrompt, SplitProgress, TurnError, TurnFeedback, TurnState};

/// Sequences one game from deal to win.
#[derive(Clone, Debug)]
pub struct TurnController {
    state: GameState,
    turn: TurnState,
}

impl TurnController {
    /// Wrap a snapshot. The game should already be in the `Playing` phase;
    /// events on any other phase are rejected.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self { state, turn: TurnState::default() }
    }

    /// Rebuild a controller from a stored snapshot and turn state, e.g.
    /// when resuming a session mid-split.
    #[must_use]
    pub fn resume(state: GameState, turn: TurnState) -> Self {
        Self { state, turn }
    }

    /// The current snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The per-turn FSM state.
    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Unwrap the snapshot, e.g. to persist it.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    fn guard(&self, player: PlayerId) -> Result<(), TurnError> {
        if self.state.phase != GamePhase::Playing {
            return Err(TurnError::NotPlaying);
        }
        if self.state.current().id != player {
            return Err(TurnError::NotYourTurn(player));
        }
        Ok(())
    }

    fn selected_rank(&self) -> Result<(CardId, Rank), TurnError> {
        let card = self.turn.selected_card.ok_or(TurnError::NoCardSelected)?;
        let rank = self
            .state
            .current()
            .card_in_hand(card)
            .ok_or(TurnError::CardNotInHand(card))?
            .rank;
        Ok((card, rank))
    }

    /// Mid-split, the played card is committed and cannot be put back.
    fn split_locked(&self) -> bool {
        matches!(
            self.turn.split,
            SplitProgress::FirstLegDone { .. } | SplitProgress::DeadEnd { .. }
        )
    }

    /// Generator modifiers for the current FSM state, or `None` while a
    /// split still needs direction/step choices.
    fn gen_modifiers(&self) -> Option<Option<Modifiers>> {
        match self.turn.split {
            SplitProgress::None => Some(None),
            SplitProgress::StepsChosen { steps, direction } => Some(Some(Modifiers {
                steps: Some(steps),
                direction,
                is_second_move: false,
                first_move_peg: None,
            })),
            SplitProgress::FirstLegDone { first_peg, remaining, direction } => {
                Some(Some(Modifiers {
                    steps: Some(remaining),
                    direction: Some(direction),
                    is_second_move: true,
                    first_move_peg: Some(first_peg),
                }))
            }
            _ => None,
        }
    }

    /// Pick a card from the hand, resetting any earlier (uncommitted)
    /// choices. Rejected mid-split: the first leg already happened.
    pub fn select_card(&mut self, player: PlayerId, card: CardId) -> Result<(), TurnError> {
        self.guard(player)?;
        if self.split_locked() {
            return Err(TurnError::InvalidEvent);
        }
        if self.state.current().card_in_hand(card).is_none() {
            return Err(TurnError::CardNotInHand(card));
        }

        self.turn.reset();
        self.turn.selected_card = Some(card);
        debug!(%player, %card, "card selected");
        Ok(())
    }

    /// Put the selected card back. Rejected mid-split.
    pub fn deselect_card(&mut self, player: PlayerId) -> Result<(), TurnError> {
        self.guard(player)?;
        if self.split_locked() {
            return Err(TurnError::InvalidEvent);
        }
        self.turn.reset();
        Ok(())
    }

    /// Opt to split the selected 7 or 9 across two pegs.
    pub fn choose_split(&mut self, player: PlayerId) -> Result<(), TurnError> {
        self.guard(player)?;
        let (_, rank) = self.selected_rank()?;
        if !matches!(rank, Rank::Seven | Rank::Nine)
            || self.turn.split != SplitProgress::None
        {
            return Err(TurnError::InvalidEvent);
        }
        self.turn.split = SplitProgress::SplitChosen;
        Ok(())
    }

    /// Opt to play the selected 7 or 9 at full value with one peg.
    pub fn choose_plain(&mut self, player: PlayerId) -> Result<(), TurnError> {
        self.guard(player)?;
        let (_, rank) = self.selected_rank()?;
        if !matches!(rank, Rank::Seven | Rank::Nine)
            || !matches!(self.turn.split, SplitProgress::None | SplitProgress::SplitChosen)
        {
            return Err(TurnError::InvalidEvent);
        }
        self.turn.split = SplitProgress::None;
        Ok(())
    }

    /// Pick the first-leg direction of a 9 split.
    pub fn choose_direction(
        &mut self,
        player: PlayerId,
        direction: Direction,
    ) -> Result<(), TurnError> {
        self.guard(player)?;
        let (_, rank) = self.selected_rank()?;
        if rank != Rank::Nine || self.turn.split != SplitProgress::SplitChosen {
            return Err(TurnError::InvalidEvent);
        }
        self.turn.split = SplitProgress::DirectionChosen { direction };
        Ok(())
    }

    /// Pick the first-leg step count of a split: 1..=6 on a 7, 1..=8 on
    /// a 9 (after its direction).
    pub fn choose_steps(&mut self, player: PlayerId, steps: u8) -> Result<(), TurnError> {
        self.guard(player)?;
        let (_, rank) = self.selected_rank()?;

        let (max, direction) = match (rank, self.turn.split) {
            (Rank::Seven, SplitProgress::SplitChosen) => (6, None),
            (Rank::Nine, SplitProgress::DirectionChosen { direction }) => (8, Some(direction)),
            _ => return Err(TurnError::InvalidEvent),
        };
        if !(1..=max).contains(&steps) {
            return Err(TurnError::StepsOutOfRange { steps, min: 1, max });
        }

        self.turn.split = SplitProgress::StepsChosen { steps, direction };
        Ok(())
    }

    /// All legal moves for the selected card under the current FSM state.
    pub fn legal_moves(&self, player: PlayerId) -> Result<Vec<Move>, TurnError> {
        self.guard(player)?;
        let (card, _) = self.selected_rank()?;
        let mods = self.gen_modifiers().ok_or(TurnError::InvalidEvent)?;
        Ok(possible_moves(&self.state, player, card, mods.as_ref()))
    }

    /// Pegs with at least one legal move right now, in slot order.
    pub fn selectable_pegs(&self, player: PlayerId) -> Result<Vec<PegId>, TurnError> {
        let mut pegs: Vec<PegId> = self.legal_moves(player)?.iter().map(|m| m.peg).collect();
        pegs.sort();
        pegs.dedup();
        Ok(pegs)
    }

    /// Legal moves restricted to one peg.
    pub fn moves_for_peg(&self, player: PlayerId, peg: PegId) -> Result<Vec<Move>, TurnError> {
        Ok(self
            .legal_moves(player)?
            .into_iter()
            .filter(|m| m.peg == peg)
            .collect())
    }

    /// Act with a peg. Resolves immediately when the peg has exactly one
    /// destination; otherwise asks for a castle decision or a destination
    /// pick.
    pub fn play_peg(&mut self, player: PlayerId, peg: PegId) -> Result<TurnFeedback, TurnError> {
        if self.turn.castle_prompt.is_some() {
            return Err(TurnError::InvalidEvent);
        }
        let moves = self.moves_for_peg(player, peg)?;
        if moves.is_empty() {
            return Err(TurnError::NoMoveForPeg(peg));
        }

        // A peg already inside the castle advances without ceremony
        let in_castle =
            self.state.board.topology.space(moves[0].from).kind == SpaceKind::Castle;

        let castle = moves.iter().find(|m| m.kind.is_castle_landing()).copied();
        if let (Some(castle), false) = (castle, in_castle) {
            let regular = moves.iter().find(|m| !m.kind.is_castle_landing()).copied();
            self.turn.castle_prompt = Some(CastlePrompt { peg, regular, castle });
            debug!(%peg, has_regular = regular.is_some(), "castle entry offered");
            return Ok(TurnFeedback::CastleChoiceRequired { peg });
        }

        if moves.len() == 1 {
            return Ok(self.commit(moves[0]));
        }
        Ok(TurnFeedback::ChooseDestination { moves })
    }

    /// Commit one specific generated move (after `ChooseDestination`, or
    /// directly by callers that enumerate `legal_moves` themselves).
    pub fn play_move(&mut self, player: PlayerId, mv: Move) -> Result<TurnFeedback, TurnError> {
        if self.turn.castle_prompt.is_some() {
            return Err(TurnError::InvalidEvent);
        }
        if !self.legal_moves(player)?.contains(&mv) {
            return Err(TurnError::UnknownMove);
        }
        Ok(self.commit(mv))
    }

    /// Answer a pending castle prompt. Declining falls back to the regular
    /// landing; with no regular landing the prompt stands and is offered
    /// again.
    pub fn confirm_castle(
        &mut self,
        player: PlayerId,
        enter: bool,
    ) -> Result<TurnFeedback, TurnError> {
        self.guard(player)?;
        let prompt = self.turn.castle_prompt.ok_or(TurnError::InvalidEvent)?;

        if enter {
            self.turn.castle_prompt = None;
            return Ok(self.commit(prompt.castle));
        }
        match prompt.regular {
            Some(regular) => {
                self.turn.castle_prompt = None;
                Ok(self.commit(regular))
            }
            None => {
                debug!(peg = %prompt.peg, "castle entry declined with no alternative; re-offering");
                Ok(TurnFeedback::CastleChoiceRequired { peg: prompt.peg })
            }
        }
    }

    /// Give up a dead-end second split leg: the card is spent and the turn
    /// passes.
    pub fn skip_second_leg(&mut self, player: PlayerId) -> Result<TurnFeedback, TurnError> {
        self.guard(player)?;
        let SplitProgress::DeadEnd { .. } = self.turn.split else {
            return Err(TurnError::InvalidEvent);
        };
        let (card, _) = self.selected_rank()?;

        let spent = self
            .state
            .remove_from_hand(player, card)
            .ok_or(TurnError::CardNotInHand(card))?;
        self.state.discard_pile.push_back(spent);
        info!(%player, %card, "second split leg skipped");
        Ok(self.end_turn(None))
    }

    /// Is the discard-and-redraw escape hatch open for this player?
    ///
    /// Only when the whole hand is unplayable: no peg on the track, and no
    /// held card generates a single move (faces and aces always do while a
    /// peg waits in home).
    #[must_use]
    pub fn can_discard_hand(&self, player: PlayerId) -> bool {
        if self.guard(player).is_err() || self.split_locked() {
            return false;
        }
        let seat = &self.state.players[player.index()];
        if seat.hand.is_empty() || !self.state.board.pegs_on_track(player).is_empty() {
            return false;
        }
        // A face or ace always brings a waiting peg out
        let waiting_at_home = !self.state.board.pegs_by_kind(player, SpaceKind::Home).is_empty();
        if waiting_at_home && seat.hand.iter().any(|c| c.rank.can_come_out()) {
            return false;
        }
        seat.hand
            .iter()
            .all(|c| possible_moves(&self.state, player, c.id, None).is_empty())
    }

    /// Discard an unplayable hand, draw a fresh one, and pass the turn.
    pub fn discard_and_redraw(&mut self, player: PlayerId) -> Result<TurnFeedback, TurnError> {
        self.guard(player)?;
        if !self.can_discard_hand(player) {
            return Err(TurnError::DiscardUnavailable);
        }

        let old_hand = std::mem::take(&mut self.state.players[player.index()].hand);
        for card in old_hand {
            self.state.discard_pile.push_back(card);
        }
        for _ in 0..HAND_SIZE {
            if let Some(card) = self.state.draw_from_pile() {
                self.state.players[player.index()].hand.push_back(card);
            }
        }

        info!(%player, "hand discarded and redrawn");
        self.state = self.state.advance_to_next_player();
        self.turn.reset();
        Ok(TurnFeedback::HandRedrawn)
    }

    /// Apply a move and route the aftermath: split bookkeeping, win check,
    /// turn handoff.
    fn commit(&mut self, mv: Move) -> TurnFeedback {
        let outcome = apply_move(&self.state, &mv);
        self.state = outcome.state;
        self.turn.castle_prompt = None;

        info!(player = %mv.player, peg = %mv.peg, to = %mv.to, kind = ?mv.kind, "move committed");

        if let MoveKind::SplitFirstLeg { remaining, direction, .. } = mv.kind {
            return self.after_first_leg(mv, remaining, direction, outcome.bump);
        }

        self.end_turn(outcome.bump)
    }

    fn after_first_leg(
        &mut self,
        mv: Move,
        remaining: u8,
        first_direction: Direction,
        bump: Option<String>,
    ) -> TurnFeedback {
        // A 9's legs run in opposite directions; a 7's both run forward
        let rank = self
            .state
            .player(mv.player)
            .and_then(|p| p.card_in_hand(mv.card))
            .map(|c| c.rank);
        let direction = match rank {
            Some(Rank::Nine) => first_direction.opposite(),
            _ => Direction::Forward,
        };

        self.turn.split = SplitProgress::FirstLegDone {
            first_peg: mv.peg,
            remaining,
            direction,
        };

        if let Some(team) = winning_team(&self.state) {
            return self.finish_game(team, bump);
        }

        match self.selectable_pegs(mv.player) {
            Ok(pegs) if !pegs.is_empty() => TurnFeedback::SecondLegReady { pegs, bump },
            _ => {
                self.turn.split = SplitProgress::DeadEnd { first_peg: mv.peg };
                debug!(peg = %mv.peg, "no peg can take the second split leg");
                TurnFeedback::NoValidSecondLeg { bump }
            }
        }
    }

    fn end_turn(&mut self, bump: Option<String>) -> TurnFeedback {
        if let Some(team) = winning_team(&self.state) {
            return self.finish_game(team, bump);
        }

        // Draw back to a full hand before passing play on
        let idx = self.state.current_player;
        while self.state.players[idx].hand.len() < HAND_SIZE {
            match self.state.draw_from_pile() {
                Some(card) => self.state.players[idx].hand.push_back(card),
                None => break,
            }
        }

        self.state = self.state.advance_to_next_player();
        self.turn.reset();
        TurnFeedback::Applied { bump }
    }

    fn finish_game(&mut self, team: TeamId, bump: Option<String>) -> TurnFeedback {
        self.state.winner = Some(team);
        self.state.phase = GamePhase::GameOver;
        self.turn.reset();
        info!(%team, "game over");
        TurnFeedback::GameOver { team, bump }
    }
}
