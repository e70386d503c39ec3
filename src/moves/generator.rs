//! Legal-move generation.
//!
//! `possible_moves` enumerates every legal destination for one player, one
//! card, and (for split cards) the caller-supplied modifiers. It is a pure
//! function: identical inputs produce identical output, and an
//! unsatisfiable request yields an empty vector, never an error.
//!
//! ## Blocking
//!
//! A path may not pass over or land on a space holding one of the mover's
//! **own** pegs. Opponent pegs never block; they are bumped on landing.
//!
//! ## Castle-entry arithmetic (numeric ranks, 7, 9; forward only)
//!
//! With `d` forward steps from the peg to its own entrance and `total`
//! steps on the card (or split leg), `castle_steps = total - d - 1`. When
//! `0 <= castle_steps <= 4`, the track path to the entrance is clear, and
//! no peg sits on castle slots `0..=castle_steps`, the castle landing is
//! emitted as a candidate *alongside* any regular track landing. Entering
//! is never automatic; the turn controller prompts.

use tracing::trace;

use crate::board::{SpaceId, SpaceKind, CASTLE_SLOTS};
use crate::core::{CardId, GameState, PegId, PlayerId, Rank};

use super::kind::{Direction, Modifiers, Move, MoveKind};

/// Enumerate legal moves for `player` playing `card`.
///
/// `modifiers` drives the 7/9 split protocol; plain plays pass `None`.
#[must_use]
pub fn possible_moves(
    state: &GameState,
    player: PlayerId,
    card: CardId,
    modifiers: Option<&Modifiers>,
) -> Vec<Move> {
    let Some(seat) = state.player(player) else {
        return Vec::new();
    };
    let Some(card_ref) = seat.card_in_hand(card) else {
        return Vec::new();
    };

    let mods = modifiers.copied().unwrap_or_default();
    let gen = Generator { state, player, card };

    let moves = match card_ref.rank {
        Rank::Ace | Rank::Jack | Rank::Queen | Rank::King => {
            gen.come_out_and_advance(card_ref.rank.steps().unwrap_or(10))
        }
        Rank::Two | Rank::Three | Rank::Five | Rank::Six | Rank::Eight | Rank::Ten => {
            gen.forward_moves(card_ref.rank.steps().unwrap_or(0))
        }
        Rank::Four => gen.backward_moves(4),
        Rank::Seven => gen.seven_moves(&mods),
        Rank::Nine => gen.nine_moves(&mods),
        Rank::Joker => gen.joker_moves(),
    };

    trace!(%player, %card, count = moves.len(), "generated candidate moves");
    moves
}

struct Generator<'a> {
    state: &'a GameState,
    player: PlayerId,
    card: CardId,
}

impl Generator<'_> {
    fn mk(&self, peg: PegId, from: SpaceId, to: SpaceId, kind: MoveKind) -> Move {
        Move { player: self.player, card: self.card, peg, from, to, kind }
    }

    fn section(&self) -> u8 {
        self.state.players[self.player.index()].section
    }

    /// Track landing after walking `steps` in `direction`; `None` when the
    /// path passes over or lands on an own peg.
    fn track_landing(&self, from: SpaceId, steps: u8, direction: Direction) -> Option<SpaceId> {
        let topo = &self.state.board.topology;
        let mut landing = None;
        for i in 1..=steps {
            let space = topo.step_from(from, direction.signed(i))?;
            if self.state.board.has_own_peg(space, self.player) {
                return None;
            }
            landing = Some(space);
        }
        landing
    }

    /// Castle slot reachable with `total` forward steps, if any.
    fn castle_candidate(&self, from: SpaceId, total: u8) -> Option<u8> {
        let topo = &self.state.board.topology;
        let entrance = topo.entrance_of(self.section());
        let d = topo.forward_distance(from, entrance)?;

        if d >= total as usize {
            return None;
        }
        let castle_steps = total as usize - d - 1;
        if castle_steps >= CASTLE_SLOTS {
            return None;
        }

        // Track path up to and including the entrance must be clear
        for i in 1..=d {
            let space = topo.step_from(from, i as isize)?;
            if self.state.board.has_own_peg(space, self.player) {
                return None;
            }
        }
        // No jumping pegs inside the castle, and the landing slot is
        // capacity one
        for slot in 0..=castle_steps {
            let slot_space = topo.castle_slot(self.section(), slot as u8);
            if !self.state.board.pegs_at(slot_space).is_empty() {
                return None;
            }
        }

        Some(castle_steps as u8)
    }

    /// Forward advancement for a peg already inside its castle.
    fn castle_advance(&self, from: SpaceId, steps: u8) -> Option<u8> {
        let topo = &self.state.board.topology;
        let space = topo.space(from);
        debug_assert_eq!(space.kind, SpaceKind::Castle);

        let target = space.index as usize + steps as usize;
        if target >= CASTLE_SLOTS {
            return None;
        }
        for slot in (space.index as usize + 1)..=target {
            let slot_space = topo.castle_slot(space.section, slot as u8);
            if !self.state.board.pegs_at(slot_space).is_empty() {
                return None;
            }
        }
        Some(target as u8)
    }

    /// Ace/face: bring a peg out of home, or advance by the fixed value.
    fn come_out_and_advance(&self, value: u8) -> Vec<Move> {
        let topo = &self.state.board.topology;
        let mut moves = Vec::new();

        let come_out = topo.come_out_of(self.section());
        if !self.state.board.has_own_peg(come_out, self.player) {
            for (peg, home) in self.state.board.pegs_by_kind(self.player, SpaceKind::Home) {
                moves.push(self.mk(peg, home, come_out, MoveKind::ComeOut));
            }
        }

        for (peg, from) in self.state.board.pegs_on_track(self.player) {
            if let Some(to) = self.track_landing(from, value, Direction::Forward) {
                moves.push(self.mk(
                    peg,
                    from,
                    to,
                    MoveKind::Advance { steps: value, direction: Direction::Forward },
                ));
            }
        }

        moves
    }

    /// Plain forward movement with castle candidates (numeric, 7, 9).
    fn forward_moves(&self, steps: u8) -> Vec<Move> {
        let topo = &self.state.board.topology;
        let mut moves = Vec::new();

        for (peg, from) in self.state.board.pegs_on_track(self.player) {
            if let Some(to) = self.track_landing(from, steps, Direction::Forward) {
                moves.push(self.mk(
                    peg,
                    from,
                    to,
                    MoveKind::Advance { steps, direction: Direction::Forward },
                ));
            }
            if let Some(slot) = self.castle_candidate(from, steps) {
                let to = topo.castle_slot(self.section(), slot);
                moves.push(self.mk(peg, from, to, MoveKind::CastleEntry { slot }));
            }
        }

        for (peg, from) in self.state.board.pegs_by_kind(self.player, SpaceKind::Castle) {
            if let Some(slot) = self.castle_advance(from, steps) {
                let to = topo.castle_slot(self.section(), slot);
                moves.push(self.mk(peg, from, to, MoveKind::CastleEntry { slot }));
            }
        }

        moves
    }

    /// The 4 moves backward; no castle entry on backward movement.
    fn backward_moves(&self, steps: u8) -> Vec<Move> {
        let mut moves = Vec::new();
        for (peg, from) in self.state.board.pegs_on_track(self.player) {
            if let Some(to) = self.track_landing(from, steps, Direction::Backward) {
                moves.push(self.mk(
                    peg,
                    from,
                    to,
                    MoveKind::Advance { steps, direction: Direction::Backward },
                ));
            }
        }
        moves
    }

    /// Rank 7: plain forward 7, or split legs s / 7-s (1..=6).
    fn seven_moves(&self, mods: &Modifiers) -> Vec<Move> {
        match mods.steps {
            None => self.forward_moves(7),
            Some(steps) if !mods.is_second_move => {
                if !(1..=6).contains(&steps) {
                    return Vec::new();
                }
                self.split_leg_moves(steps, Direction::Forward, SplitLeg::First { remaining: 7 - steps }, None)
            }
            Some(steps) => {
                if !(1..=6).contains(&steps) {
                    return Vec::new();
                }
                self.split_leg_moves(steps, Direction::Forward, SplitLeg::Second, mods.first_move_peg)
            }
        }
    }

    /// Rank 9: plain forward 9, or split legs s / 9-s (1..=8) in opposite
    /// directions.
    fn nine_moves(&self, mods: &Modifiers) -> Vec<Move> {
        match mods.steps {
            None | Some(9) if !mods.is_second_move => self.forward_moves(9),
            Some(steps) => {
                if !(1..=8).contains(&steps) {
                    return Vec::new();
                }
                let Some(direction) = mods.direction else {
                    return Vec::new();
                };
                let leg = if mods.is_second_move {
                    SplitLeg::Second
                } else {
                    SplitLeg::First { remaining: 9 - steps }
                };
                self.split_leg_moves(steps, direction, leg, mods.first_move_peg)
            }
            None => Vec::new(),
        }
    }

    /// One leg of a split: track pegs only, excluding the first-leg peg on
    /// the second leg. Castle candidates only when moving forward.
    fn split_leg_moves(
        &self,
        steps: u8,
        direction: Direction,
        leg: SplitLeg,
        exclude: Option<PegId>,
    ) -> Vec<Move> {
        let topo = &self.state.board.topology;
        let mut moves = Vec::new();

        for (peg, from) in self.state.board.pegs_on_track(self.player) {
            if Some(peg) == exclude {
                continue;
            }

            if let Some(to) = self.track_landing(from, steps, direction) {
                moves.push(self.mk(peg, from, to, leg.kind(steps, direction, None)));
            }
            if direction == Direction::Forward {
                if let Some(slot) = self.castle_candidate(from, steps) {
                    let to = topo.castle_slot(self.section(), slot);
                    moves.push(self.mk(peg, from, to, leg.kind(steps, direction, Some(slot))));
                }
            }
        }

        moves
    }

    /// Joker: teleport any own home/track peg onto a track space occupied
    /// by an opponent peg.
    fn joker_moves(&self) -> Vec<Move> {
        let board = &self.state.board;
        let topo = &board.topology;

        let targets: Vec<SpaceId> = topo
            .all_spaces()
            .filter(|s| s.kind.is_track())
            .filter(|s| !board.opponents_at(s.id, self.player).is_empty())
            .filter(|s| !board.has_own_peg(s.id, self.player))
            .map(|s| s.id)
            .collect();

        if targets.is_empty() {
            return Vec::new();
        }

        let mut movable: Vec<(PegId, SpaceId)> = board.pegs_by_kind(self.player, SpaceKind::Home);
        movable.extend(board.pegs_on_track(self.player));
        movable.sort_by_key(|(peg, _)| *peg);

        let mut moves = Vec::new();
        for (peg, from) in movable {
            for &to in &targets {
                moves.push(self.mk(peg, from, to, MoveKind::JokerCapture));
            }
        }
        moves
    }
}

#[derive(Clone, Copy)]
enum SplitLeg {
    First { remaining: u8 },
    Second,
}

impl SplitLeg {
    fn kind(self, steps: u8, direction: Direction, castle_slot: Option<u8>) -> MoveKind {
        match self {
            SplitLeg::First { remaining } => {
                MoveKind::SplitFirstLeg { steps, direction, remaining, castle_slot }
            }
            SplitLeg::Second => MoveKind::SplitSecondLeg { steps, direction, castle_slot },
        }
    }
}
