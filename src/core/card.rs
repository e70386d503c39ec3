//! Cards, ranks, and deck construction.
//!
//! A standard 54-card deck (52 suited cards plus 2 jokers) per 4 players.
//! Cards are immutable values; they flow hand -> discard pile on use, and
//! the discard pile is reshuffled into the draw pile when it runs dry.
//!
//! ## Movement values
//!
//! - Ace moves 1 (or brings a peg out of home)
//! - Face cards (J, Q, K) move 10 (or bring a peg out of home)
//! - 2, 3, 5, 6, 8, 10 move their printed value forward
//! - 4 moves backward
//! - 7 and 9 may be split across two pegs
//! - Joker teleports onto an opponent-occupied space

use serde::{Deserialize, Serialize};

/// Unique card identifier within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card rank. Jokers have no suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Joker,
}

impl Rank {
    /// All ranks present in one suited run (everything except Joker).
    pub const SUITED: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Is this a face card (J, Q, K)?
    #[must_use]
    pub const fn is_face(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    /// Fixed forward movement value, where one exists.
    ///
    /// Ace = 1, faces = 10, numeric ranks = printed value. The 4 (backward)
    /// and 9 (split) still report their magnitudes; the generator decides
    /// direction and splitting. Jokers have no step value.
    #[must_use]
    pub const fn steps(self) -> Option<u8> {
        match self {
            Rank::Ace => Some(1),
            Rank::Two => Some(2),
            Rank::Three => Some(3),
            Rank::Four => Some(4),
            Rank::Five => Some(5),
            Rank::Six => Some(6),
            Rank::Seven => Some(7),
            Rank::Eight => Some(8),
            Rank::Nine => Some(9),
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => Some(10),
            Rank::Joker => None,
        }
    }

    /// Can this rank bring a peg out of home?
    #[must_use]
    pub const fn can_come_out(self) -> bool {
        matches!(self, Rank::Ace | Rank::Jack | Rank::Queen | Rank::King)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Joker => "Joker",
        };
        f.write_str(s)
    }
}

/// Card suit. `None` on the card itself marks a joker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

/// An immutable card value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub rank: Rank,
    /// `None` for jokers.
    pub suit: Option<Suit>,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(id: CardId, rank: Rank, suit: Option<Suit>) -> Self {
        Self { id, rank, suit }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{} of {:?}", self.rank, suit),
            None => write!(f, "{}", self.rank),
        }
    }
}

/// Build the unshuffled draw pile for a game.
///
/// One 54-card deck per 4 players (rounded up), so 5-card hands can always
/// be dealt and redrawn.
#[must_use]
pub fn build_draw_pile(player_count: usize) -> Vec<Card> {
    let deck_count = player_count.div_ceil(4);
    let mut cards = Vec::with_capacity(deck_count * 54);
    let mut next_id = 0u16;

    for _ in 0..deck_count {
        for suit in Suit::ALL {
            for rank in Rank::SUITED {
                cards.push(Card::new(CardId(next_id), rank, Some(suit)));
                next_id += 1;
            }
        }
        for _ in 0..2 {
            cards.push(Card::new(CardId(next_id), Rank::Joker, None));
            next_id += 1;
        }
    }

    cards
}
