//! Playing cards: suit, rank, colour and the compact 16-bit card code.
//!
//! A `Card` is a small `Copy` value. Its identity is `(deck, suit, rank)`;
//! the face-down flag is orientation, not identity, so two cards that differ
//! only in orientation compare equal and hash the same.
//!
//! ## Card Code Layout
//!
//! ```text
//! bit 15      : face down
//! bits 6..=13 : deck index
//! bits 4..=5  : suit
//! bits 0..=3  : rank (1..=13)
//! ```

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::error::CardCodeError;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All four suits in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Colour of this suit.
    #[must_use]
    pub const fn color(self) -> CardColor {
        match self {
            Suit::Hearts | Suit::Diamonds => CardColor::Red,
            Suit::Clubs | Suit::Spades => CardColor::Black,
        }
    }

    const fn code(self) -> u16 {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }

    const fn from_code(code: u16) -> Self {
        match code & 0b11 {
            0 => Suit::Hearts,
            1 => Suit::Diamonds,
            2 => Suit::Clubs,
            _ => Suit::Spades,
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Suit::Hearts => "H",
            Suit::Diamonds => "D",
            Suit::Clubs => "C",
            Suit::Spades => "S",
        };
        f.write_str(s)
    }
}

/// Card colour, a pure function of suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    Red,
    Black,
}

/// Map a suit to its colour.
#[must_use]
pub const fn suit_color(suit: Suit) -> CardColor {
    suit.color()
}

/// Card rank, Ace (1) through King (13).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
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
}

impl Rank {
    /// All thirteen ranks, Ace first.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
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
    ];

    /// Numeric value (Ace = 1, King = 13).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Rank for a numeric value, `None` outside `1..=13`.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        if value >= 1 && value <= 13 {
            Some(Self::ALL[(value - 1) as usize])
        } else {
            None
        }
    }

    /// The rank one above this one. King wraps to Ace only when `wrap` is set.
    #[must_use]
    pub const fn next(self, wrap: bool) -> Option<Self> {
        match self {
            Rank::King if wrap => Some(Rank::Ace),
            Rank::King => None,
            _ => Self::from_value(self.value() + 1),
        }
    }

    /// The rank one below this one. Ace wraps to King only when `wrap` is set.
    #[must_use]
    pub const fn prev(self, wrap: bool) -> Option<Self> {
        match self {
            Rank::Ace if wrap => Some(Rank::King),
            Rank::Ace => None,
            _ => Self::from_value(self.value() - 1),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Ace => f.write_str("A"),
            Rank::Jack => f.write_str("J"),
            Rank::Queen => f.write_str("Q"),
            Rank::King => f.write_str("K"),
            other => write!(f, "{}", other.value()),
        }
    }
}

/// A playing card.
///
/// Equality and hashing use `(deck, suit, rank)` only.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    /// Which deck this card came from when several decks are combined.
    pub deck: u8,
    pub face_down: bool,
}

impl Card {
    const RANK_MASK: u16 = 0x000F;
    const SUIT_SHIFT: u16 = 4;
    const DECK_SHIFT: u16 = 6;
    const FACE_DOWN_BIT: u16 = 1 << 15;

    /// Create a face-up card from deck 0.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            deck: 0,
            face_down: false,
        }
    }

    /// Set the deck index.
    #[must_use]
    pub const fn from_deck(mut self, deck: u8) -> Self {
        self.deck = deck;
        self
    }

    /// Return this card turned face down.
    #[must_use]
    pub const fn turned_down(mut self) -> Self {
        self.face_down = true;
        self
    }

    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        !self.face_down
    }

    pub fn flip_up(&mut self) {
        self.face_down = false;
    }

    pub fn flip_down(&mut self) {
        self.face_down = true;
    }

    #[must_use]
    pub const fn color(&self) -> CardColor {
        self.suit.color()
    }

    /// Pack into the 16-bit card code.
    #[must_use]
    pub const fn encode(&self) -> u16 {
        let mut code = self.rank.value() as u16;
        code |= self.suit.code() << Self::SUIT_SHIFT;
        code |= (self.deck as u16) << Self::DECK_SHIFT;
        if self.face_down {
            code |= Self::FACE_DOWN_BIT;
        }
        code
    }

    /// Unpack a 16-bit card code.
    pub fn decode(code: u16) -> Result<Self, CardCodeError> {
        let rank = Rank::from_value((code & Self::RANK_MASK) as u8).ok_or(CardCodeError { code })?;
        Ok(Self {
            suit: Suit::from_code(code >> Self::SUIT_SHIFT),
            rank,
            deck: ((code >> Self::DECK_SHIFT) & 0xFF) as u8,
            face_down: code & Self::FACE_DOWN_BIT != 0,
        })
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.deck == other.deck && self.suit == other.suit && self.rank == other.rank
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.deck.hash(hasher);
        self.suit.hash(hasher);
        self.rank.hash(hasher);
    }
}

impl From<Card> for u16 {
    fn from(card: Card) -> Self {
        card.encode()
    }
}

impl TryFrom<u16> for Card {
    type Error = CardCodeError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Card::decode(code)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.face_down {
            write!(f, "[{}{}]", self.rank, self.suit)
        } else {
            write!(f, "{}{}", self.rank, self.suit)
        }
    }
}
