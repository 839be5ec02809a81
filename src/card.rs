//! Card, Suit, and Rank types for a standard 52-card deck.
//!
//! - `Suit` and `Rank` carry the ordinals used by the save format and by
//!   the foundation slots (slot index == suit ordinal).
//! - `Card` is a small `Copy` value: identity plus face orientation.
//!   "No card" is `Option<Card>::None` wherever a slot may be empty.

use core::fmt;

/// Number of suits in a standard deck.
pub const NUM_SUITS: u8 = 4;
/// Number of ranks in a standard deck.
pub const NUM_RANKS: u8 = 13;
/// Number of cards in a standard deck.
pub const CARDS_PER_DECK: u8 = NUM_SUITS * NUM_RANKS;

/// The four suits, in slot/wire order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Suit {
    Hearts = 0,
    Diamonds = 1,
    Clubs = 2,
    Spades = 3,
}

/// The thirteen ranks. Ace is low and numbered 1, King is 13.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
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
    King, // 13
}

/// A playing card with its current facing.
///
/// Two cards compare equal only if suit, rank *and* facing match; use
/// [`Card::same_identity`] to ignore the facing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Card {
    suit: Suit,
    rank: Rank,
    face_up: bool,
}

impl Card {
    /// Create a new face-down card.
    #[inline]
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card {
            suit,
            rank,
            face_up: false,
        }
    }

    /// Create a new face-up card.
    #[inline]
    pub fn face_up(suit: Suit, rank: Rank) -> Self {
        Card {
            suit,
            rank,
            face_up: true,
        }
    }

    #[inline]
    pub fn suit(self) -> Suit {
        self.suit
    }

    #[inline]
    pub fn rank(self) -> Rank {
        self.rank
    }

    /// Rank number in 1..=13 (Ace=1, King=13).
    #[inline]
    pub fn rank_number(self) -> u8 {
        self.rank.number()
    }

    #[inline]
    pub fn is_face_up(self) -> bool {
        self.face_up
    }

    /// Turn the card over: face-down becomes face-up and vice versa.
    #[inline]
    pub fn flip(&mut self) {
        self.face_up = !self.face_up;
    }

    /// Hearts and Diamonds are red; Clubs and Spades are black.
    #[inline]
    pub fn is_red(self) -> bool {
        self.suit.is_red()
    }

    #[inline]
    pub fn is_suit(self, suit: Suit) -> bool {
        self.suit == suit
    }

    #[inline]
    pub fn is_rank(self, rank: Rank) -> bool {
        self.rank == rank
    }

    /// True if both cards are the same suit and rank, whatever their facing.
    #[inline]
    pub fn same_identity(self, other: Card) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }

    /// Short string like "AH", "7C", "TD", "KS".
    pub fn short_str(self) -> String {
        let r = match self.rank {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        };
        let s = self.suit.short_char();
        format!("{r}{s}")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_str())
    }
}

impl Suit {
    /// All suits in slot order.
    pub const ALL: [Suit; NUM_SUITS as usize] =
        [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Construct a suit from its ordinal 0..=3.
    #[inline]
    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    /// Slot / wire ordinal.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    /// Single-character representation: 'H', 'D', 'C', or 'S'.
    #[inline]
    pub fn short_char(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }
}

impl Rank {
    /// All ranks in a fixed, reproducible order (Ace..King).
    pub const ALL: [Rank; NUM_RANKS as usize] = [
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

    /// Construct a rank from its number 1..=13.
    #[inline]
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1..=13 => Some(Self::ALL[v as usize - 1]),
            _ => None,
        }
    }

    /// Rank number in 1..=13 (Ace=1, King=13).
    #[inline]
    pub fn number(self) -> u8 {
        self as u8
    }

    /// The rank one below this one; `None` for Ace.
    #[inline]
    pub fn pred(self) -> Option<Rank> {
        Rank::from_u8(self.number() - 1)
    }
}

/// Helper for tableau rules: can `upper` be placed on `lower`?
///
/// True if `upper` is exactly one rank lower than `lower` and the
/// opposite colour.
#[inline]
pub fn is_one_lower_opposite_color(upper: Card, lower: Card) -> bool {
    upper.rank_number() + 1 == lower.rank_number() && upper.is_red() != lower.is_red()
}

/// Generate a standard 52-card deck in a fixed order, all face-down.
///
/// Suits follow `Suit::ALL` order, and ranks follow `Rank::ALL` order.
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(CARDS_PER_DECK as usize);
    for &suit in Suit::ALL.iter() {
        for &rank in Rank::ALL.iter() {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}
