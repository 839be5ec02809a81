//! Binary save format.
//!
//! # Layout
//!
//! All integers are little-endian `i32`, booleans are one byte (0 or 1).
//!
//! ```text
//! "Solitaire"                       9-byte magic, no terminator
//! deck_count   deck_count   x Card  bottom -> top
//! 7 x { count  count        x Card} columns, bottom -> top
//! pile_count   pile_count   x Card  bottom -> top
//! 4 x Card                          foundations, no count prefix
//!
//! Card = suit:i32 rank:i32 face_up:bool valid:bool
//! ```
//!
//! An empty foundation is written as an invalid card with zero suit and
//! rank. The current card is not stored; after decoding it is the pile top.

use bytes::{Buf, BufMut};
use thiserror::Error;

use crate::card::{CARDS_PER_DECK, Card, Rank, Suit};
use crate::tableau::{NUM_COLS, NUM_FOUNDATIONS, Tableau};

/// File signature.
pub const MAGIC: &[u8; 9] = b"Solitaire";

/// Encoded size of one card.
pub const CARD_LEN: usize = 4 + 4 + 1 + 1;

/// Upper bound on any section count; no pile can hold more than a deck.
const MAX_SECTION: i32 = CARDS_PER_DECK as i32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("not a solitaire save: bad magic number")]
    BadMagic,

    #[error("unexpected end of data: needed {needed} bytes, {available} left")]
    Truncated { needed: usize, available: usize },

    #[error("invalid {section} count {count}")]
    InvalidCount { section: &'static str, count: i32 },

    #[error("invalid suit {0}")]
    InvalidSuit(i32),

    #[error("invalid rank {0}")]
    InvalidRank(i32),

    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),

    #[error("empty card slot inside the {section}")]
    MissingCard { section: &'static str },

    #[error("foundation {slot} holds {card}, expected a face-up {expected:?} card")]
    InvalidReserve {
        slot: usize,
        card: Card,
        expected: Suit,
    },
}

pub type CodecResult<T> = Result<T, CodecError>;

fn ensure(buf: &impl Buf, needed: usize) -> CodecResult<()> {
    let available = buf.remaining();
    if available < needed {
        return Err(CodecError::Truncated { needed, available });
    }
    Ok(())
}

fn read_bool(buf: &mut impl Buf) -> CodecResult<bool> {
    match buf.get_u8() {
        0 => Ok(false),
        1 => Ok(true),
        b => Err(CodecError::InvalidBool(b)),
    }
}

/// Write one card record; `None` is written as an invalid card.
pub fn write_card(card: Option<Card>, buf: &mut impl BufMut) {
    match card {
        Some(c) => {
            buf.put_i32_le(c.suit() as i32);
            buf.put_i32_le(c.rank_number() as i32);
            buf.put_u8(c.is_face_up() as u8);
            buf.put_u8(1);
        }
        None => {
            buf.put_i32_le(0);
            buf.put_i32_le(0);
            buf.put_u8(0);
            buf.put_u8(0);
        }
    }
}

/// Read one card record; an invalid card reads as `None` and its suit and
/// rank fields are ignored.
pub fn read_card(buf: &mut impl Buf) -> CodecResult<Option<Card>> {
    ensure(buf, CARD_LEN)?;
    let suit = buf.get_i32_le();
    let rank = buf.get_i32_le();
    let face_up = read_bool(buf)?;
    let valid = read_bool(buf)?;
    if !valid {
        return Ok(None);
    }

    let suit = u8::try_from(suit)
        .ok()
        .and_then(Suit::from_u8)
        .ok_or(CodecError::InvalidSuit(suit))?;
    let rank = u8::try_from(rank)
        .ok()
        .and_then(Rank::from_u8)
        .ok_or(CodecError::InvalidRank(rank))?;

    let mut card = Card::new(suit, rank);
    if face_up {
        card.flip();
    }
    Ok(Some(card))
}

fn write_section(cards: &[Card], buf: &mut impl BufMut) {
    buf.put_i32_le(cards.len() as i32);
    for &card in cards {
        write_card(Some(card), buf);
    }
}

fn read_section(buf: &mut impl Buf, section: &'static str) -> CodecResult<Vec<Card>> {
    ensure(buf, 4)?;
    let count = buf.get_i32_le();
    if !(0..=MAX_SECTION).contains(&count) {
        return Err(CodecError::InvalidCount { section, count });
    }
    let count = count as usize;
    ensure(buf, count * CARD_LEN)?;

    let mut cards = Vec::with_capacity(count);
    for _ in 0..count {
        let card = read_card(buf)?.ok_or(CodecError::MissingCard { section })?;
        cards.push(card);
    }
    Ok(cards)
}

/// Append the full save image of `tab` to `buf`.
pub fn encode_tableau(tab: &Tableau, buf: &mut impl BufMut) {
    buf.put_slice(MAGIC);
    write_section(tab.deck.cards(), buf);
    for column in &tab.columns {
        write_section(column, buf);
    }
    write_section(&tab.pile, buf);
    for slot in 0..NUM_FOUNDATIONS {
        write_card(tab.reserve_slot(slot), buf);
    }
}

/// Encode `tab` into a fresh byte vector.
pub fn encode_to_vec(tab: &Tableau) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(tab));
    encode_tableau(tab, &mut buf);
    buf
}

/// Exact number of bytes `encode_tableau` writes for `tab`.
pub fn encoded_len(tab: &Tableau) -> usize {
    let cards = tab.deck.len() + tab.columns.iter().map(Vec::len).sum::<usize>() + tab.pile.len();
    MAGIC.len() + 4 * (NUM_COLS + 2) + (cards + NUM_FOUNDATIONS) * CARD_LEN
}

/// Decode a save image into a new tableau.
///
/// Nothing outside the returned value is touched, so a failed decode
/// leaves any existing game untouched.
pub fn decode_tableau(buf: &mut impl Buf) -> CodecResult<Tableau> {
    ensure(buf, MAGIC.len())?;
    let mut magic = [0u8; 9];
    buf.copy_to_slice(&mut magic);
    if &magic != MAGIC {
        return Err(CodecError::BadMagic);
    }

    let mut tab = Tableau::new_empty();
    tab.deck = crate::deck::Deck::from_cards(read_section(buf, "deck")?);
    for column in tab.columns.iter_mut() {
        *column = read_section(buf, "column")?;
    }
    tab.pile = read_section(buf, "pile")?;

    for slot in 0..NUM_FOUNDATIONS {
        let expected = Suit::ALL[slot];
        if let Some(card) = read_card(buf)? {
            if card.suit() != expected || !card.is_face_up() {
                return Err(CodecError::InvalidReserve {
                    slot,
                    card,
                    expected,
                });
            }
            tab.foundations[slot] = card.rank_number();
        }
    }

    tab.current = tab.pile_top();
    Ok(tab)
}
