//! The full table layout: draw deck, seven columns, discard pile, four
//! foundations, and the most recently drawn card.
//!
//! Columns and the pile are stored bottom -> top, so the playable card is
//! always the last element. Foundations are compressed to a height per
//! suit: 0 means empty, N means the Ace..N run of that suit is there.

use crate::card::{Card, CARDS_PER_DECK, NUM_RANKS, Rank, Suit};
use crate::config::WinRule;
use crate::deck::Deck;

/// Number of tableau columns.
pub const NUM_COLS: usize = 7;
/// Number of foundation (reserve) slots, one per suit.
pub const NUM_FOUNDATIONS: usize = 4;
/// Cards dealt into the columns by `deal`: 1 + 2 + ... + 7.
pub const DEALT_CARDS: usize = NUM_COLS * (NUM_COLS + 1) / 2;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tableau {
    pub deck: Deck,
    pub columns: [Vec<Card>; NUM_COLS],
    pub pile: Vec<Card>,
    pub foundations: [u8; NUM_FOUNDATIONS],
    pub current: Option<Card>,
}

impl Tableau {
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// A tableau holding `deck` and nothing else. Call `deal` to lay it out.
    pub fn with_deck(deck: Deck) -> Self {
        Tableau {
            deck,
            ..Self::default()
        }
    }

    /// Deal from the deck into the columns: column `i` gets `i + 1` cards,
    /// all face-down except the last one dealt.
    ///
    /// Expects a full deck and empty columns.
    pub fn deal(&mut self) {
        debug_assert_eq!(self.deck.len(), CARDS_PER_DECK as usize);
        debug_assert!(self.columns.iter().all(|c| c.is_empty()));

        for (i, column) in self.columns.iter_mut().enumerate() {
            for _ in 0..=i {
                if let Some(card) = self.deck.draw_card() {
                    column.push(card);
                }
            }
            if let Some(top) = column.last_mut() {
                top.flip();
            }
        }
    }

    /// Column `index`, bottom -> top.
    pub fn column(&self, index: usize) -> &[Card] {
        debug_assert!(index < NUM_COLS, "column index {index} out of range");
        &self.columns[index]
    }

    /// Top card of a column, if any.
    pub fn column_top(&self, index: usize) -> Option<Card> {
        self.column(index).last().copied()
    }

    pub fn pile_top(&self) -> Option<Card> {
        self.pile.last().copied()
    }

    /// The foundation's current top card, face-up, or `None` if empty.
    pub fn reserve_slot(&self, slot: usize) -> Option<Card> {
        debug_assert!(slot < NUM_FOUNDATIONS, "reserve slot {slot} out of range");
        let suit = Suit::ALL[slot];
        Rank::from_u8(self.foundations[slot]).map(|rank| Card::face_up(suit, rank))
    }

    /// Overwrite a foundation. The card must belong to the slot's suit.
    ///
    /// Foundations only remember a height, so the card's facing is not
    /// kept; `reserve_slot` always hands back a face-up card.
    pub fn set_reserve_slot(&mut self, slot: usize, card: Option<Card>) {
        debug_assert!(slot < NUM_FOUNDATIONS, "reserve slot {slot} out of range");
        debug_assert!(
            card.is_none_or(|c| c.suit().index() == slot),
            "card of the wrong suit for reserve slot {slot}"
        );
        self.foundations[slot] = card.map_or(0, Card::rank_number);
    }

    /// Cards accounted for anywhere on the table, counting each foundation
    /// by its height.
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.columns.iter().map(Vec::len).sum::<usize>()
            + self.pile.len()
            + self.foundations.iter().map(|&h| h as usize).sum::<usize>()
    }

    /// True if `column` holds exactly a King..Ace run, all face-up, with the
    /// colour alternating at every step.
    pub fn is_complete_run(column: &[Card]) -> bool {
        if column.len() != NUM_RANKS as usize {
            return false;
        }
        for (j, card) in column.iter().enumerate() {
            let expected = NUM_RANKS - j as u8;
            if card.rank_number() != expected || !card.is_face_up() {
                return false;
            }
            if j > 0 && card.is_red() == column[j - 1].is_red() {
                return false;
            }
        }
        true
    }

    pub fn complete_run_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| Self::is_complete_run(c))
            .count()
    }

    pub fn foundations_complete(&self) -> bool {
        self.foundations.iter().all(|&h| h == NUM_RANKS)
    }

    pub fn is_won(&self, rule: WinRule) -> bool {
        let runs = self.complete_run_count() == NUM_FOUNDATIONS;
        match rule {
            WinRule::CompleteRuns => runs,
            WinRule::RunsOrFoundations => runs || self.foundations_complete(),
        }
    }
}
