//! Move representation, the placement rules, and move application.
//!
//! Every mutating operation here is validate-then-apply: a `can_*` check
//! runs first and nothing is touched unless it passes, so a rejected move
//! is always observably a no-op. `legal_moves` enumerates everything the
//! rules currently allow, which the front-end uses for hints.

use rand::Rng;

use crate::card::{Card, Rank, Suit, is_one_lower_opposite_color};
use crate::config::{FoundationRule, RuleSet};
use crate::tableau::{NUM_COLS, NUM_FOUNDATIONS, Tableau};

/// One player action.
///
/// Indices are 0-based internally and printed 1-based for humans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// Turn the top deck card face-up onto the pile.
    Draw,

    /// With the deck empty, turn the pile back into a shuffled deck.
    Reshuffle,

    /// Move the top `count` cards of one column onto another.
    ColumnToColumn { from: u8, to: u8, count: u8 },

    /// Move the top pile card onto a column.
    PileToColumn { to: u8 },

    /// Move the top pile card onto a foundation.
    PileToReserve { slot: u8 },

    /// Move the top card of a column onto a foundation.
    ColumnToReserve { from: u8, slot: u8 },

    /// Take the top card of a foundation back onto a column.
    ReserveToColumn { slot: u8, to: u8 },
}

// ----- Rule predicates -----

/// True if `card` may go on top of `column`.
///
/// An empty column takes only a King. Otherwise the card must be one rank
/// below the column's top card and the opposite colour.
fn can_place_on_column(column: &[Card], card: Card) -> bool {
    match column.last() {
        None => card.rank() == Rank::King,
        Some(&top) => is_one_lower_opposite_color(card, top),
    }
}

/// True if `card` may go onto foundation `slot`, currently at `height`.
///
/// The slot is locked to `Suit::ALL[slot]`; an empty slot takes only the Ace.
fn can_move_to_foundation(slot: usize, height: u8, card: Card, rule: FoundationRule) -> bool {
    if card.suit().index() != slot {
        return false;
    }
    let rank = card.rank_number();
    match (height, rule) {
        (0, _) => rank == Rank::Ace.number(),
        (h, FoundationRule::AnyHigher) => rank > h,
        (h, FoundationRule::Sequential) => rank == h + 1,
    }
}

/// After cards leave a column, a face-down card left on top is turned up.
fn reveal_top(column: &mut [Card]) {
    if let Some(top) = column.last_mut() {
        if !top.is_face_up() {
            top.flip();
        }
    }
}

// ----- Checks and moves on the tableau -----

impl Tableau {
    pub fn can_draw(&self) -> bool {
        !self.deck.is_empty()
    }

    /// Turn the top deck card face-up onto the pile; it becomes the
    /// current card.
    pub fn draw_card(&mut self) -> bool {
        let Some(mut card) = self.deck.draw_card() else {
            return false;
        };
        card.flip();
        self.current = Some(card);
        self.pile.push(card);
        true
    }

    pub fn can_reshuffle(&self) -> bool {
        self.deck.is_empty() && !self.pile.is_empty()
    }

    /// Recycle the pile into the deck. The current card is cleared since
    /// the pile is now empty.
    pub fn reshuffle_pile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.can_reshuffle() {
            return false;
        }
        self.deck.re_shuffle(&mut self.pile, rng);
        self.current = None;
        true
    }

    pub fn can_move_card(&self, from: usize, to: usize, count: usize) -> bool {
        let src = self.column(from);
        if count == 0 || count > src.len() {
            return false;
        }
        let start = src[src.len() - count];
        if !start.is_face_up() {
            return false;
        }
        can_place_on_column(self.column(to), start)
    }

    /// Move the top `count` cards of column `from` onto column `to`,
    /// keeping their order.
    ///
    /// `from == to` is not rejected up front: the run is checked against
    /// the column's own top card, and if that passes the column is left as
    /// it was.
    pub fn move_card(&mut self, from: usize, to: usize, count: usize) -> bool {
        if !self.can_move_card(from, to, count) {
            return false;
        }
        if from != to {
            let split = self.columns[from].len() - count;
            let run = self.columns[from].split_off(split);
            self.columns[to].extend(run);
        }
        reveal_top(&mut self.columns[from]);
        true
    }

    pub fn can_move_from_pile_to_column(&self, to: usize) -> bool {
        self.pile_top()
            .is_some_and(|card| can_place_on_column(self.column(to), card))
    }

    pub fn move_from_pile_to_column(&mut self, to: usize) -> bool {
        if !self.can_move_from_pile_to_column(to) {
            return false;
        }
        if let Some(card) = self.pile.pop() {
            self.columns[to].push(card);
        }
        true
    }

    pub fn can_move_from_pile_to_reserve(&self, slot: usize, rule: FoundationRule) -> bool {
        debug_assert!(slot < NUM_FOUNDATIONS, "reserve slot {slot} out of range");
        self.pile_top()
            .is_some_and(|card| can_move_to_foundation(slot, self.foundations[slot], card, rule))
    }

    /// Put the top pile card on a foundation. The foundation keeps only
    /// its new height; the card it covered is not tracked separately.
    pub fn move_from_pile_to_reserve(&mut self, slot: usize, rule: FoundationRule) -> bool {
        if !self.can_move_from_pile_to_reserve(slot, rule) {
            return false;
        }
        if let Some(card) = self.pile.pop() {
            self.foundations[slot] = card.rank_number();
        }
        true
    }

    pub fn can_move_from_column_to_reserve(
        &self,
        from: usize,
        slot: usize,
        rule: FoundationRule,
    ) -> bool {
        debug_assert!(slot < NUM_FOUNDATIONS, "reserve slot {slot} out of range");
        self.column_top(from).is_some_and(|card| {
            card.is_face_up() && can_move_to_foundation(slot, self.foundations[slot], card, rule)
        })
    }

    pub fn move_from_column_to_reserve(
        &mut self,
        from: usize,
        slot: usize,
        rule: FoundationRule,
    ) -> bool {
        if !self.can_move_from_column_to_reserve(from, slot, rule) {
            return false;
        }
        if let Some(card) = self.columns[from].pop() {
            self.foundations[slot] = card.rank_number();
        }
        reveal_top(&mut self.columns[from]);
        true
    }

    pub fn can_move_from_reserve_to_column(&self, slot: usize, to: usize) -> bool {
        self.reserve_slot(slot)
            .is_some_and(|card| can_place_on_column(self.column(to), card))
    }

    /// Take a foundation's top card back onto a column. The foundation
    /// drops one rank, or becomes empty when an Ace leaves.
    pub fn move_from_reserve_to_column(&mut self, slot: usize, to: usize) -> bool {
        if !self.can_move_from_reserve_to_column(slot, to) {
            return false;
        }
        if let Some(card) = self.reserve_slot(slot) {
            self.columns[to].push(card);
            self.foundations[slot] = card.rank().pred().map_or(0, Rank::number);
        }
        true
    }
}

// ----- Move dispatch -----

impl Move {
    /// Check this move against the current tableau without changing it.
    pub fn is_legal(self, tab: &Tableau, rules: &RuleSet) -> bool {
        match self {
            Move::Draw => tab.can_draw(),
            Move::Reshuffle => tab.can_reshuffle(),
            Move::ColumnToColumn { from, to, count } => {
                tab.can_move_card(from as usize, to as usize, count as usize)
            }
            Move::PileToColumn { to } => tab.can_move_from_pile_to_column(to as usize),
            Move::PileToReserve { slot } => {
                tab.can_move_from_pile_to_reserve(slot as usize, rules.foundation)
            }
            Move::ColumnToReserve { from, slot } => {
                tab.can_move_from_column_to_reserve(from as usize, slot as usize, rules.foundation)
            }
            Move::ReserveToColumn { slot, to } => {
                tab.can_move_from_reserve_to_column(slot as usize, to as usize)
            }
        }
    }

    /// Apply this move if it is legal. Returns whether it was applied.
    pub fn apply<R: Rng + ?Sized>(self, tab: &mut Tableau, rules: &RuleSet, rng: &mut R) -> bool {
        match self {
            Move::Draw => tab.draw_card(),
            Move::Reshuffle => tab.reshuffle_pile(rng),
            Move::ColumnToColumn { from, to, count } => {
                tab.move_card(from as usize, to as usize, count as usize)
            }
            Move::PileToColumn { to } => tab.move_from_pile_to_column(to as usize),
            Move::PileToReserve { slot } => {
                tab.move_from_pile_to_reserve(slot as usize, rules.foundation)
            }
            Move::ColumnToReserve { from, slot } => {
                tab.move_from_column_to_reserve(from as usize, slot as usize, rules.foundation)
            }
            Move::ReserveToColumn { slot, to } => {
                tab.move_from_reserve_to_column(slot as usize, to as usize)
            }
        }
    }

    /// Render a move as a human-readable string, using the tableau to name
    /// the cards involved. Meant to be called before the move is applied.
    pub fn describe(self, tab: &Tableau) -> String {
        let card_or = |c: Option<Card>| c.map_or_else(|| "--".to_string(), Card::short_str);
        match self {
            Move::Draw => "Draw from the deck".to_string(),
            Move::Reshuffle => "Reshuffle the pile into the deck".to_string(),
            Move::ColumnToColumn { from, to, count } => {
                let col = tab.column(from as usize);
                let count = (count as usize).min(col.len());
                if count <= 1 {
                    format!(
                        "Column {}: {} -> Column {}",
                        from + 1,
                        card_or(col.last().copied()),
                        to + 1
                    )
                } else {
                    format!(
                        "Column {}: {}..{} -> Column {}",
                        from + 1,
                        col[col.len() - count],
                        col[col.len() - 1],
                        to + 1
                    )
                }
            }
            Move::PileToColumn { to } => {
                format!("Pile: {} -> Column {}", card_or(tab.pile_top()), to + 1)
            }
            Move::PileToReserve { slot } => format!(
                "Pile: {} -> Foundation({:?})",
                card_or(tab.pile_top()),
                Suit::ALL[slot as usize]
            ),
            Move::ColumnToReserve { from, slot } => format!(
                "Column {}: {} -> Foundation({:?})",
                from + 1,
                card_or(tab.column_top(from as usize)),
                Suit::ALL[slot as usize]
            ),
            Move::ReserveToColumn { slot, to } => format!(
                "Foundation({:?}): {} -> Column {}",
                Suit::ALL[slot as usize],
                card_or(tab.reserve_slot(slot as usize)),
                to + 1
            ),
        }
    }
}

// ----- Move generation -----

/// Generate all legal moves from the given tableau.
///
/// Moves that cannot change the position are left out: a column onto
/// itself, and a whole column moved onto another empty column.
///
/// Order: foundation moves, column moves, pile moves, foundation
/// withdrawals, then draw / reshuffle.
pub fn legal_moves(tab: &Tableau, rules: &RuleSet) -> Vec<Move> {
    let mut moves = Vec::new();

    // Column -> Foundation and Pile -> Foundation. Only the slot matching
    // the card's suit can ever accept it.
    for from in 0..NUM_COLS {
        if let Some(card) = tab.column_top(from) {
            let mv = Move::ColumnToReserve {
                from: from as u8,
                slot: card.suit().index() as u8,
            };
            if mv.is_legal(tab, rules) {
                moves.push(mv);
            }
        }
    }
    if let Some(card) = tab.pile_top() {
        let mv = Move::PileToReserve {
            slot: card.suit().index() as u8,
        };
        if mv.is_legal(tab, rules) {
            moves.push(mv);
        }
    }

    // Column -> Column, every face-up run length.
    for from in 0..NUM_COLS {
        let src_len = tab.column(from).len();
        for count in 1..=src_len {
            for to in 0..NUM_COLS {
                if to == from {
                    continue;
                }
                if count == src_len && tab.column(to).is_empty() {
                    continue;
                }
                let mv = Move::ColumnToColumn {
                    from: from as u8,
                    to: to as u8,
                    count: count as u8,
                };
                if mv.is_legal(tab, rules) {
                    moves.push(mv);
                }
            }
        }
    }

    // Pile -> Column
    for to in 0..NUM_COLS {
        let mv = Move::PileToColumn { to: to as u8 };
        if mv.is_legal(tab, rules) {
            moves.push(mv);
        }
    }

    // Foundation -> Column
    for slot in 0..NUM_FOUNDATIONS {
        for to in 0..NUM_COLS {
            let mv = Move::ReserveToColumn {
                slot: slot as u8,
                to: to as u8,
            };
            if mv.is_legal(tab, rules) {
                moves.push(mv);
            }
        }
    }

    // Deck moves
    if Move::Draw.is_legal(tab, rules) {
        moves.push(Move::Draw);
    } else if Move::Reshuffle.is_legal(tab, rules) {
        moves.push(Move::Reshuffle);
    }

    moves
}

// ----- Tests -----
