//! Game-level state: the tableau plus the randomness and rules it is
//! played with.
//!
//! `GameState` is the engine's public surface. Every operation either
//! fully applies or leaves the state untouched and reports `false`.
//! Index arguments are 0-based (columns 0..7, foundations 0..4); passing
//! an index outside those ranges is a caller bug and panics.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::card::Card;
use crate::config::RuleSet;
use crate::deck::Deck;
use crate::moves::{Move, legal_moves};
use crate::save::{self, SaveError};
use crate::tableau::{NUM_COLS, NUM_FOUNDATIONS, Tableau};

#[derive(Clone, Debug)]
pub struct GameState {
    tableau: Tableau,
    rng: StdRng,
    rules: RuleSet,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A shuffled, not yet dealt game seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A shuffled, not yet dealt game with a reproducible shuffle.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(mut rng: StdRng) -> Self {
        let deck = Deck::shuffled(&mut rng);
        GameState {
            tableau: Tableau::with_deck(deck),
            rng,
            rules: RuleSet::default(),
        }
    }

    /// A not yet dealt game using `deck` exactly as given.
    ///
    /// `reset` still draws a fresh random deck; `rng` feeds that and any
    /// reshuffles.
    pub fn from_deck(deck: Deck, rng: StdRng) -> Self {
        GameState {
            tableau: Tableau::with_deck(deck),
            rng,
            rules: RuleSet::default(),
        }
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// Deal the deck into the columns. Expects a full, undealt deck.
    pub fn start(&mut self) {
        self.tableau.deal();
        info!(deck_left = self.tableau.deck.len(), "dealt a new game");
    }

    /// Clear the table, shuffle a fresh deck and deal it.
    pub fn reset(&mut self) {
        let deck = Deck::shuffled(&mut self.rng);
        self.tableau = Tableau::with_deck(deck);
        self.start();
    }

    pub fn draw_card(&mut self) -> bool {
        self.apply_move(Move::Draw)
    }

    /// Turn the pile back into the deck once the deck is exhausted.
    pub fn reshuffle_pile(&mut self) -> bool {
        self.apply_move(Move::Reshuffle)
    }

    pub fn column(&self, index: usize) -> &[Card] {
        assert!(index < NUM_COLS, "column index {index} out of range");
        self.tableau.column(index)
    }

    /// The most recently drawn card.
    pub fn current_card(&self) -> Option<Card> {
        self.tableau.current
    }

    pub fn reserve_slot(&self, slot: usize) -> Option<Card> {
        assert!(slot < NUM_FOUNDATIONS, "reserve slot {slot} out of range");
        self.tableau.reserve_slot(slot)
    }

    pub fn set_reserve_slot(&mut self, slot: usize, card: Option<Card>) {
        assert!(slot < NUM_FOUNDATIONS, "reserve slot {slot} out of range");
        self.tableau.set_reserve_slot(slot, card);
    }

    pub fn pile(&self) -> &[Card] {
        &self.tableau.pile
    }

    pub fn deck(&self) -> &Deck {
        &self.tableau.deck
    }

    pub fn is_deck_empty(&self) -> bool {
        self.tableau.deck.is_empty()
    }

    pub fn card_count(&self) -> usize {
        self.tableau.card_count()
    }

    pub fn move_card(&mut self, from: usize, to: usize, count: usize) -> bool {
        assert!(from < NUM_COLS, "column index {from} out of range");
        assert!(to < NUM_COLS, "column index {to} out of range");
        let count = count.min(u8::MAX as usize) as u8;
        self.apply_move(Move::ColumnToColumn {
            from: from as u8,
            to: to as u8,
            count,
        })
    }

    pub fn move_from_pile_to_column(&mut self, to: usize) -> bool {
        assert!(to < NUM_COLS, "column index {to} out of range");
        self.apply_move(Move::PileToColumn { to: to as u8 })
    }

    pub fn move_from_pile_to_reserve(&mut self, slot: usize) -> bool {
        assert!(slot < NUM_FOUNDATIONS, "reserve slot {slot} out of range");
        self.apply_move(Move::PileToReserve { slot: slot as u8 })
    }

    pub fn move_from_column_to_reserve(&mut self, from: usize, slot: usize) -> bool {
        assert!(from < NUM_COLS, "column index {from} out of range");
        assert!(slot < NUM_FOUNDATIONS, "reserve slot {slot} out of range");
        self.apply_move(Move::ColumnToReserve {
            from: from as u8,
            slot: slot as u8,
        })
    }

    pub fn move_from_reserve_to_column(&mut self, slot: usize, to: usize) -> bool {
        assert!(slot < NUM_FOUNDATIONS, "reserve slot {slot} out of range");
        assert!(to < NUM_COLS, "column index {to} out of range");
        self.apply_move(Move::ReserveToColumn {
            slot: slot as u8,
            to: to as u8,
        })
    }

    /// Apply a move if the rules allow it.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        let applied = mv.apply(&mut self.tableau, &self.rules, &mut self.rng);
        if applied {
            debug!(?mv, "move applied");
        } else {
            debug!(?mv, "move rejected");
        }
        applied
    }

    /// Everything the player could do right now.
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.tableau, &self.rules)
    }

    pub fn is_game_won(&self) -> bool {
        self.tableau.is_won(self.rules.win)
    }

    /// Write the game to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), SaveError> {
        save::write_save(path, &self.tableau)?;
        info!(path = %path.display(), "game saved");
        Ok(())
    }

    /// Replace the game with the one stored at `path`. On any error the
    /// current game is left exactly as it was.
    pub fn load_from(&mut self, path: &Path) -> Result<(), SaveError> {
        let tableau = save::read_save(path)?;
        self.tableau = tableau;
        info!(path = %path.display(), "game loaded");
        Ok(())
    }

    /// Save as `<name>.sot` in the working directory.
    pub fn save_file_game(&self, name: &str) -> bool {
        let result = save::save_path(Path::new("."), name).and_then(|p| self.save_to(&p));
        if let Err(e) = &result {
            warn!(error = %e, "save failed");
        }
        result.is_ok()
    }

    /// Load `<name>.sot` from the working directory.
    pub fn read_file_game(&mut self, name: &str) -> bool {
        let result = save::save_path(Path::new("."), name).and_then(|p| self.load_from(&p));
        if let Err(e) = &result {
            warn!(error = %e, "load failed");
        }
        result.is_ok()
    }
}
