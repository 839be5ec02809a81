//! Numbered deals compatible with PySolFC game numbers.
//!
//! PySolFC builds its 52 cards suit-major (Clubs, Spades, Hearts, Diamonds)
//! with ranks Ace..King, then shuffles them with one of two generators:
//!
//!   * `msNNNN` deals and plain numbers below 32000 use LCRandom31, the
//!     Microsoft FreeCell generator.
//!   * every other number seeds CPython's MT19937 (`random.Random`), which
//!     accepts arbitrarily large integers.
//!
//! The shuffled list is the talon with its top at the end, which is the
//! same convention `Deck` uses, so the order is kept as is.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use thiserror::Error;

use crate::card::{CARDS_PER_DECK, Card, Rank, Suit};
use crate::deck::Deck;

/// PySolFC's suit order mapped onto ours.
const PYSOL_SUITS: [Suit; 4] = [Suit::Clubs, Suit::Spades, Suit::Hearts, Suit::Diamonds];

/// Numbers below this use LCRandom31 even without the `ms` prefix.
const LC_THRESHOLD: u32 = 32000;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DealError {
    #[error("empty game number")]
    Empty,
    #[error("game number {0:?} contains non-digits")]
    NotANumber(String),
    #[error("ms game number {0} out of range 1..=8589934591")]
    MsOutOfRange(u64),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum GameNumber {
    Ms(u64),
    Big(BigUint),
}

/// Build the deck PySolFC would deal for `game`.
///
/// Accepts `"ms12345"`, plain numbers like `"13101775566348840960"`, and the
/// punctuated forms PySolFC prints (`"#1,310-177"`, a trailing `L`).
pub fn deck_from_game_number(game: &str) -> Result<Deck, DealError> {
    let number = parse_game_number(game)?;

    let mut cards: Vec<Card> = PYSOL_SUITS
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(suit, rank)))
        .collect();
    debug_assert_eq!(cards.len(), CARDS_PER_DECK as usize);

    match number {
        GameNumber::Ms(n) => LcRandom31::new(n)?.shuffle(&mut cards),
        GameNumber::Big(n) => match n.to_u64() {
            Some(small) if small < u64::from(LC_THRESHOLD) => {
                LcRandom31::new(small)?.shuffle(&mut cards)
            }
            _ => Mt19937::from_big(&n).shuffle(&mut cards),
        },
    }

    Ok(Deck::from_cards(cards))
}

fn parse_game_number(raw: &str) -> Result<GameNumber, DealError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('L').unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '#' | '-' | '_' | '.' | ','))
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if cleaned.is_empty() {
        return Err(DealError::Empty);
    }

    let (digits, ms) = match cleaned.strip_prefix("ms") {
        Some(rest) => (rest, true),
        None => (cleaned.as_str(), false),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DealError::NotANumber(raw.to_string()));
    }

    let big = BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| DealError::NotANumber(raw.to_string()))?;
    if ms {
        let n = big.to_u64().ok_or(DealError::MsOutOfRange(u64::MAX))?;
        Ok(GameNumber::Ms(n))
    } else {
        Ok(GameNumber::Big(big))
    }
}

/// PySolFC's `RandomBase.shuffle`: Fisher-Yates from the back using
/// `randint(0, i)`.
trait TalonShuffle {
    fn randint(&mut self, hi: usize) -> usize;

    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.randint(i);
            items.swap(i, j);
        }
    }
}

struct LcRandom31 {
    seed: u64,
    state: u64,
}

impl LcRandom31 {
    const MAX_SEED: u64 = (1 << 33) - 1;

    fn new(seed: u64) -> Result<Self, DealError> {
        if !(1..=Self::MAX_SEED).contains(&seed) {
            return Err(DealError::MsOutOfRange(seed));
        }
        let state = if seed < 1 << 32 { seed } else { seed - (1 << 32) };
        Ok(LcRandom31 { seed, state })
    }

    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(214013).wrapping_add(2531011) & Self::MAX_SEED;
        self.state >> 16
    }

    fn random(&mut self) -> u64 {
        if self.seed < 1 << 31 {
            self.step() & 0x7fff
        } else if self.seed < 1 << 32 {
            (self.step() & 0x7fff) | 0x8000
        } else {
            (self.step() & 0xffff) + 1
        }
    }
}

impl TalonShuffle for LcRandom31 {
    fn randint(&mut self, hi: usize) -> usize {
        (self.random() % (hi as u64 + 1)) as usize
    }
}

const MT_N: usize = 624;
const MT_M: usize = 397;

/// MT19937 seeded the way CPython seeds `random.Random(int)`.
struct Mt19937 {
    state: [u32; MT_N],
    index: usize,
}

impl Mt19937 {
    fn from_big(seed: &BigUint) -> Self {
        let mut key = seed.to_u32_digits();
        if key.is_empty() {
            key.push(0);
        }

        let mut mt = Mt19937 {
            state: [0; MT_N],
            index: MT_N,
        };
        mt.init_by_array(&key);
        mt
    }

    fn init_genrand(&mut self, s: u32) {
        self.state[0] = s;
        for i in 1..MT_N {
            let prev = self.state[i - 1];
            self.state[i] = 1812433253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.index = MT_N;
    }

    fn init_by_array(&mut self, key: &[u32]) {
        self.init_genrand(19650218);

        let (mut i, mut j) = (1usize, 0usize);
        for _ in 0..MT_N.max(key.len()) {
            let prev = self.state[i - 1];
            self.state[i] = (self.state[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1664525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= MT_N {
                self.state[0] = self.state[MT_N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }
        for _ in 0..MT_N - 1 {
            let prev = self.state[i - 1];
            self.state[i] = (self.state[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1566083941))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= MT_N {
                self.state[0] = self.state[MT_N - 1];
                i = 1;
            }
        }
        self.state[0] = 0x8000_0000;
    }

    fn regenerate(&mut self) {
        for i in 0..MT_N {
            let y = (self.state[i] & 0x8000_0000) | (self.state[(i + 1) % MT_N] & 0x7fff_ffff);
            let mut next = y >> 1;
            if y & 1 != 0 {
                next ^= 0x9908_b0df;
            }
            self.state[i] = self.state[(i + MT_M) % MT_N] ^ next;
        }
        self.index = 0;
    }

    fn next_u32(&mut self) -> u32 {
        if self.index >= MT_N {
            self.regenerate();
        }
        let mut y = self.state[self.index];
        self.index += 1;
        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    /// CPython `random()`: 53 bits from two draws.
    fn next_f64(&mut self) -> f64 {
        let a = u64::from(self.next_u32() >> 5);
        let b = u64::from(self.next_u32() >> 6);
        ((a << 26) + b) as f64 / (1u64 << 53) as f64
    }
}

impl TalonShuffle for Mt19937 {
    fn randint(&mut self, hi: usize) -> usize {
        (self.next_f64() * (hi + 1) as f64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn identities(deck: &Deck) -> HashSet<(Suit, Rank)> {
        deck.cards().iter().map(|c| (c.suit(), c.rank())).collect()
    }

    #[test]
    fn every_generator_yields_a_full_deck() {
        for game in ["1", "31999", "ms11982", "ms3000000000", "32000", "13101775566348840960"] {
            let deck = deck_from_game_number(game).unwrap();
            assert_eq!(deck.len(), CARDS_PER_DECK as usize, "game {game}");
            assert_eq!(identities(&deck).len(), CARDS_PER_DECK as usize, "game {game}");
            assert!(deck.cards().iter().all(|c| !c.is_face_up()));
        }
    }

    #[test]
    fn deals_are_deterministic() {
        let a = deck_from_game_number("13101775566348840960").unwrap();
        let b = deck_from_game_number("13,101,775,566,348,840,960").unwrap();
        assert_eq!(a, b);

        let c = deck_from_game_number("ms617").unwrap();
        assert_eq!(c, deck_from_game_number(" MS-617 ").unwrap());
        assert_ne!(a, c);
    }

    #[test]
    fn small_numbers_match_their_ms_deal() {
        assert_eq!(
            deck_from_game_number("617").unwrap(),
            deck_from_game_number("ms617").unwrap()
        );
    }

    #[test]
    fn lc_random31_matches_the_freecell_generator() {
        // First outputs of the classic MS generator for seed 1.
        let mut rng = LcRandom31::new(1).unwrap();
        let first: Vec<u64> = (0..3).map(|_| rng.random()).collect();
        assert_eq!(first, vec![41, 18467, 6334]);
    }

    #[test]
    fn mt19937_matches_cpython() {
        // random.Random(0).getrandbits(32)
        let mut mt = Mt19937::from_big(&BigUint::from(0u32));
        assert_eq!(mt.next_u32(), 3626764237);
    }

    #[test]
    fn bad_game_numbers() {
        assert_eq!(deck_from_game_number("  "), Err(DealError::Empty));
        assert!(matches!(
            deck_from_game_number("abc"),
            Err(DealError::NotANumber(_))
        ));
        assert!(matches!(
            deck_from_game_number("ms"),
            Err(DealError::NotANumber(_))
        ));
        assert_eq!(deck_from_game_number("ms0"), Err(DealError::MsOutOfRange(0)));
        assert_eq!(
            deck_from_game_number("ms8589934592"),
            Err(DealError::MsOutOfRange(8589934592))
        );
    }
}
