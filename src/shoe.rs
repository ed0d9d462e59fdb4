//! The card supply: one or more 52-card decks shuffled together.
//!
//! A shuffle assigns every card a random weight and sorts by it, places the
//! cut card (the *stopper*) between one and three decks from the end, and burns
//! the first card.

use crate::cards::{Card, Rank, Suit};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Cards in a single deck.
pub const DECK_SIZE: usize = 52;
/// Largest shoe whose card count still fits a 16-bit counter.
pub const MAX_DECKS: usize = 1260;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShoeError {
    #[error("too many decks: {requested} requested, at most {max} fit in a shoe")]
    TooManyDecks { requested: usize, max: usize },
    #[error("a shoe needs at least one deck")]
    NoDecks,
}

#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    dealt: usize,
    stopper: usize,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Build and shuffle a shoe seeded from the clock and process id.
    pub fn new(decks: usize) -> Result<Self, ShoeError> {
        Self::with_seed(decks, entropy_seed())
    }

    /// Build and shuffle a shoe whose shuffles are reproducible from `seed`.
    ///
    /// ```
    /// use blackjack_sim::shoe::Shoe;
    ///
    /// let shoe = Shoe::with_seed(6, 42).unwrap();
    /// assert_eq!(shoe.len(), 312);
    /// assert_eq!(shoe.cards_left(), 311);
    /// ```
    pub fn with_seed(decks: usize, seed: u64) -> Result<Self, ShoeError> {
        if decks == 0 {
            return Err(ShoeError::NoDecks);
        }
        if decks > MAX_DECKS {
            return Err(ShoeError::TooManyDecks { requested: decks, max: MAX_DECKS });
        }
        let mut cards = Vec::with_capacity(decks * DECK_SIZE);
        for _ in 0..decks {
            for &s in &Suit::ALL {
                for &r in &Rank::ALL {
                    cards.push(Card::new(r, s));
                }
            }
        }
        let mut shoe = Self { cards, dealt: 0, stopper: 0, rng: ChaCha8Rng::seed_from_u64(seed) };
        shoe.shuffle();
        Ok(shoe)
    }

    /// A shoe that deals `cards` in the given order: no shuffle, no burn card,
    /// and a stopper of zero so it never asks for a reshuffle.
    pub fn prearranged(cards: Vec<Card>) -> Self {
        Self { cards, dealt: 0, stopper: 0, rng: ChaCha8Rng::seed_from_u64(0) }
    }

    /// Reorder every card (dealt or not), pick a new stopper and burn one card.
    pub fn shuffle(&mut self) {
        let rng = &mut self.rng;
        let mut weighted: Vec<(u32, Card)> =
            self.cards.iter().map(|&c| (rng.random::<u32>(), c)).collect();
        weighted.sort_by_key(|&(w, _)| w);
        for (slot, (_, card)) in self.cards.iter_mut().zip(weighted) {
            *slot = card;
        }
        self.dealt = 0;
        self.stopper = DECK_SIZE + self.rng.random_range(0..2 * DECK_SIZE);
        // burn card; an empty shoe has nothing to burn
        if !self.cards.is_empty() {
            self.dealt = 1;
        }
    }

    /// True once fewer cards remain than the stopper allows.
    pub fn stopper_reached(&self) -> bool {
        self.stopper > self.cards_left()
    }

    /// Next card, or `None` once the shoe is exhausted.
    pub fn deal(&mut self) -> Option<Card> {
        let card = self.cards.get(self.dealt).copied()?;
        self.dealt += 1;
        Some(card)
    }

    pub fn cards_left(&self) -> usize {
        self.cards.len() - self.dealt
    }

    /// Cards dealt since the last shuffle, burn card included.
    pub fn dealt(&self) -> usize {
        self.dealt
    }

    pub fn stopper(&self) -> usize {
        self.stopper
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn entropy_seed() -> u64 {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    let pid = u64::from(std::process::id());
    now ^ pid.wrapping_add(pid << 15)
}
