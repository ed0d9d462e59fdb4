use super::basic::chart;
use super::{Action, Strategy};
use crate::cards::Card;
use crate::config::DEFAULT_BUYIN;
use crate::hand::Hand;
use crate::shoe::DECK_SIZE;

/// Hi-lo style ten counter playing the basic chart, with bets and insurance
/// driven by the true count.
#[derive(Debug, Clone)]
pub struct CardCount {
    unit: u32,
    running: i32,
    cards_left: usize,
}

impl CardCount {
    pub fn new() -> Self {
        Self { unit: 1, running: 0, cards_left: 0 }
    }

    pub fn running_count(&self) -> i32 {
        self.running
    }

    /// Running count per remaining deck, using the last shoe size seen by
    /// [`Strategy::get_bet`]. Zero until a shoe size has been seen.
    pub fn true_count(&self) -> f64 {
        if self.cards_left == 0 {
            return 0.0;
        }
        let decks_left = self.cards_left as f64 / DECK_SIZE as f64;
        f64::from(self.running) / decks_left
    }

    fn observe(&mut self, card: Card) {
        let v = card.value();
        if (3..=7).contains(&v) {
            self.running += 1;
        } else if v == 1 || v == 10 {
            self.running -= 1;
        }
    }
}

impl Default for CardCount {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for CardCount {
    fn name(&self) -> &'static str {
        "cardcount"
    }
    fn get_buyin(&mut self) -> u32 {
        DEFAULT_BUYIN
    }
    fn get_bet(&mut self, _bankroll: u32, cards_left: usize) -> u32 {
        if cards_left > 0 {
            self.cards_left = cards_left;
        }
        let tc = self.true_count();
        let multiple = if tc <= 1.0 {
            1
        } else if tc <= 3.0 {
            2
        } else if tc <= 5.0 {
            3
        } else if tc <= 7.0 {
            4
        } else {
            5
        };
        self.unit * multiple
    }
    fn play(&mut self, hand: &[Card], dealer_upcards: &[Card]) -> Option<Action> {
        Some(chart(hand, dealer_upcards))
    }
    fn insure(&mut self, _dealer_upcards: &[Card], _hand: &[Card]) -> bool {
        self.true_count() >= 1.0
    }
    fn on_shuffle(&mut self) {
        self.running = 0;
    }
    fn on_round_summary(&mut self, dealer_cards: &[Card], hands: &[Hand]) {
        for &c in dealer_cards {
            self.observe(c);
        }
        for c in hands.iter().flat_map(|h| h.cards().iter().copied()) {
            self.observe(c);
        }
    }
}
