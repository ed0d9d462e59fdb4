//! Strategies: pluggable decision agents for players and the dealer.
//!
//! The table drives every seat through the [`Strategy`] trait. Required
//! methods cover the decisions a seat must make (buy-in, bet, play,
//! insurance); the notification hooks default to no-ops so simple agents only
//! implement what they use.

use crate::cards::Card;
use crate::hand::Hand;
use core::fmt;
use std::io::{self, IsTerminal};
use std::str::FromStr;

mod basic;
mod card_count;
mod dealer;
mod interactive;

pub use basic::Basic;
pub use card_count::CardCount;
pub use dealer::{DealerHitsSoft17, DealerStandsSoft17};
pub use interactive::Interactive;

/// What to do with a hand when it is this seat's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Stand,
    Hit,
    Double,
    Split,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Stand => "stand",
            Action::Hit => "hit",
            Action::Double => "double",
            Action::Split => "split",
        };
        f.write_str(s)
    }
}

/// A decision agent seated at the table.
///
/// Returning `None` from [`Strategy::play`] or [`Strategy::play_dealer`]
/// means the agent has no decision; the table treats that as fatal.
pub trait Strategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "custom"
    }
    /// Amount to buy in with at sit-down and whenever funds run short.
    fn get_buyin(&mut self) -> u32;
    /// Wager for the next round. Zero means no bet could be produced.
    fn get_bet(&mut self, bankroll: u32, cards_left: usize) -> u32;
    /// Decide a player hand given the dealer's visible cards.
    fn play(&mut self, hand: &[Card], dealer_upcards: &[Card]) -> Option<Action>;
    /// Decide the dealer's own hand. Agents that cannot deal keep the default.
    fn play_dealer(&mut self, _hand: &[Card]) -> Option<Action> {
        None
    }
    /// Whether to insure `hand` while the dealer shows an ace.
    fn insure(&mut self, dealer_upcards: &[Card], hand: &[Card]) -> bool;

    fn on_shuffle(&mut self) {}
    fn on_dealer_blackjack(&mut self) {}
    fn on_player_blackjack(&mut self) {}
    /// Called once per round after settlement with the dealer's full hand
    /// and all of this seat's hands.
    fn on_round_summary(&mut self, _dealer_cards: &[Card], _hands: &[Hand]) {}
}

/// The built-in strategies, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Basic,
    CardCount,
    Interactive,
    Dealer,
    DealerHitsSoft17,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown strategy: '{0}'")]
pub struct UnknownStrategy(pub String);

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Basic,
        StrategyKind::CardCount,
        StrategyKind::Interactive,
        StrategyKind::Dealer,
        StrategyKind::DealerHitsSoft17,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            StrategyKind::Basic => "basic",
            StrategyKind::CardCount => "cardcount",
            StrategyKind::Interactive => "interactive",
            StrategyKind::Dealer => "dealer",
            StrategyKind::DealerHitsSoft17 => "dealerhitssoft17",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            StrategyKind::Basic => "Basic Blackjack Strategy",
            StrategyKind::CardCount => "Simple 10s Count Strategy",
            StrategyKind::Interactive => "Interactive -- User is prompted for play",
            StrategyKind::Dealer => "Dealer Strategy (Stands on soft 17)",
            StrategyKind::DealerHitsSoft17 => "Dealer Strategy (Hits on soft 17)",
        }
    }

    /// Instantiate the strategy. The interactive agent talks to stdin/stdout.
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Basic => Box::new(Basic::new()),
            StrategyKind::CardCount => Box::new(CardCount::new()),
            StrategyKind::Interactive => Box::new(
                Interactive::new(io::stdin().lock(), io::stdout()).styled(io::stdout().is_terminal()),
            ),
            StrategyKind::Dealer => Box::new(DealerStandsSoft17),
            StrategyKind::DealerHitsSoft17 => Box::new(DealerHitsSoft17),
        }
    }

    /// One `name - description` line per strategy.
    pub fn listing() -> String {
        let mut out = String::new();
        for k in Self::ALL {
            out.push_str(&format!(" {:>12} - {}\n", k.name(), k.description()));
        }
        out
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    /// Case-insensitive lookup by registry name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}
