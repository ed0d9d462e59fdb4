use crate::hand::{Hand, HandId};
use crate::statistics::{Ledger, Statistics};
use crate::strategy::Strategy;
use core::fmt;

/// A seat at the table: a strategy, its money and this round's hands.
///
/// Money is kept as whole units plus cents so blackjack payouts on odd bets
/// stay exact.
pub struct Player {
    pub(crate) strategy: Box<dyn Strategy>,
    pub(crate) hands: Vec<Hand>,
    pub(crate) statistics: Statistics,
    bankroll: u64,
    bankroll_cents: u8,
    total_buyin: u64,
    hands_played: u64,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("strategy", &self.strategy.name())
            .field("hands", &self.hands)
            .field("bankroll", &self.bankroll)
            .field("bankroll_cents", &self.bankroll_cents)
            .field("total_buyin", &self.total_buyin)
            .field("hands_played", &self.hands_played)
            .finish()
    }
}

impl Player {
    /// A seat with an empty bankroll and a single empty hand.
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Self {
            strategy,
            hands: vec![Hand::new()],
            statistics: Statistics::new(),
            bankroll: 0,
            bankroll_cents: 0,
            total_buyin: 0,
            hands_played: 0,
        }
    }

    /// Drop every hand and start the round with one fresh hand.
    pub(crate) fn reset_hands(&mut self) {
        self.hands_played += 1;
        self.hands.clear();
        self.hands.push(Hand::new());
    }

    pub(crate) fn add_hand(&mut self, hand: Hand) -> HandId {
        self.hands.push(hand);
        HandId(self.hands.len() - 1)
    }

    /// Money brought to the table; counted toward the total bought in.
    pub fn add_buyin(&mut self, amount: u32) {
        self.total_buyin += u64::from(amount);
        self.bankroll += u64::from(amount);
    }

    /// Credit `units` plus `cents` (< 100), carrying whole units out of the cents.
    pub fn credit(&mut self, units: u32, cents: u8) {
        debug_assert!(cents < 100);
        self.bankroll += u64::from(units);
        let total = u16::from(self.bankroll_cents) + u16::from(cents);
        self.bankroll += u64::from(total / 100);
        self.bankroll_cents = (total % 100) as u8;
    }

    /// Take `units` from the bankroll. Returns `false` and leaves the
    /// bankroll alone if it does not cover the amount.
    pub(crate) fn debit(&mut self, units: u32) -> bool {
        match self.bankroll.checked_sub(u64::from(units)) {
            Some(rest) => {
                self.bankroll = rest;
                true
            }
            None => false,
        }
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }
    pub fn hand(&self, id: HandId) -> Option<&Hand> {
        self.hands.get(id.0)
    }
    /// Whole units available to bet.
    pub fn bankroll(&self) -> u64 {
        self.bankroll
    }
    pub fn bankroll_cents(&self) -> u8 {
        self.bankroll_cents
    }
    pub fn total_buyin(&self) -> u64 {
        self.total_buyin
    }
    /// Rounds started at this seat.
    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Bankroll clamped to what a strategy is shown when betting.
    pub(crate) fn bankroll_u32(&self) -> u32 {
        u32::try_from(self.bankroll).unwrap_or(u32::MAX)
    }

    pub fn ledger(&self) -> Ledger {
        Ledger {
            hands_played: self.hands_played,
            total_buyin: self.total_buyin,
            bankroll: self.bankroll,
            bankroll_cents: self.bankroll_cents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Basic;

    fn player() -> Player {
        Player::new(Box::new(Basic::new()))
    }

    #[test]
    fn cents_carry_into_units() {
        let mut p = player();
        p.credit(12, 50);
        assert_eq!((p.bankroll(), p.bankroll_cents()), (12, 50));
        p.credit(2, 50);
        assert_eq!((p.bankroll(), p.bankroll_cents()), (15, 0));
        p.credit(0, 99);
        p.credit(0, 99);
        assert_eq!((p.bankroll(), p.bankroll_cents()), (16, 98));
    }

    #[test]
    fn debit_refuses_overdraft() {
        let mut p = player();
        p.add_buyin(10);
        assert!(p.debit(4));
        assert!(!p.debit(7));
        assert_eq!(p.bankroll(), 6);
        assert_eq!(p.total_buyin(), 10);
    }

    #[test]
    fn reset_counts_rounds() {
        let mut p = player();
        p.add_hand(Hand::new());
        assert_eq!(p.hands().len(), 2);
        p.reset_hands();
        p.reset_hands();
        assert_eq!(p.hands().len(), 1);
        assert_eq!(p.hands_played(), 2);
        let l = p.ledger();
        assert_eq!(l.hands_played, 2);
    }
}
