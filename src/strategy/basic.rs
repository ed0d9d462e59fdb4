use super::{Action, Strategy};
use crate::cards::Card;
use crate::config::DEFAULT_BUYIN;
use crate::hand::{score, Score};

/// Fixed-rule basic strategy: flat one-unit bets, never insures.
#[derive(Debug, Clone)]
pub struct Basic {
    bet: u32,
}

impl Basic {
    pub fn new() -> Self {
        Self { bet: 1 }
    }
}

impl Default for Basic {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Basic {
    fn name(&self) -> &'static str {
        "basic"
    }
    fn get_buyin(&mut self) -> u32 {
        DEFAULT_BUYIN
    }
    fn get_bet(&mut self, _bankroll: u32, _cards_left: usize) -> u32 {
        self.bet
    }
    fn play(&mut self, hand: &[Card], dealer_upcards: &[Card]) -> Option<Action> {
        Some(chart(hand, dealer_upcards))
    }
    fn insure(&mut self, _dealer_upcards: &[Card], _hand: &[Card]) -> bool {
        false
    }
}

/// Basic strategy chart lookup. The dealer total counts a visible ace as 11.
///
/// Pairs are checked first, then soft totals, then hard totals. A pair of
/// fives plays as a hard ten.
pub(crate) fn chart(hand: &[Card], dealer_upcards: &[Card]) -> Action {
    use Action::{Double, Hit, Split, Stand};

    let dealer = score(dealer_upcards).value;
    let Score { value: total, soft } = score(hand);

    if let [a, b] = hand {
        if a.same_score(*b) {
            match a.value() {
                2 | 3 => return if dealer < 8 { Split } else { Hit },
                4 => return if matches!(dealer, 5 | 6) { Split } else { Hit },
                6 => return if dealer < 7 { Split } else { Hit },
                7 => return if dealer < 8 { Split } else { Hit },
                1 | 8 => return Split,
                9 => return if dealer == 7 || dealer > 9 { Stand } else { Split },
                10 => return Stand,
                _ => {}
            }
        }
    }

    if soft {
        match total {
            13 | 14 => return if matches!(dealer, 5 | 6) { Double } else { Hit },
            15 | 16 => return if (4..=6).contains(&dealer) { Double } else { Hit },
            17 => return if (3..=6).contains(&dealer) { Double } else { Hit },
            18 => {
                return if (3..=6).contains(&dealer) {
                    Double
                } else if dealer < 9 {
                    Stand
                } else {
                    Hit
                }
            }
            _ => {}
        }
    }

    match total {
        0..=8 => Hit,
        9 => {
            if (3..=6).contains(&dealer) {
                Double
            } else {
                Hit
            }
        }
        10 => {
            if dealer < 10 {
                Double
            } else {
                Hit
            }
        }
        11 => {
            if dealer < 11 {
                Double
            } else {
                Hit
            }
        }
        12 => {
            if (4..=6).contains(&dealer) {
                Stand
            } else {
                Hit
            }
        }
        13..=16 => {
            if dealer < 7 {
                Stand
            } else {
                Hit
            }
        }
        _ => Stand,
    }
}
