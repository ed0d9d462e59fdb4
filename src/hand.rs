use crate::cards::Card;
use std::fmt;

/// Best blackjack total of a set of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub value: u32,
    /// An ace is still counted as eleven.
    pub soft: bool,
}

impl Score {
    pub const fn is_bust(self) -> bool {
        self.value > 21
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.soft {
            write!(f, "{}/{}", self.value - 10, self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Score a set of cards: aces start at eleven and drop to one while the total busts.
///
/// ```
/// use blackjack_sim::cards::parse_cards;
/// use blackjack_sim::hand::score;
///
/// let s = score(&parse_cards("AS 6H").unwrap());
/// assert_eq!((s.value, s.soft), (17, true));
/// let s = score(&parse_cards("AS 6H 9D").unwrap());
/// assert_eq!((s.value, s.soft), (16, false));
/// ```
pub fn score(cards: &[Card]) -> Score {
    let mut value: u32 = 0;
    let mut high_aces = 0u32;
    for c in cards {
        if c.is_ace() {
            value += 11;
            high_aces += 1;
        } else {
            value += u32::from(c.value());
        }
    }
    while value > 21 && high_aces > 0 {
        value -= 10;
        high_aces -= 1;
    }
    Score { value, soft: high_aces > 0 }
}

/// Exactly two cards of the same rank, or two ten-valued cards.
pub fn split_allowed(cards: &[Card]) -> bool {
    match cards {
        [a, b] => a.same_score(*b),
        _ => false,
    }
}

/// Settled result of a hand. Indexes statistics counters in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    Loss,
    #[default]
    Push,
    Win,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Loss, Outcome::Push, Outcome::Win];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Loss => "LOSS",
            Outcome::Push => "PUSH",
            Outcome::Win => "WIN",
        };
        f.write_str(s)
    }
}

/// Index of a hand in its player's hand list for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandId(pub(crate) usize);

impl HandId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One player hand for one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    pub(crate) cards: Vec<Card>,
    pub(crate) bet: u32,
    pub(crate) insured: bool,
    pub(crate) blackjack: bool,
    pub(crate) outcome: Outcome,
    pub(crate) split_child: bool,
    pub(crate) sibling: Option<HandId>,
    pub(crate) closed: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hand holding `cards` with no bet placed.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards, ..Self::default() }
    }

    pub(crate) fn split_child(bet: u32) -> Self {
        Self { bet, split_child: true, ..Self::default() }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
    pub fn bet(&self) -> u32 {
        self.bet
    }
    pub fn is_insured(&self) -> bool {
        self.insured
    }
    /// Natural 21 on the initial two cards.
    pub fn is_blackjack(&self) -> bool {
        self.blackjack
    }
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
    /// Created by splitting another hand.
    pub fn is_split_child(&self) -> bool {
        self.split_child
    }
    /// Next hand in this hand's split chain.
    pub fn sibling(&self) -> Option<HandId> {
        self.sibling
    }
    /// No further actions are requested for a closed hand.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn score(&self) -> Score {
        score(&self.cards)
    }

    pub fn split_allowed(&self) -> bool {
        split_allowed(&self.cards)
    }

    /// Placing a bet clears the insurance and blackjack flags.
    pub(crate) fn set_bet(&mut self, bet: u32) {
        self.bet = bet;
        self.insured = false;
        self.blackjack = false;
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
