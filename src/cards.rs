use std::fmt;
use std::str::FromStr;

/// Card ranks in shoe order, Ace (low) through King.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Point value with the ace counted low and picture cards counted as ten.
    pub const fn value(self) -> u8 {
        match self {
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            r => r as u8,
        }
    }

    /// True for Ten, Jack, Queen and King.
    pub const fn is_ten_valued(self) -> bool {
        matches!(self, Rank::Ten | Rank::Jack | Rank::Queen | Rank::King)
    }

    pub const fn is_ace(self) -> bool {
        matches!(self, Rank::Ace)
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Rank::Ace),
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            _ => Err(RankParseError::Invalid(c.to_string())),
        }
    }
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t == "10" {
            return Ok(Rank::Ten);
        }
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::try_from(c).map_err(|_| RankParseError::Invalid(s.to_string())),
            _ => Err(RankParseError::Invalid(s.to_string())),
        }
    }
}

/// The four suits, in shoe construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    pub const fn to_char(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'S' => Ok(Suit::Spades),
            'H' => Ok(Suit::Hearts),
            'C' => Ok(Suit::Clubs),
            'D' => Ok(Suit::Diamonds),
            _ => Err(SuitParseError::Invalid(c.to_string())),
        }
    }
}

impl FromStr for Suit {
    type Err = SuitParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c).map_err(|_| SuitParseError::Invalid(s.to_string()));
        }
        match t.to_ascii_lowercase().as_str() {
            "spades" => Ok(Suit::Spades),
            "hearts" => Ok(Suit::Hearts),
            "clubs" => Ok(Suit::Clubs),
            "diamonds" => Ok(Suit::Diamonds),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

/// A playing card: rank + suit. Cards never change once built.
///
/// ```
/// use blackjack_sim::cards::{Card, Rank, Suit};
///
/// let card = Card::try_new('A', 's').unwrap();
/// assert_eq!(card, Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(card.to_string(), "AS");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Build a card from a rank character (`A23456789TJQK`) and a suit character (`SHCD`).
    pub fn try_new(rank: char, suit: char) -> Result<Self, CardParseError> {
        Ok(Self { rank: Rank::try_from(rank)?, suit: Suit::try_from(suit)? })
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }
    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// Point value with the ace counted as 1. Used for statistics categories.
    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    pub const fn is_ace(self) -> bool {
        self.rank.is_ace()
    }

    pub const fn is_ten_valued(self) -> bool {
        self.rank.is_ten_valued()
    }

    /// Two cards score alike when their ranks match or both are worth ten.
    pub const fn same_score(self, other: Card) -> bool {
        self.rank.value() == other.rank.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        // suit is the last char, everything before it is the rank ("10" allowed)
        let Some(suit_ch) = t.chars().last() else {
            return Err(CardParseError::Invalid(s.to_string()));
        };
        let rank_str = &t[..t.len() - suit_ch.len_utf8()];
        if rank_str.is_empty() {
            return Err(CardParseError::Invalid(s.to_string()));
        }
        Ok(Card::new(rank_str.parse()?, Suit::try_from(suit_ch)?))
    }
}

/// Parse a whitespace or comma separated list of cards, e.g. `"AS, TD 9C"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardParseError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_canonical_pairs_construct() {
        let mut n = 0;
        for s in "SHCD".chars() {
            for r in "A23456789TJQK".chars() {
                let c = Card::try_new(r, s).expect("canonical card");
                assert_eq!(c.rank().to_char(), r);
                assert_eq!(c.suit().to_char(), s);
                n += 1;
            }
        }
        assert_eq!(n, 52);
    }

    #[test]
    fn invalid_characters_are_rejected() {
        assert!(matches!(Card::try_new('1', 'S'), Err(CardParseError::Rank(_))));
        assert!(matches!(Card::try_new('Z', 'H'), Err(CardParseError::Rank(_))));
        assert!(matches!(Card::try_new('A', 'X'), Err(CardParseError::Suit(_))));
        assert!(matches!(Card::try_new('K', '?'), Err(CardParseError::Suit(_))));
    }

    #[test]
    fn ten_group_collapses() {
        for r in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            assert!(r.is_ten_valued());
            assert_eq!(r.value(), 10);
        }
        assert_eq!(Rank::Ace.value(), 1);
        assert!(!Rank::Nine.is_ten_valued());
        let j = Card::new(Rank::Jack, Suit::Clubs);
        let q = Card::new(Rank::Queen, Suit::Hearts);
        assert!(j.same_score(q));
        assert!(!j.same_score(Card::new(Rank::Nine, Suit::Hearts)));
    }

    #[test]
    fn parse_and_display() {
        let c: Card = "10h".parse().unwrap();
        assert_eq!(c, Card::new(Rank::Ten, Suit::Hearts));
        assert_eq!(c.to_string(), "TH");
        assert!("A".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
        let cards = parse_cards("AS, TD 9c").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2], Card::new(Rank::Nine, Suit::Clubs));
    }
}
