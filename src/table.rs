//! The table: owns the shoe, the dealer and the seats, and runs rounds.
//!
//! A round always moves through the same phases:
//!
//! 1. reset every seat to one empty hand,
//! 2. reshuffle if the stopper has been reached,
//! 3. collect one bet per seat,
//! 4. deal two passes (seats first, dealer last; the dealer's second card is shown),
//! 5. offer insurance when the dealer shows an ace,
//! 6. settle a dealer blackjack immediately, or flag player blackjacks,
//!    play every hand, play the dealer, and settle,
//! 7. record statistics and hand each seat a round summary.
//!
//! Broken agent contracts (no decision, an illegal dealer action, a split of
//! a non-pair, running the shoe dry, no acceptable bet) end the run with
//! [`TableError::Fatal`].

use crate::cards::Card;
use crate::config::TableConfig;
use crate::hand::{score, Hand, HandId, Outcome};
use crate::player::Player;
use crate::shoe::{Shoe, ShoeError};
use crate::statistics::StatsSink;
use crate::strategy::{Action, DealerHitsSoft17, DealerStandsSoft17, Strategy};
use core::fmt;
use tracing::{debug, error, info, warn};

/// A violated table invariant, with where it was detected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("`{expr}` failed at {file}:{line}: {detail}")]
pub struct ContractViolation {
    pub expr: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub detail: String,
}

impl ContractViolation {
    pub fn new(expr: &'static str, file: &'static str, line: u32, detail: String) -> Self {
        let v = Self { expr, file, line, detail };
        error!(violation = %v, "contract violation");
        v
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error(transparent)]
    Shoe(#[from] ShoeError),
    #[error("fatal: {0}")]
    Fatal(#[from] ContractViolation),
}

macro_rules! violation {
    ($expr:expr, $($arg:tt)+) => {
        ContractViolation::new($expr, file!(), line!(), format!($($arg)+))
    };
}

macro_rules! contract {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err(violation!(stringify!($cond), $($arg)+).into());
        }
    };
}

fn draw(shoe: &mut Shoe) -> Result<Card, TableError> {
    let left = shoe.cards_left();
    shoe.deal()
        .ok_or_else(|| violation!("shoe.deal().is_some()", "shoe ran dry ({left} left)").into())
}

pub struct Table {
    config: TableConfig,
    shoe: Shoe,
    dealer: Box<dyn Strategy>,
    dealer_cards: Vec<Card>,
    shown_cards: Vec<Card>,
    players: Vec<Player>,
    recorded: u64,
    rounds: u64,
    sink: Option<Box<dyn StatsSink>>,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("config", &self.config)
            .field("cards_left", &self.shoe.cards_left())
            .field("dealer", &self.dealer.name())
            .field("dealer_cards", &self.dealer_cards)
            .field("players", &self.players)
            .field("rounds", &self.rounds)
            .finish()
    }
}

impl Table {
    /// A table with a freshly shuffled shoe built from `config`.
    ///
    /// ```
    /// use blackjack_sim::config::TableConfig;
    /// use blackjack_sim::strategy::Basic;
    /// use blackjack_sim::table::Table;
    ///
    /// let mut table = Table::new(TableConfig::default().with_seed(7)).unwrap();
    /// table.add_player(Box::new(Basic::new()));
    /// table.play_rounds(100).unwrap();
    /// assert_eq!(table.players()[0].hands_played(), 100);
    /// ```
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        let shoe = match config.seed {
            Some(seed) => Shoe::with_seed(config.decks, seed)?,
            None => Shoe::new(config.decks)?,
        };
        Ok(Self::with_shoe(config, shoe))
    }

    /// A table dealing from `shoe`; `config.decks` and `config.seed` are ignored.
    pub fn with_shoe(config: TableConfig, shoe: Shoe) -> Self {
        let dealer: Box<dyn Strategy> = if config.dealer_hits_soft_17 {
            Box::new(DealerHitsSoft17)
        } else {
            Box::new(DealerStandsSoft17)
        };
        Self {
            config,
            shoe,
            dealer,
            dealer_cards: Vec::new(),
            shown_cards: Vec::new(),
            players: Vec::new(),
            recorded: 0,
            rounds: 0,
            sink: None,
        }
    }

    /// Seat a strategy and credit its opening buy-in. Returns the seat index.
    pub fn add_player(&mut self, strategy: Box<dyn Strategy>) -> usize {
        let mut player = Player::new(strategy);
        let buyin = player.strategy.get_buyin();
        if buyin > 0 {
            player.add_buyin(buyin);
        }
        debug!(seat = self.players.len(), strategy = player.strategy_name(), buyin, "seated");
        self.players.push(player);
        self.players.len() - 1
    }

    /// Replace the dealer's strategy.
    pub fn set_dealer(&mut self, dealer: Box<dyn Strategy>) {
        self.dealer = dealer;
    }

    pub fn set_stats_sink(&mut self, sink: Box<dyn StatsSink>) {
        self.sink = Some(sink);
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }
    /// The dealer's full hand for the current (or last) round.
    pub fn dealer_cards(&self) -> &[Card] {
        &self.dealer_cards
    }
    /// The dealer cards visible to players.
    pub fn shown_cards(&self) -> &[Card] {
        &self.shown_cards
    }
    /// Hands written to statistics across all seats.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }
    /// Rounds completed.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Play rounds until one fails.
    pub fn run(&mut self) -> Result<(), TableError> {
        loop {
            self.play_round()?;
        }
    }

    pub fn play_rounds(&mut self, n: u64) -> Result<(), TableError> {
        for _ in 0..n {
            self.play_round()?;
        }
        Ok(())
    }

    /// Play one full round.
    pub fn play_round(&mut self) -> Result<(), TableError> {
        self.reset();
        self.maybe_shuffle();
        self.collect_bets()?;
        self.deal()?;
        self.offer_insurance();
        if score(&self.dealer_cards).value == 21 {
            self.settle_dealer_blackjack();
        } else {
            self.check_blackjacks();
            self.play_hands()?;
            self.play_dealer()?;
            self.settle();
        }
        self.record_statistics();
        self.summarize();
        self.rounds += 1;
        Ok(())
    }

    fn reset(&mut self) {
        for p in &mut self.players {
            p.reset_hands();
        }
        self.dealer_cards.clear();
        self.shown_cards.clear();
    }

    fn maybe_shuffle(&mut self) {
        if !self.shoe.stopper_reached() {
            return;
        }
        debug!(cards_left = self.shoe.cards_left(), stopper = self.shoe.stopper(), "shuffling");
        self.shoe.shuffle();
        for p in &mut self.players {
            p.strategy.on_shuffle();
        }
    }

    fn collect_bets(&mut self) -> Result<(), TableError> {
        let max_bet = self.config.max_bet;
        let attempts = self.config.bet_retry_limit + 1;
        let cards_left = self.shoe.cards_left();
        for (seat, player) in self.players.iter_mut().enumerate() {
            let mut bet = 0;
            for _ in 0..attempts {
                let bankroll = player.bankroll_u32();
                let offered = player.strategy.get_bet(bankroll, cards_left);
                if u64::from(offered) > player.bankroll() {
                    let buyin = player.strategy.get_buyin();
                    if buyin > 0 {
                        warn!(seat, bet = offered, bankroll, buyin, "bankroll short, buying in");
                        player.add_buyin(buyin);
                    }
                    if u64::from(offered) > player.bankroll() {
                        warn!(seat, bet = offered, bankroll = player.bankroll(), "bet not covered");
                        continue;
                    }
                }
                if offered > max_bet {
                    warn!(seat, bet = offered, max_bet, "bet above the table maximum");
                    continue;
                }
                if offered == 0 {
                    warn!(seat, max = max_bet.min(bankroll), "no bet offered");
                    continue;
                }
                bet = offered;
                break;
            }
            contract!(bet > 0, "seat {seat} gave no acceptable bet in {attempts} attempts");
            for i in 0..player.hands.len() {
                contract!(player.debit(bet), "seat {seat} cannot cover a bet of {bet}");
                player.hands[i].set_bet(bet);
            }
        }
        Ok(())
    }

    fn deal(&mut self) -> Result<(), TableError> {
        for pass in 0..2 {
            for player in &mut self.players {
                for hand in &mut player.hands {
                    hand.push(draw(&mut self.shoe)?);
                }
            }
            let card = draw(&mut self.shoe)?;
            self.dealer_cards.push(card);
            if pass > 0 {
                self.shown_cards.push(card);
            }
        }
        Ok(())
    }

    fn shows_ace(&self) -> bool {
        self.shown_cards.first().is_some_and(|c| c.is_ace())
    }

    fn offer_insurance(&mut self) {
        if !self.shows_ace() {
            return;
        }
        for player in &mut self.players {
            for hand in &mut player.hands {
                if player.strategy.insure(&self.shown_cards, &hand.cards) {
                    hand.insured = true;
                }
            }
        }
    }

    /// Insured hands are paid their bet; a 21 pushes unless the dealer shows an ace.
    fn settle_dealer_blackjack(&mut self) {
        let shows_ace = self.shows_ace();
        debug!(dealer = ?self.dealer_cards, "dealer blackjack");
        for player in &mut self.players {
            for i in 0..player.hands.len() {
                let hand = &player.hands[i];
                let (total, bet, insured) = (hand.score().value, hand.bet, hand.insured);
                let outcome = if total == 21 && !shows_ace {
                    player.credit(bet, 0);
                    Outcome::Push
                } else {
                    if insured {
                        player.credit(bet, 0);
                    }
                    Outcome::Loss
                };
                player.hands[i].outcome = outcome;
            }
            player.strategy.on_dealer_blackjack();
        }
    }

    fn check_blackjacks(&mut self) {
        for player in &mut self.players {
            for hand in &mut player.hands {
                if hand.score().value == 21 {
                    hand.blackjack = true;
                    player.strategy.on_player_blackjack();
                }
            }
        }
    }

    fn play_hands(&mut self) -> Result<(), TableError> {
        for seat in 0..self.players.len() {
            // splits append hands while we walk the list
            let mut i = 0;
            while i < self.players[seat].hands.len() {
                self.play_hand(seat, HandId(i))?;
                i += 1;
            }
        }
        Ok(())
    }

    fn play_hand(&mut self, seat: usize, id: HandId) -> Result<(), TableError> {
        let hand = &self.players[seat].hands[id.0];
        if hand.blackjack || hand.closed {
            return Ok(());
        }
        loop {
            let player = &mut self.players[seat];
            let action = player
                .strategy
                .play(&player.hands[id.0].cards, &self.shown_cards)
                .ok_or_else(|| violation!("action.is_some()", "seat {seat} made no decision"))?;
            let more = self.apply(seat, id, action)?;
            if !more || self.players[seat].hands[id.0].score().value >= 21 {
                return Ok(());
            }
        }
    }

    /// Apply one action to a hand. Returns whether the hand is still in play.
    fn apply(&mut self, seat: usize, id: HandId, action: Action) -> Result<bool, TableError> {
        let Table { shoe, players, .. } = self;
        let player = &mut players[seat];
        let bet = player.hands[id.0].bet;

        if matches!(action, Action::Double | Action::Split) && u64::from(bet) > player.bankroll() {
            let buyin = player.strategy.get_buyin();
            if buyin > 0 {
                warn!(seat, %action, bet, buyin, "bankroll short, buying in");
                player.add_buyin(buyin);
            }
            if u64::from(bet) > player.bankroll() {
                warn!(seat, %action, bet, bankroll = player.bankroll(), "action not covered, ignored");
                return Ok(true);
            }
        }

        match action {
            Action::Stand => Ok(false),
            Action::Hit => {
                player.hands[id.0].push(draw(shoe)?);
                Ok(true)
            }
            Action::Double => {
                contract!(player.debit(bet), "seat {seat} cannot cover a double of {bet}");
                let hand = &mut player.hands[id.0];
                hand.set_bet(bet * 2);
                hand.push(draw(shoe)?);
                debug!(seat, hand = id.0, bet = bet * 2, "doubled");
                Ok(false)
            }
            Action::Split => {
                contract!(
                    player.hands[id.0].split_allowed(),
                    "seat {seat} split {}",
                    player.hands[id.0]
                );
                contract!(player.debit(bet), "seat {seat} cannot cover a split of {bet}");
                let moved = player.hands[id.0]
                    .cards
                    .pop()
                    .ok_or_else(|| violation!("hand.cards.pop().is_some()", "split of an empty hand"))?;
                let mut child = Hand::split_child(bet);
                child.sibling = player.hands[id.0].sibling;
                child.push(moved);
                player.hands[id.0].push(draw(shoe)?);
                child.push(draw(shoe)?);
                let child_id = player.add_hand(child);
                player.hands[id.0].sibling = Some(child_id);
                debug!(seat, hand = id.0, child = child_id.0, "split");
                if moved.is_ace() {
                    player.hands[id.0].closed = true;
                    player.hands[child_id.0].closed = true;
                    return Ok(false);
                }
                Ok(true)
            }
        }
    }

    fn play_dealer(&mut self) -> Result<(), TableError> {
        loop {
            let action = self.dealer.play_dealer(&self.dealer_cards);
            match action {
                Some(Action::Stand) => return Ok(()),
                Some(Action::Hit) => {
                    let card = draw(&mut self.shoe)?;
                    self.dealer_cards.push(card);
                    if score(&self.dealer_cards).value >= 21 {
                        return Ok(());
                    }
                }
                other => {
                    return Err(violation!(
                        "matches!(action, Some(Action::Hit | Action::Stand))",
                        "dealer answered {other:?}"
                    )
                    .into())
                }
            }
        }
    }

    fn settle(&mut self) {
        let dealer = score(&self.dealer_cards).value;
        for player in &mut self.players {
            for i in 0..player.hands.len() {
                let hand = &player.hands[i];
                let (total, bet, blackjack) = (hand.score().value, hand.bet, hand.blackjack);
                let outcome = if blackjack {
                    // 3:2, with the odd half unit paid in cents
                    player.credit(bet * 5 / 2, if bet % 2 == 1 { 50 } else { 0 });
                    Outcome::Win
                } else if total > 21 || (dealer <= 21 && dealer > total) {
                    Outcome::Loss
                } else if total > dealer || dealer > 21 {
                    player.credit(bet * 2, 0);
                    Outcome::Win
                } else {
                    player.credit(bet, 0);
                    Outcome::Push
                };
                player.hands[i].outcome = outcome;
            }
        }
    }

    fn record_statistics(&mut self) {
        let interval = self.config.stats_flush_interval;
        for (seat, player) in self.players.iter_mut().enumerate() {
            for i in 0..player.hands.len() {
                let hand = &player.hands[i];
                if hand.split_child {
                    continue;
                }
                match hand.sibling {
                    Some(_) => {
                        let (cards, outcome) = split_chain_result(&player.hands, HandId(i));
                        player.statistics.write(&self.shown_cards, &cards, outcome);
                    }
                    None => {
                        let outcome = hand.outcome;
                        player.statistics.write(&self.shown_cards, &hand.cards, outcome);
                    }
                }
                self.recorded += 1;
                if interval > 0 && self.recorded % interval == 0 {
                    info!(seat, recorded = self.recorded, "flushing statistics");
                    if let Some(sink) = self.sink.as_mut() {
                        if let Err(e) = sink.flush(seat, &player.statistics, &player.ledger()) {
                            warn!(seat, error = %e, "statistics flush failed");
                        }
                    }
                }
            }
        }
    }

    fn summarize(&mut self) {
        for player in &mut self.players {
            player.strategy.on_round_summary(&self.dealer_cards, &player.hands);
        }
    }
}

/// Net result of a split chain and the two cards that started it.
///
/// More wins than losses is a win, more losses a loss, otherwise a push.
fn split_chain_result(hands: &[Hand], head: HandId) -> (Vec<Card>, Outcome) {
    let mut net = 0i64;
    let mut cursor = Some(head);
    while let Some(id) = cursor {
        let h = &hands[id.0];
        match h.outcome {
            Outcome::Win => net += 1,
            Outcome::Loss => net -= 1,
            Outcome::Push => {}
        }
        cursor = h.sibling;
    }
    let outcome = match net.cmp(&0) {
        std::cmp::Ordering::Greater => Outcome::Win,
        std::cmp::Ordering::Less => Outcome::Loss,
        std::cmp::Ordering::Equal => Outcome::Push,
    };
    let head_hand = &hands[head.0];
    let cards = head_hand
        .cards
        .first()
        .into_iter()
        .chain(head_hand.sibling.and_then(|s| hands[s.0].cards.first()))
        .copied()
        .collect();
    (cards, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn hand(cards: &str, outcome: Outcome) -> Hand {
        let mut h = Hand::from_cards(parse_cards(cards).unwrap());
        h.outcome = outcome;
        h
    }

    #[test]
    fn split_chain_nets_outcomes() {
        let mut hands = vec![hand("8S 3D", Outcome::Win), hand("8H TC", Outcome::Loss)];
        hands[0].sibling = Some(HandId(1));
        hands[1].split_child = true;
        let (cards, outcome) = split_chain_result(&hands, HandId(0));
        assert_eq!(cards, parse_cards("8S 8H").unwrap());
        assert_eq!(outcome, Outcome::Push);

        hands[1].outcome = Outcome::Win;
        assert_eq!(split_chain_result(&hands, HandId(0)).1, Outcome::Win);
        hands[0].outcome = Outcome::Loss;
        hands[1].outcome = Outcome::Push;
        assert_eq!(split_chain_result(&hands, HandId(0)).1, Outcome::Loss);
    }

    #[test]
    fn contract_macro_reports_expression() {
        fn check(n: u32) -> Result<(), TableError> {
            contract!(n > 3, "n was {n}");
            Ok(())
        }
        assert!(check(4).is_ok());
        match check(1) {
            Err(TableError::Fatal(v)) => {
                assert_eq!(v.expr, "n > 3");
                assert_eq!(v.detail, "n was 1");
                assert!(v.file.ends_with("table.rs"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn exhausted_shoe_is_fatal() {
        let mut shoe = Shoe::prearranged(parse_cards("TS").unwrap());
        assert!(draw(&mut shoe).is_ok());
        assert!(matches!(draw(&mut shoe), Err(TableError::Fatal(_))));
    }
}
