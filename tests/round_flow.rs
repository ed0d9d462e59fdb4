mod common;

use blackjack_sim::cards::Card;
use blackjack_sim::config::TableConfig;
use blackjack_sim::hand::Outcome;
use blackjack_sim::shoe::Shoe;
use blackjack_sim::strategy::{Action, Strategy};
use blackjack_sim::table::{Table, TableError};
use common::{cards, table_with, Scripted};

struct DoublingDealer;

impl Strategy for DoublingDealer {
    fn get_buyin(&mut self) -> u32 {
        0
    }
    fn get_bet(&mut self, _bankroll: u32, _cards_left: usize) -> u32 {
        0
    }
    fn play(&mut self, hand: &[Card], _dealer_upcards: &[Card]) -> Option<Action> {
        self.play_dealer(hand)
    }
    fn play_dealer(&mut self, _hand: &[Card]) -> Option<Action> {
        Some(Action::Double)
    }
    fn insure(&mut self, _dealer_upcards: &[Card], _hand: &[Card]) -> bool {
        false
    }
}

#[test]
fn deal_alternates_and_shows_second_dealer_card() {
    // dealer 3 + 5 draws the ten and stands on 18
    let mut t = table_with("2S 3D 4H 5C TS 9H", Box::new(Scripted::new(1)));
    t.play_round().unwrap();
    assert_eq!(t.players()[0].hands()[0].cards(), cards("2S 4H").as_slice());
    assert_eq!(t.dealer_cards(), cards("3D 5C TS").as_slice());
    assert_eq!(t.shown_cards(), cards("5C").as_slice());
    assert_eq!(t.shoe().cards_left(), 1);
}

#[test]
fn running_the_shoe_dry_is_fatal() {
    let mut t = table_with("2S 3D 4H 5C", Box::new(Scripted::new(1)));
    assert!(matches!(t.play_round(), Err(TableError::Fatal(_))));
}

#[test]
fn missing_decision_is_fatal() {
    let seat = Scripted::new(1).actions(&[None]);
    let mut t = table_with("TS TD 6H 7C", Box::new(seat));
    assert!(matches!(t.play_round(), Err(TableError::Fatal(_))));
}

#[test]
fn dealer_may_only_hit_or_stand() {
    let mut t = table_with("TS TD 6H 7C", Box::new(Scripted::new(1)));
    t.set_dealer(Box::new(DoublingDealer));
    assert!(matches!(t.play_round(), Err(TableError::Fatal(_))));
}

#[test]
fn player_strategy_cannot_deal() {
    let mut t = table_with("TS TD 6H 7C", Box::new(Scripted::new(1)));
    t.set_dealer(Box::new(Scripted::new(1)));
    assert!(matches!(t.play_round(), Err(TableError::Fatal(_))));
}

#[test]
fn hitting_to_twenty_one_ends_the_hand() {
    let seat = Scripted::new(1).actions(&[Some(Action::Hit), Some(Action::Hit)]);
    let events = seat.events();
    let mut t = table_with("TS TD 6H 7C 5D", Box::new(seat));
    t.play_round().unwrap();
    assert_eq!(events.borrow().plays.len(), 1);
    assert_eq!(t.players()[0].hands()[0].outcome(), Outcome::Win);
}

#[test]
fn natural_is_flagged_and_announced() {
    let seat = Scripted::new(2);
    let events = seat.events();
    let mut t = table_with("AS TD KH 7C", Box::new(seat));
    t.play_round().unwrap();
    let ev = events.borrow();
    assert_eq!(ev.player_blackjacks, 1);
    assert!(ev.plays.is_empty());
    assert_eq!(ev.summaries.len(), 1);
    let (dealer, hands) = &ev.summaries[0];
    assert_eq!(dealer, &cards("TD 7C"));
    assert_eq!(hands[0].outcome(), Outcome::Win);
}

#[test]
fn dealer_soft_seventeen_rule_is_configurable() {
    let deal = "TS AD 9H 6C 2S";
    let mut stands = table_with(deal, Box::new(Scripted::new(1)));
    stands.play_round().unwrap();
    assert_eq!(stands.dealer_cards().len(), 2);
    assert_eq!(stands.players()[0].hands()[0].outcome(), Outcome::Win);

    let config = TableConfig { dealer_hits_soft_17: true, ..TableConfig::default() };
    let mut hits = Table::with_shoe(config, Shoe::prearranged(cards(deal)));
    hits.add_player(Box::new(Scripted::new(1)));
    hits.play_round().unwrap();
    assert_eq!(hits.dealer_cards().len(), 3);
    assert_eq!(hits.players()[0].hands()[0].outcome(), Outcome::Push);
}

#[test]
fn every_seat_hears_about_a_shuffle() {
    // a single deck always sits under the stopper, so every round reshuffles
    let config = TableConfig::default().with_decks(1).with_seed(11);
    let mut t = Table::new(config).unwrap();
    let a = Scripted::new(1);
    let b = Scripted::new(1);
    let (ea, eb) = (a.events(), b.events());
    t.add_player(Box::new(a));
    t.add_player(Box::new(b));
    t.play_rounds(5).unwrap();
    assert_eq!(ea.borrow().shuffles, 5);
    assert_eq!(eb.borrow().shuffles, 5);
    assert_eq!(t.rounds(), 5);
}

#[test]
fn hands_played_counts_rounds() {
    let mut t = Table::new(TableConfig::default().with_seed(3)).unwrap();
    let seat = t.add_player(Box::new(Scripted::new(1)));
    t.play_rounds(25).unwrap();
    assert_eq!(t.player(seat).unwrap().hands_played(), 25);
    assert_eq!(t.recorded(), 25);
}

#[test]
fn bad_deck_counts_fail_construction() {
    let zero = TableConfig::default().with_decks(0);
    assert!(matches!(Table::new(zero), Err(TableError::Shoe(_))));
    let huge = TableConfig::default().with_decks(2000);
    assert!(matches!(Table::new(huge), Err(TableError::Shoe(_))));
}
