#![allow(dead_code)]

use blackjack_sim::cards::{parse_cards, Card};
use blackjack_sim::config::TableConfig;
use blackjack_sim::hand::Hand;
use blackjack_sim::shoe::Shoe;
use blackjack_sim::strategy::{Action, Strategy};
use blackjack_sim::table::Table;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid card list")
}

/// What a scripted seat was asked and told during a run.
#[derive(Debug, Default)]
pub struct Events {
    pub bets_asked: u32,
    pub buyins_asked: u32,
    pub plays: Vec<Vec<Card>>,
    pub insurance_offers: u32,
    pub shuffles: u32,
    pub dealer_blackjacks: u32,
    pub player_blackjacks: u32,
    pub summaries: Vec<(Vec<Card>, Vec<Hand>)>,
}

/// A seat that replays canned answers. Once a queue runs dry it falls back
/// to `default_bet`, a zero buy-in and `Stand`.
pub struct Scripted {
    pub bets: VecDeque<u32>,
    pub default_bet: u32,
    pub buyins: VecDeque<u32>,
    pub actions: VecDeque<Option<Action>>,
    pub insure: bool,
    pub events: Rc<RefCell<Events>>,
}

impl Scripted {
    pub fn new(bet: u32) -> Self {
        Self {
            bets: VecDeque::new(),
            default_bet: bet,
            buyins: VecDeque::from([100]),
            actions: VecDeque::new(),
            insure: false,
            events: Rc::default(),
        }
    }

    pub fn bets(mut self, bets: &[u32]) -> Self {
        self.bets = bets.iter().copied().collect();
        self
    }

    pub fn buyins(mut self, buyins: &[u32]) -> Self {
        self.buyins = buyins.iter().copied().collect();
        self
    }

    pub fn actions(mut self, actions: &[Option<Action>]) -> Self {
        self.actions = actions.iter().copied().collect();
        self
    }

    pub fn insuring(mut self) -> Self {
        self.insure = true;
        self
    }

    pub fn events(&self) -> Rc<RefCell<Events>> {
        Rc::clone(&self.events)
    }
}

impl Strategy for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }
    fn get_buyin(&mut self) -> u32 {
        self.events.borrow_mut().buyins_asked += 1;
        self.buyins.pop_front().unwrap_or(0)
    }
    fn get_bet(&mut self, _bankroll: u32, _cards_left: usize) -> u32 {
        self.events.borrow_mut().bets_asked += 1;
        self.bets.pop_front().unwrap_or(self.default_bet)
    }
    fn play(&mut self, hand: &[Card], _dealer_upcards: &[Card]) -> Option<Action> {
        self.events.borrow_mut().plays.push(hand.to_vec());
        self.actions.pop_front().unwrap_or(Some(Action::Stand))
    }
    fn insure(&mut self, _dealer_upcards: &[Card], _hand: &[Card]) -> bool {
        self.events.borrow_mut().insurance_offers += 1;
        self.insure
    }
    fn on_shuffle(&mut self) {
        self.events.borrow_mut().shuffles += 1;
    }
    fn on_dealer_blackjack(&mut self) {
        self.events.borrow_mut().dealer_blackjacks += 1;
    }
    fn on_player_blackjack(&mut self) {
        self.events.borrow_mut().player_blackjacks += 1;
    }
    fn on_round_summary(&mut self, dealer_cards: &[Card], hands: &[Hand]) {
        self.events.borrow_mut().summaries.push((dealer_cards.to_vec(), hands.to_vec()));
    }
}

/// A one-seat table dealing `deck` in order.
///
/// With a single seat the deal order is: player, dealer hole, player,
/// dealer upcard, then whatever play draws.
pub fn table_with(deck: &str, strategy: Box<dyn Strategy>) -> Table {
    let mut table = Table::with_shoe(TableConfig::default(), Shoe::prearranged(cards(deck)));
    table.add_player(strategy);
    table
}
