use super::{Action, Strategy};
use crate::cards::Card;
use crate::config::DEFAULT_BUYIN;
use crate::hand::score;

/// House rules: stand on every 17, hit below.
#[derive(Debug, Clone, Copy, Default)]
pub struct DealerStandsSoft17;

/// House rules: hit soft 17, stand on hard 17 and above.
#[derive(Debug, Clone, Copy, Default)]
pub struct DealerHitsSoft17;

impl Strategy for DealerStandsSoft17 {
    fn name(&self) -> &'static str {
        "dealer"
    }
    fn get_buyin(&mut self) -> u32 {
        DEFAULT_BUYIN
    }
    fn get_bet(&mut self, _bankroll: u32, _cards_left: usize) -> u32 {
        1
    }
    fn play(&mut self, hand: &[Card], _dealer_upcards: &[Card]) -> Option<Action> {
        self.play_dealer(hand)
    }
    fn play_dealer(&mut self, hand: &[Card]) -> Option<Action> {
        Some(if score(hand).value >= 17 { Action::Stand } else { Action::Hit })
    }
    fn insure(&mut self, _dealer_upcards: &[Card], _hand: &[Card]) -> bool {
        false
    }
}

impl Strategy for DealerHitsSoft17 {
    fn name(&self) -> &'static str {
        "dealerhitssoft17"
    }
    fn get_buyin(&mut self) -> u32 {
        DEFAULT_BUYIN
    }
    fn get_bet(&mut self, _bankroll: u32, _cards_left: usize) -> u32 {
        1
    }
    fn play(&mut self, hand: &[Card], _dealer_upcards: &[Card]) -> Option<Action> {
        self.play_dealer(hand)
    }
    fn play_dealer(&mut self, hand: &[Card]) -> Option<Action> {
        let s = score(hand);
        Some(match s.value {
            17 if s.soft => Action::Hit,
            v if v >= 17 => Action::Stand,
            _ => Action::Hit,
        })
    }
    fn insure(&mut self, _dealer_upcards: &[Card], _hand: &[Card]) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    #[test]
    fn stands_on_all_seventeens() {
        let mut d = DealerStandsSoft17;
        assert_eq!(d.play_dealer(&cards("AS 6H")), Some(Action::Stand));
        assert_eq!(d.play_dealer(&cards("TS 7H")), Some(Action::Stand));
        assert_eq!(d.play_dealer(&cards("TS 6H")), Some(Action::Hit));
        assert_eq!(d.play_dealer(&cards("AS 5H")), Some(Action::Hit));
    }

    #[test]
    fn hits_soft_seventeen_only() {
        let mut d = DealerHitsSoft17;
        assert_eq!(d.play_dealer(&cards("AS 6H")), Some(Action::Hit));
        assert_eq!(d.play_dealer(&cards("AS 2H 4D")), Some(Action::Hit));
        assert_eq!(d.play_dealer(&cards("TS 7H")), Some(Action::Stand));
        assert_eq!(d.play_dealer(&cards("AS 7H")), Some(Action::Stand));
        assert_eq!(d.play_dealer(&cards("9S 6H")), Some(Action::Hit));
    }

    #[test]
    fn seated_dealers_play_their_own_rules() {
        let mut d = DealerStandsSoft17;
        assert_eq!(d.play(&cards("TS 6H"), &cards("AD")), Some(Action::Hit));
        assert_eq!(d.get_bet(10, 10), 1);
        assert!(!d.insure(&cards("AD"), &cards("TS 6H")));
    }
}
