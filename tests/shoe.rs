use blackjack_sim::cards::{Card, Rank, Suit};
use blackjack_sim::shoe::{Shoe, DECK_SIZE};
use proptest::prelude::*;
use std::collections::HashMap;

fn drain(shoe: &mut Shoe) -> Vec<Card> {
    std::iter::from_fn(|| shoe.deal()).collect()
}

#[test]
fn every_card_appears_once_per_deck() {
    let mut shoe = Shoe::with_seed(2, 17).unwrap();
    for _ in 0..5 {
        let rest = drain(&mut shoe);
        assert_eq!(rest.len(), 2 * DECK_SIZE - 1);

        let mut seen: HashMap<Card, usize> = HashMap::new();
        for c in rest {
            *seen.entry(c).or_default() += 1;
        }
        // only the burn card is missing a copy
        assert_eq!(seen.len(), DECK_SIZE);
        assert_eq!(seen.values().filter(|&&n| n == 1).count(), 1);
        assert!(seen.values().all(|&n| n <= 2));
        for s in Suit::ALL {
            for r in Rank::ALL {
                assert!(seen.contains_key(&Card::new(r, s)));
            }
        }
        shoe.shuffle();
    }
}

#[test]
fn shuffles_reorder_the_shoe() {
    let mut shoe = Shoe::with_seed(6, 1).unwrap();
    let first = drain(&mut shoe);
    shoe.shuffle();
    let second = drain(&mut shoe);
    assert_ne!(first, second);
}

#[test]
fn different_seeds_diverge() {
    let a = drain(&mut Shoe::with_seed(6, 1).unwrap());
    let b = drain(&mut Shoe::with_seed(6, 2).unwrap());
    assert_ne!(a, b);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn stopper_stays_within_three_decks_of_the_end(decks in 1usize..12, seed in any::<u64>()) {
        let mut shoe = Shoe::with_seed(decks, seed).unwrap();
        for _ in 0..4 {
            prop_assert!(shoe.stopper() >= DECK_SIZE);
            prop_assert!(shoe.stopper() < 3 * DECK_SIZE);
            prop_assert_eq!(shoe.cards_left(), decks * DECK_SIZE - 1);
            prop_assert_eq!(shoe.stopper_reached(), shoe.stopper() > shoe.cards_left());
            shoe.shuffle();
        }
    }
}
