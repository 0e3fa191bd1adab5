//! Hand evaluation and shoe tests.

use bjtable::{Card, DealerHand, Hand, HandStatus, Rank, Shoe, Suit};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn card(rank: Rank) -> Card {
    Card::new(Suit::Spades, rank)
}

fn hand_of(ranks: &[Rank]) -> Hand {
    let mut hand = Hand::new(10);
    for &rank in ranks {
        hand.add_card(card(rank));
    }
    hand
}

/// Best total over every way of counting the aces, and whether that total
/// counts an ace as 11.
fn brute_force(cards: &[Card]) -> (u8, bool) {
    let hard: u8 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() })
        .sum();
    let aces = cards.iter().filter(|c| c.is_ace()).count();

    // Each ace promoted from 1 to 11 adds ten.
    (0..=aces)
        .rev()
        .map(|high| (hard + 10 * high as u8, high > 0))
        .find(|&(total, _)| total <= 21)
        .unwrap_or((hard, false))
}

#[test]
fn totals_agree_with_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for _ in 0..5_000 {
        let len = rng.random_range(1..=8);
        let cards: Vec<Card> = (0..len)
            .map(|_| {
                let rank = Rank::ALL[rng.random_range(0..13)];
                let suit = Suit::ALL[rng.random_range(0..4)];
                Card::new(suit, rank)
            })
            .collect();

        let mut hand = Hand::new(10);
        let mut dealer = DealerHand::new();
        for &c in &cards {
            hand.add_card(c);
            dealer.add_card(c);
        }

        let (total, soft) = brute_force(&cards);
        assert_eq!(hand.value(), total, "{cards:?}");
        assert_eq!(hand.is_soft(), soft, "{cards:?}");
        assert_eq!(hand.is_bust(), total > 21, "{cards:?}");
        assert_eq!(dealer.value(), total, "{cards:?}");
        assert_eq!(dealer.is_soft(), soft, "{cards:?}");
    }
}

#[test]
fn soft_and_hard_totals() {
    let soft = hand_of(&[Rank::Ace, Rank::Six]);
    assert_eq!(soft.value(), 17);
    assert!(soft.is_soft());

    let hard = hand_of(&[Rank::Ace, Rank::Six, Rank::King]);
    assert_eq!(hard.value(), 17);
    assert!(!hard.is_soft());

    let aces = hand_of(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ace]);
    assert_eq!(aces.value(), 14);
    assert!(aces.is_soft());
}

#[test]
fn bust_sets_status() {
    let hand = hand_of(&[Rank::King, Rank::Six, Rank::Queen]);
    assert_eq!(hand.value(), 26);
    assert!(hand.is_bust());
    assert_eq!(hand.status(), HandStatus::Busted);
}

#[test]
fn natural_is_blackjack() {
    let hand = hand_of(&[Rank::Ace, Rank::King]);
    assert!(hand.is_blackjack());

    let three_card = hand_of(&[Rank::Seven, Rank::Seven, Rank::Seven]);
    assert_eq!(three_card.value(), 21);
    assert!(!three_card.is_blackjack());
}

#[test]
fn split_twenty_one_is_not_blackjack() {
    let mut hand = Hand::from_split(card(Rank::Ace), 10, 0);
    hand.add_card(card(Rank::King));
    assert_eq!(hand.value(), 21);
    assert!(!hand.is_blackjack());
    assert!(hand.is_split_aces());

    let mut original = hand_of(&[Rank::Ace, Rank::Ace]);
    let moved = original.take_split_card().unwrap();
    assert!(moved.is_ace());
    original.add_card(card(Rank::Queen));
    assert!(original.is_from_split());
    assert!(!original.is_blackjack());
}

#[test]
fn pairs_split_by_value() {
    assert!(hand_of(&[Rank::King, Rank::Ten]).can_split());
    assert!(hand_of(&[Rank::Eight, Rank::Eight]).can_split());
    assert!(!hand_of(&[Rank::Eight, Rank::Nine]).can_split());
    assert!(!hand_of(&[Rank::Eight, Rank::Eight, Rank::Two]).can_split());
}

#[test]
fn take_split_card_recomputes_total() {
    let mut hand = hand_of(&[Rank::Ace, Rank::Ace]);
    assert_eq!(hand.value(), 12);

    hand.take_split_card().unwrap();
    assert_eq!(hand.value(), 11);
    assert!(hand.is_soft());
    assert_eq!(hand.len(), 1);
}

#[test]
fn double_wager_tracks_house_funds() {
    let mut paid = Hand::new(10);
    paid.double_wager(false);
    assert_eq!((paid.bet(), paid.free_bet(), paid.wager()), (20, 0, 20));

    let mut free = Hand::new(10);
    free.double_wager(true);
    assert_eq!((free.bet(), free.free_bet(), free.wager()), (10, 10, 20));
}

#[test]
fn dealer_hole_card_hidden_until_revealed() {
    let mut dealer = DealerHand::new();
    dealer.add_card(card(Rank::Ten));
    dealer.add_card(card(Rank::Ace));

    assert_eq!(dealer.visible_cards().len(), 1);
    assert_eq!(dealer.visible_value(), 10);
    assert!(dealer.can_have_blackjack());
    assert!(dealer.is_blackjack());

    dealer.reveal_hole();
    assert_eq!(dealer.visible_cards().len(), 2);
    assert_eq!(dealer.visible_value(), 21);
}

#[test]
fn single_deck_reshuffle_threshold() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut shoe = Shoe::build(1, 0.75, &mut rng);
    assert_eq!(shoe.total(), 52);

    for _ in 0..39 {
        shoe.draw().unwrap();
    }
    assert_eq!(shoe.remaining(), 13);
    assert!(!shoe.needs_reshuffle());

    shoe.draw().unwrap();
    assert_eq!(shoe.remaining(), 12);
    assert!(shoe.needs_reshuffle());
}

#[test]
fn shoe_holds_every_card_once_per_deck() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut shoe = Shoe::build(6, 0.75, &mut rng);
    assert_eq!(shoe.total(), 6 * 52);

    let mut counts = std::collections::HashMap::new();
    while let Ok(card) = shoe.draw() {
        *counts.entry(card).or_insert(0) += 1;
    }
    assert_eq!(counts.len(), 52);
    assert!(counts.values().all(|&n| n == 6));
}

#[test]
fn same_seed_same_order() {
    let a = Shoe::build(2, 0.75, &mut ChaCha8Rng::seed_from_u64(9));
    let b = Shoe::build(2, 0.75, &mut ChaCha8Rng::seed_from_u64(9));

    let draw_all = |mut shoe: Shoe| -> Vec<Card> {
        std::iter::from_fn(|| shoe.draw().ok()).collect()
    };
    assert_eq!(draw_all(a), draw_all(b));
}

#[test]
fn exhausted_shoe_errors() {
    let mut shoe = Shoe::stacked(&[card(Rank::Two)]);
    assert_eq!(shoe.draw().unwrap(), card(Rank::Two));
    assert!(shoe.draw().is_err());
    assert!(!shoe.needs_reshuffle());
}

#[test]
fn built_shoe_holds_at_least_one_deck() {
    let shoe = Shoe::build(0, 0.75, &mut ChaCha8Rng::seed_from_u64(4));
    assert_eq!(shoe.total(), 52);
    assert!(!shoe.is_stacked());
    assert!(Shoe::stacked(&[card(Rank::Two)]).is_stacked());
}
