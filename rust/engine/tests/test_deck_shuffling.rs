use std::collections::HashSet;

use stablerace_engine::cards::{build_shoe, Card, Rank, Suit};
use stablerace_engine::deck::Deck;
use stablerace_engine::player::Player;
use stablerace_engine::rng::{Mulberry32, SequenceSource};

#[test]
fn single_deck_has_44_unique_cards() {
    let mut deck = Deck::shoe(1);
    let mut set = HashSet::new();
    for i in 0..44 {
        let c = deck.deal_card().expect("should have 44 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(deck.deal_card().is_none(), "after 44 cards, deck should be empty");
}

#[test]
fn shoe_repeats_each_card_per_deck() {
    let shoe = build_shoe(3);
    assert_eq!(shoe.len(), 132);
    let queen_of_spades = Card {
        suit: Suit::Spades,
        rank: Rank::Queen,
    };
    assert_eq!(shoe.iter().filter(|&&c| c == queen_of_spades).count(), 3);
    assert_eq!(shoe.iter().filter(|c| c.value() == 7).count(), 12);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::shoe(1);
    let mut d2 = Deck::shoe(1);
    d1.shuffle(&mut Mulberry32::new(12345));
    d2.shuffle(&mut Mulberry32::new(12345));
    assert_eq!(d1.cards(), d2.cards(), "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::shoe(1);
    let mut d2 = Deck::shoe(1);
    d1.shuffle(&mut Mulberry32::new(1));
    d2.shuffle(&mut Mulberry32::new(2));
    assert_ne!(
        d1.cards(),
        d2.cards(),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn shuffle_with_top_draws_keeps_order() {
    // A draw just below 1.0 always picks j == i, so nothing moves.
    let mut deck = Deck::shoe(1);
    let before = deck.cards().to_vec();
    deck.shuffle(&mut SequenceSource::new(vec![0.999_999_999]));
    assert_eq!(deck.cards(), &before[..]);
}

#[test]
fn round_robin_gives_extra_cards_to_earlier_players() {
    let mut deck = Deck::shoe(1);
    let mut a = Player::new(1, 100);
    let mut b = Player::new(2, 100);
    let mut c = Player::new(3, 100);
    {
        let mut seats = vec![&mut a, &mut b, &mut c];
        deck.deal_round_robin(&mut seats);
    }
    assert_eq!(deck.remaining(), 0);
    assert_eq!(
        (a.hand().len(), b.hand().len(), c.hand().len()),
        (15, 15, 14)
    );
    // Dealt from the end of the unshuffled deck.
    assert_eq!(
        a.hand()[0],
        Card {
            suit: Suit::Spades,
            rank: Rank::Queen
        }
    );
}
