use crate::cards::{build_shoe, Card};
use crate::player::Player;
use crate::rng::RandomSource;

/// The shoe for a single round: `decks` copies of the 44-card deck.
///
/// Cards are dealt from the end of the underlying vector, so the order after
/// [`Deck::shuffle`] fully determines every hand.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn shoe(decks: u32) -> Self {
        Self {
            cards: build_shoe(decks),
        }
    }

    /// Fisher–Yates from the last index down, one draw per swap.
    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) {
        for i in (1..self.cards.len()).rev() {
            let j = (rng.next_f64() * (i + 1) as f64) as usize;
            self.cards.swap(i, j.min(i));
        }
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deals every remaining card one at a time in rotation, starting with the
    /// first player. Earlier players take the extra cards when the shoe does
    /// not divide evenly.
    pub fn deal_round_robin(&mut self, players: &mut [&mut Player]) {
        if players.is_empty() {
            return;
        }
        let mut idx = 0;
        while let Some(c) = self.deal_card() {
            players[idx % players.len()].give_card(c);
            idx += 1;
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
