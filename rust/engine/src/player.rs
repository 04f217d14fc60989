use crate::cards::Card;

/// A seat at the table: token balance, current hand and elimination flag.
/// Ids are 1-based and stable for the lifetime of an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Player identifier (1-based)
    id: u32,
    /// Current token balance
    tokens: u64,
    /// Cards held this round; order is irrelevant
    hand: Vec<Card>,
    /// Set once the balance hits zero and never cleared
    eliminated: bool,
}

impl Player {
    pub fn new(id: u32, tokens: u64) -> Self {
        Self {
            id,
            tokens,
            hand: Vec::new(),
            eliminated: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
    pub fn tokens(&self) -> u64 {
        self.tokens
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn eliminated(&self) -> bool {
        self.eliminated
    }

    pub fn give_card(&mut self, c: Card) {
        self.hand.push(c);
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    pub fn count_value(&self, value: u8) -> u32 {
        self.hand.iter().filter(|c| c.value() == value).count() as u32
    }

    /// Removes every card of `value`, returning how many were held.
    pub fn discard_value(&mut self, value: u8) -> u32 {
        let before = self.hand.len();
        self.hand.retain(|c| c.value() != value);
        (before - self.hand.len()) as u32
    }

    /// Pays up to `amount`, never going below zero. Returns the amount actually paid.
    pub fn pay(&mut self, amount: u64) -> u64 {
        let paid = amount.min(self.tokens);
        self.tokens -= paid;
        paid
    }

    pub fn award(&mut self, amount: u64) {
        self.tokens = self.tokens.saturating_add(amount);
    }

    /// Marks the player eliminated if broke. Returns true only on the transition.
    pub fn eliminate_if_broke(&mut self) -> bool {
        if !self.eliminated && self.tokens == 0 {
            self.eliminated = true;
            return true;
        }
        false
    }
}
