//! Owned, serializable views of engine state handed to presentation layers.
//!
//! Everything here is a structural copy; holding a [`Snapshot`] never aliases
//! engine internals, so later steps cannot change it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};
use crate::dice::Roll;
use crate::game::Stage;
use crate::player::Player;

/// A card as shown to clients, with its horse value spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub rank: Rank,
    pub suit: Suit,
    pub value: u8,
}

impl From<&Card> for CardView {
    fn from(c: &Card) -> Self {
        Self {
            rank: c.rank,
            suit: c.suit,
            value: c.value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: u32,
    pub tokens: u64,
    pub eliminated: bool,
    pub hand: Vec<CardView>,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id(),
            tokens: p.tokens(),
            eliminated: p.eliminated(),
            hand: p.hand().iter().map(CardView::from).collect(),
        }
    }
}

/// One winner's share of a race pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub id: u32,
    pub cards: u32,
    pub amount: u64,
}

/// How the pot was split when a horse won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// Step on which the horse won
    pub step: u64,
    pub round: u32,
    pub horse: u8,
    pub pot: u64,
    pub payouts: Vec<Payout>,
    pub leftover: u64,
}

impl Settlement {
    pub fn paid(&self) -> u64 {
        self.payouts.iter().map(|p| p.amount).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Round being played, or the one just finished while `round-complete`
    pub round: u32,
    pub stage: Stage,
    /// Non-terminal steps applied so far
    pub step: u64,
    pub players: Vec<PlayerView>,
    pub board: BTreeMap<u8, u32>,
    pub progress: BTreeMap<u8, i32>,
    pub stabled: Vec<u8>,
    pub pot: u64,
    pub last_event: String,
    /// Every event of the most recent step, oldest first
    pub events: Vec<String>,
    pub history: BTreeMap<u32, Vec<u64>>,
    pub last_roll: Option<Roll>,
    pub last_settlement: Option<Settlement>,
}

impl Snapshot {
    pub fn total_tokens(&self) -> u64 {
        self.players.iter().map(|p| p.tokens).sum()
    }

    pub fn alive(&self) -> impl Iterator<Item = &PlayerView> {
        self.players.iter().filter(|p| !p.eliminated)
    }

    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }
}
