use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::stabling_fee;
use crate::track::{required_steps, HORSES};

/// Horses stabled before the race begins.
pub const STABLE_SIZE: usize = 4;

/// Lifecycle of a round and of the whole run.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Constructed, nothing dealt yet
    Idle,
    /// Rolling until four distinct horses are stabled
    Stabling,
    /// Rolling to advance the unstabled horses
    Race,
    /// A horse has won; the next round has not been dealt
    RoundComplete,
    /// Terminal
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Stabling => "stabling",
            Stage::Race => "race",
            Stage::RoundComplete => "round-complete",
            Stage::Done => "done",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-round table state: stabled horses in order, race progress and the pot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    stabled: Vec<u8>,
    /// -1 marks a stabled horse
    progress: BTreeMap<u8, i32>,
    pot: u64,
}

impl RoundState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_for_round(&mut self) {
        self.stabled.clear();
        self.pot = 0;
        self.progress = HORSES.map(|h| (h, 0)).collect();
    }

    pub fn stabled(&self) -> &[u8] {
        &self.stabled
    }
    pub fn progress(&self) -> &BTreeMap<u8, i32> {
        &self.progress
    }
    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn is_stabled(&self, horse: u8) -> bool {
        self.tier_of(horse).is_some()
    }

    /// 1-based stabling tier of `horse`, `None` while it is still racing.
    pub fn tier_of(&self, horse: u8) -> Option<usize> {
        self.stabled.iter().position(|&h| h == horse).map(|idx| idx + 1)
    }

    pub fn is_full(&self) -> bool {
        self.stabled.len() >= STABLE_SIZE
    }

    /// Stables `horse` and returns its 1-based tier. No-op for a horse already stabled.
    pub fn stable(&mut self, horse: u8) -> usize {
        if let Some(tier) = self.tier_of(horse) {
            return tier;
        }
        self.stabled.push(horse);
        self.progress.insert(horse, -1);
        self.stabled.len()
    }

    pub fn fee_for(&self, horse: u8, multiplier: u64) -> Option<u64> {
        stabling_fee(horse, &self.stabled, multiplier)
    }

    /// Moves an unstabled horse one step. Returns `(progress, needed)`.
    pub fn advance(&mut self, horse: u8) -> (u32, u32) {
        debug_assert!(!self.is_stabled(horse), "stabled horse {horse} cannot advance");
        let needed = required_steps(horse).unwrap_or(u32::MAX);
        let entry = self.progress.entry(horse).or_insert(0);
        *entry += 1;
        (*entry as u32, needed)
    }

    pub fn add_to_pot(&mut self, amount: u64) {
        self.pot = self.pot.saturating_add(amount);
    }

    /// Empties the pot, returning what it held.
    pub fn take_pot(&mut self) -> u64 {
        std::mem::take(&mut self.pot)
    }
}
