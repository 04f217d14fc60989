use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::Player;

/// Token totals per player, one entry per checkpoint. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenHistory {
    series: BTreeMap<u32, Vec<u64>>,
}

impl TokenHistory {
    /// Starts every player's series at their current balance.
    pub fn seed(players: &[Player]) -> Self {
        Self {
            series: players.iter().map(|p| (p.id(), vec![p.tokens()])).collect(),
        }
    }

    /// Appends a checkpoint for every player.
    pub fn record(&mut self, players: &[Player]) {
        for p in players {
            self.series.entry(p.id()).or_default().push(p.tokens());
        }
    }

    /// Appends a checkpoint only if some player's balance differs from their
    /// last recorded value. Returns whether a checkpoint was written.
    pub fn record_if_changed(&mut self, players: &[Player]) -> bool {
        let changed = players
            .iter()
            .any(|p| self.latest(p.id()) != Some(p.tokens()));
        if changed {
            self.record(players);
        }
        changed
    }

    pub fn latest(&self, id: u32) -> Option<u64> {
        self.series.get(&id).and_then(|s| s.last().copied())
    }

    pub fn series(&self, id: u32) -> Option<&[u64]> {
        self.series.get(&id).map(Vec::as_slice)
    }

    pub fn checkpoints(&self) -> usize {
        self.series.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn as_map(&self) -> &BTreeMap<u32, Vec<u64>> {
        &self.series
    }

    /// Every series extended to the longest length by repeating its last value.
    pub fn padded(&self) -> BTreeMap<u32, Vec<u64>> {
        let len = self.checkpoints();
        self.series
            .iter()
            .map(|(&id, s)| {
                let mut v = s.clone();
                if let Some(&last) = s.last() {
                    v.resize(len, last);
                }
                (id, v)
            })
            .collect()
    }
}
