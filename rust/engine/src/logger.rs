use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::dice::Roll;
use crate::game::Stage;
use crate::snapshot::{Settlement, Snapshot};

/// Number of lines kept by [`EventLog`].
pub const EVENT_LOG_CAPACITY: usize = 200;

/// Rolling log of the most recent event lines; the oldest line is dropped
/// once the capacity is reached.
#[derive(Debug, Clone)]
pub struct EventLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Appends every event produced by the step that yielded `snap`.
    pub fn extend_from(&mut self, snap: &Snapshot) {
        for e in &snap.events {
            self.push(e.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// One line of a run trace.
/// Serialized to JSONL so a run can be inspected or diffed offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step counter after the step was applied
    pub step: u64,
    /// Seed of the run, when seeded
    pub seed: Option<u64>,
    pub round: u32,
    pub stage: Stage,
    pub roll: Option<Roll>,
    pub pot: u64,
    /// Token balance per player, in id order
    pub tokens: Vec<u64>,
    pub events: Vec<String>,
    /// Present on the step a horse won
    #[serde(default)]
    pub settlement: Option<Settlement>,
    /// Timestamp when the record was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl StepRecord {
    pub fn from_snapshot(snap: &Snapshot, seed: Option<u64>) -> Self {
        let settled_now = snap
            .last_settlement
            .as_ref()
            .filter(|s| s.step == snap.step)
            .cloned();
        Self {
            step: snap.step,
            seed,
            round: snap.round,
            stage: snap.stage,
            roll: snap.last_roll,
            pot: snap.pot,
            tokens: snap.players.iter().map(|p| p.tokens).collect(),
            events: snap.events.clone(),
            settlement: settled_now,
            ts: None,
        }
    }
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct RunLogger {
    writer: Option<BufWriter<File>>,
    written: u64,
}

impl RunLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            written: 0,
        })
    }

    /// A logger that counts records without writing them anywhere.
    pub fn sink() -> Self {
        Self {
            writer: None,
            written: 0,
        }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn write(&mut self, record: &StepRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
        }
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(w) = &mut self.writer {
            w.flush()?;
        }
        Ok(())
    }
}

impl Drop for RunLogger {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
