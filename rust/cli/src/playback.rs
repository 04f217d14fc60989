//! Timed playback of an engine run.
//!
//! A [`Playback`] owns one engine and advances it a fixed number of steps per
//! tick. It can be paused, resumed and re-timed between ticks; it never steps
//! a finished engine.

use crate::cli::Speed;
use stablerace_engine::engine::Engine;
use stablerace_engine::logger::EventLog;
use stablerace_engine::snapshot::Snapshot;
use std::time::Duration;

/// How often the driver ticks and how many steps each tick applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub interval: Duration,
    pub steps_per_tick: u32,
}

impl Cadence {
    pub fn new(interval_ms: u64, steps_per_tick: u32) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            steps_per_tick: steps_per_tick.max(1),
        }
    }
}

impl From<Speed> for Cadence {
    fn from(speed: Speed) -> Self {
        match speed {
            Speed::Normal => Cadence::new(800, 1),
            Speed::Double => Cadence::new(450, 1),
            Speed::Fast => Cadence::new(180, 2),
            Speed::Instant => Cadence::new(30, 8),
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone)]
pub struct Tick {
    /// Event lines produced during this tick, oldest first
    pub events: Vec<String>,
    /// Steps actually applied
    pub steps: u32,
    pub snapshot: Snapshot,
}

impl Tick {
    pub fn finished(&self) -> bool {
        self.snapshot.is_done()
    }
}

pub struct Playback {
    engine: Engine,
    cadence: Cadence,
    paused: bool,
    ticks: u64,
    log: EventLog,
}

impl Playback {
    pub fn new(engine: Engine, cadence: Cadence) -> Self {
        Self {
            engine,
            cadence,
            paused: false,
            ticks: 0,
            log: EventLog::default(),
        }
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Takes effect from the next tick.
    pub fn set_cadence(&mut self, cadence: Cadence) {
        self.cadence = cadence;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_done(&self) -> bool {
        self.engine.is_done()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Applies up to `steps_per_tick` steps, stopping early at `done`.
    /// A paused or finished playback returns the current snapshot untouched.
    pub fn tick(&mut self) -> Tick {
        self.ticks += 1;
        let mut events = Vec::new();
        let mut steps = 0;
        if !self.is_paused() {
            while steps < self.cadence.steps_per_tick && !self.engine.is_done() {
                let snap = self.engine.step();
                self.log.extend_from(&snap);
                events.extend(snap.events);
                steps += 1;
            }
        }
        Tick {
            events,
            steps,
            snapshot: self.engine.snapshot(),
        }
    }
}
