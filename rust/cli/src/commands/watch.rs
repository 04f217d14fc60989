//! Watch command: timed playback of a game.
//!
//! Drives a [`Playback`] at the chosen cadence, printing every event line as
//! it happens and the pot split whenever a horse wins. Playback stops issuing
//! steps once the engine reports `done`.

use crate::cli::{GameArgs, Speed};
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_settlement, format_track};
use crate::playback::{Cadence, Playback};
use crate::ui;
use stablerace_engine::engine::Engine;
use stablerace_engine::game::Stage;
use std::io::Write;

/// Timing options for [`handle_watch_command`].
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    pub speed: Speed,
    /// Overrides the preset interval
    pub interval_ms: Option<u64>,
    /// Overrides the preset step count
    pub steps_per_tick: Option<u32>,
    pub max_ticks: Option<u64>,
    /// Print the track after each tick that ends in a race
    pub show_board: bool,
}

impl WatchOptions {
    pub fn cadence(&self) -> Cadence {
        let preset = Cadence::from(self.speed);
        Cadence::new(
            self.interval_ms
                .unwrap_or(preset.interval.as_millis() as u64),
            self.steps_per_tick.unwrap_or(preset.steps_per_tick),
        )
    }
}

/// Handle the watch command.
///
/// Returns `CliError::Interrupted` if `max_ticks` ticks elapse before the run
/// ends.
pub fn handle_watch_command(
    game: &GameArgs,
    opts: WatchOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::resolve(game)?;
    let seed = resolved.config.seed;
    let fee = resolved.config.fee_multiplier;
    let engine = Engine::new(resolved.config)?;
    let cadence = opts.cadence();
    let mut playback = Playback::new(engine, cadence);

    writeln!(
        out,
        "Watching {} at {} ({} ms, {} step(s) per tick)",
        seed.map_or_else(|| "random seed".to_string(), |s| format!("seed {}", s)),
        opts.speed.as_str(),
        cadence.interval.as_millis(),
        cadence.steps_per_tick
    )?;

    loop {
        if let Some(max) = opts.max_ticks
            && playback.ticks() >= max
        {
            let msg = format!("stopped after {} ticks before the run ended", max);
            ui::display_warning(err, &msg)?;
            return Err(CliError::Interrupted(msg));
        }

        let tick = playback.tick();
        for line in &tick.events {
            writeln!(out, "{}", line)?;
        }
        let snap = &tick.snapshot;
        if let Some(s) = &snap.last_settlement
            && s.step == snap.step
            && tick.steps > 0
        {
            writeln!(out, "  {}", format_settlement(s))?;
        }
        if opts.show_board && tick.steps > 0 && snap.stage == Stage::Race {
            for line in format_track(snap, fee) {
                writeln!(out, "  {}", line)?;
            }
        }
        if tick.finished() {
            let tokens: Vec<String> = snap
                .players
                .iter()
                .map(|p| format!("P{}={}", p.id, p.tokens))
                .collect();
            writeln!(
                out,
                "Run ended after {} steps: {}",
                snap.step,
                tokens.join(" ")
            )?;
            writeln!(out, "Event log holds {} lines", playback.log().len())?;
            return Ok(());
        }
        out.flush()?;
        if !cadence.interval.is_zero() {
            std::thread::sleep(cadence.interval);
        }
    }
}
