//! Simulation command: run one game to completion.
//!
//! Steps a single engine until it reaches `done`, optionally writing a JSONL
//! trace with one [`StepRecord`] per step, then prints a summary.
//!
//! # Examples
//!
//! ```no_run
//! use stablerace_cli::cli::GameArgs;
//! use stablerace_cli::commands::handle_sim_command;
//! use std::io;
//!
//! let game = GameArgs { seed: Some(42), ..GameArgs::default() };
//! handle_sim_command(&game, 1_000_000, Some("data/run.jsonl".into()), false, &mut io::stdout(), &mut io::stderr()).unwrap();
//! ```

use crate::cli::GameArgs;
use crate::config;
use crate::error::CliError;
use crate::formatters::format_settlement;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use stablerace_engine::engine::Engine;
use stablerace_engine::logger::{RunLogger, StepRecord};
use stablerace_engine::snapshot::Snapshot;
use std::io::Write;
use std::path::PathBuf;

/// Handle the sim command.
///
/// # Arguments
///
/// * `game` - Game flags layered over file and environment config
/// * `max_steps` - Step budget; the run is reported as interrupted if it is
///   exhausted before the engine finishes
/// * `output` - Optional JSONL trace path
/// * `snapshot` - Also print the final snapshot as pretty JSON
pub fn handle_sim_command(
    game: &GameArgs,
    max_steps: u64,
    output: Option<String>,
    snapshot: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if max_steps == 0 {
        return Err(CliError::InvalidInput("max-steps must be >= 1".to_string()));
    }
    let resolved = config::resolve(game)?;
    let seed = resolved.config.seed;
    let mut engine = Engine::new(resolved.config)?;

    let mut trace = match &output {
        Some(p) => {
            let path = PathBuf::from(p);
            ensure_parent_dir(&path).map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            RunLogger::create(&path)?
        }
        None => RunLogger::sink(),
    };

    let mut settled = 0u32;
    let mut applied = 0u64;
    let mut last = engine.snapshot();
    while !engine.is_done() && applied < max_steps {
        last = engine.step();
        applied += 1;
        if let Some(s) = &last.last_settlement
            && s.step == last.step
        {
            settled += 1;
        }
        trace.write(&StepRecord::from_snapshot(&last, seed))?;
    }
    trace.flush()?;

    write_summary(out, &last, seed, settled)?;
    if let Some(p) = &output {
        writeln!(out, "Trace: {} records written to {}", trace.written(), p)?;
    }
    if snapshot {
        writeln!(out, "{}", serde_json::to_string_pretty(&last)?)?;
    }

    if !last.is_done() {
        let msg = format!("step budget of {} reached before the run ended", max_steps);
        ui::display_warning(err, &msg)?;
        return Err(CliError::Interrupted(msg));
    }
    Ok(())
}

fn write_summary(
    out: &mut dyn Write,
    snap: &Snapshot,
    seed: Option<u64>,
    settled: u32,
) -> std::io::Result<()> {
    match seed {
        Some(s) => writeln!(out, "Seed: {}", s)?,
        None => writeln!(out, "Seed: random")?,
    }
    writeln!(out, "Steps: {}", snap.step)?;
    writeln!(out, "Round: {}", snap.round)?;
    writeln!(out, "Races settled: {}", settled)?;
    if let Some(s) = &snap.last_settlement {
        writeln!(out, "Last race: {}", format_settlement(s))?;
    }
    let survivors: Vec<String> = snap.alive().map(|p| format!("P{}", p.id)).collect();
    if survivors.is_empty() {
        writeln!(out, "Survivors: none")?;
    } else {
        writeln!(out, "Survivors: {}", survivors.join(", "))?;
    }
    let tokens: Vec<String> = snap
        .players
        .iter()
        .map(|p| format!("P{}={}", p.id, p.tokens))
        .collect();
    writeln!(out, "Tokens: {}", tokens.join(" "))?;
    writeln!(out, "Pot: {}", snap.pot)?;
    writeln!(out, "Stage: {}", snap.stage)?;
    writeln!(out, "Last event: {}", snap.last_event)?;
    Ok(())
}
