//! Export command: write a game's token history.
//!
//! Runs one game to completion and writes every player's token checkpoints.
//! Series that stopped early are held at their last value so all columns have
//! the same length.
//!
//! ## Supported Formats
//!
//! - **CSV**: `checkpoint,P1,P2,...` header, one row per checkpoint
//! - **JSON**: object keyed by player id, each value an array of balances

use crate::cli::{ExportFormat, GameArgs};
use crate::config;
use crate::error::CliError;
use crate::formatters::history_csv;
use crate::io_utils::write_text;
use stablerace_engine::engine::Engine;
use std::io::Write;
use std::path::Path;

pub fn handle_export_command(
    game: &GameArgs,
    format: ExportFormat,
    output: Option<String>,
    max_steps: u64,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::resolve(game)?;
    let mut engine = Engine::new(resolved.config)?;
    let last = engine.run_until_done(max_steps);
    if !last.is_done() {
        return Err(CliError::Interrupted(format!(
            "run did not finish within {} steps",
            max_steps
        )));
    }

    let series = engine.history().padded();
    let body = match format {
        ExportFormat::Csv => history_csv(&series),
        ExportFormat::Json => {
            let mut s = serde_json::to_string_pretty(&series)?;
            s.push('\n');
            s
        }
    };

    match output {
        Some(p) => {
            write_text(Path::new(&p), &body)
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            writeln!(
                out,
                "Exported {} checkpoints for {} players to {}",
                engine.history().checkpoints(),
                series.len(),
                p
            )?;
        }
        None => out.write_all(body.as_bytes())?,
    }
    Ok(())
}
