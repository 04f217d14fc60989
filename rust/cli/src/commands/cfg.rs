//! Configuration command handler.
//!
//! Prints the resolved game configuration as JSON, each value paired with
//! the layer it came from.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "players": {
//!     "value": 4,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::cli::GameArgs;
use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if the config file cannot be read or parsed,
/// or if the resolved values fail validation.
pub fn handle_cfg_command(game: &GameArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::resolve(game)?;
    let display = serde_json::json!({
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "starting_tokens": {
            "value": config.starting_tokens,
            "source": sources.starting_tokens,
        },
        "rounds": {
            "value": config.rounds,
            "source": sources.rounds,
        },
        "decks": {
            "value": config.decks,
            "source": sources.decks,
        },
        "fee_multiplier": {
            "value": config.fee_multiplier,
            "source": sources.fee_multiplier,
        },
        "no_cap": {
            "value": config.no_cap,
            "source": sources.no_cap,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
