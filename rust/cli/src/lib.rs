//! # stablerace CLI Library
//!
//! Command-line front end for the stabling-and-racing simulation engine:
//! batch runs, timed playback, history export and inspection tools.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["stablerace", "sim", "--players", "4", "--seed", "42"];
//! let code = stablerace_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Run a game to completion, optionally writing a JSONL trace
//! - `watch`: Play a game back tick by tick at a chosen speed
//! - `export`: Write per-player token history as CSV or JSON
//! - `cfg`: Display the resolved configuration and its sources
//! - `rng`: Print the first values of the seeded random stream
//! - `deal`: Deal one round and print every hand

use clap::Parser;
use std::io::Write;
#[macro_use]
mod macros;
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod playback;
pub mod ui;

use cli::{Commands, StableraceCli};
use commands::{
    WatchOptions, handle_cfg_command, handle_deal_command, handle_export_command,
    handle_rng_command, handle_sim_command, handle_watch_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "watch", "export", "cfg", "rng", "deal"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when a run is cut short
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["stablerace", "deal", "--players", "3", "--seed", "42"];
/// let code = stablerace_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match StableraceCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => print_usage(err, &e),
            };
        }
    };

    let result = match cli.cmd {
        Commands::Sim {
            game,
            max_steps,
            output,
            snapshot,
        } => handle_sim_command(&game, max_steps, output, snapshot, out, err),
        Commands::Watch {
            game,
            speed,
            interval_ms,
            steps_per_tick,
            max_ticks,
            board,
        } => handle_watch_command(
            &game,
            WatchOptions {
                speed,
                interval_ms,
                steps_per_tick,
                max_ticks,
                show_board: board,
            },
            out,
            err,
        ),
        Commands::Export {
            game,
            format,
            output,
            max_steps,
        } => handle_export_command(&game, format, output, max_steps, out),
        Commands::Cfg { game } => handle_cfg_command(&game, out),
        Commands::Rng { seed, count } => handle_rng_command(seed, count, out),
        Commands::Deal { game } => handle_deal_command(&game, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn print_usage(err: &mut dyn Write, e: &clap::Error) -> i32 {
    write_or_exit!(err, "{}", e);
    write_or_exit!(err, "");
    write_or_exit!(err, "Stablerace CLI");
    write_or_exit!(err, "Usage: stablerace <command> [options]\n");
    write_or_exit!(err, "Commands:");
    for c in COMMANDS {
        write_or_exit!(err, "  {}", c);
    }
    write_or_exit!(err, "\nFor full help, run: stablerace --help");
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_command_parses() {
        let commands = vec![
            vec!["stablerace", "sim"],
            vec!["stablerace", "watch", "--speed", "fast", "--board"],
            vec!["stablerace", "export", "--format", "json"],
            vec!["stablerace", "cfg"],
            vec!["stablerace", "rng", "--seed", "1"],
            vec!["stablerace", "deal", "--players", "3"],
        ];
        assert_eq!(commands.len(), COMMANDS.len());
        for (cmd_args, name) in commands.iter().zip(COMMANDS) {
            assert_eq!(cmd_args[1], *name);
            let result = StableraceCli::try_parse_from(cmd_args);
            assert!(result.is_ok(), "Failed to parse: {:?}", cmd_args);
        }
    }

    #[test]
    fn test_shared_game_flags_flatten() {
        let cli = StableraceCli::try_parse_from([
            "stablerace",
            "sim",
            "--players",
            "5",
            "--tokens",
            "20",
            "--no-cap",
            "--fee",
            "2",
            "--decks",
            "3",
            "--seed",
            "7",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Sim { game, .. } => {
                assert_eq!(game.players, Some(5));
                assert_eq!(game.tokens, Some(20));
                assert!(game.no_cap);
                assert_eq!(game.fee, Some(2));
                assert_eq!(game.decks, Some(3));
                assert_eq!(game.seed, Some(7));
                assert_eq!(game.rounds, None);
            }
            other => panic!("expected sim, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_command_lists_commands() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["stablerace", "bogus"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let stderr = String::from_utf8(err).unwrap();
        for c in COMMANDS {
            assert!(stderr.contains(&format!("  {}\n", c)));
        }
    }
}
