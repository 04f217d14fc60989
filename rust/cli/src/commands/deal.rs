//! Deal command handler for single round dealing and display.
//!
//! Starts the first round of a game and prints every player's hand, which is
//! handy for checking a seed's deal before watching the full run.

use crate::cli::GameArgs;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_hand, format_holdings};
use stablerace_engine::engine::Engine;
use std::io::Write;

/// Handle the deal command.
///
/// Applies exactly one engine step, which shuffles the shoe and deals it
/// round-robin, then prints one line per player with their hand in dealt
/// order followed by a count of cards per horse.
pub fn handle_deal_command(game: &GameArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::resolve(game)?;
    let decks = resolved.config.decks;
    let mut engine = Engine::new(resolved.config)?;
    let snap = engine.step();

    let dealt: usize = snap.players.iter().map(|p| p.hand.len()).sum();
    writeln!(
        out,
        "Round {}: {} cards from {} deck(s) to {} players",
        snap.round,
        dealt,
        decks,
        snap.players.len()
    )?;
    for p in &snap.players {
        writeln!(out, "P{} ({}): {}", p.id, p.hand.len(), format_hand(&p.hand))?;
        writeln!(out, "    {}", format_holdings(&p.hand))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(seed: Option<u64>) -> GameArgs {
        GameArgs {
            players: Some(3),
            decks: Some(2),
            seed,
            ..GameArgs::default()
        }
    }

    #[test]
    fn test_deal_command_output_format() {
        let mut out = Vec::new();
        handle_deal_command(&args(Some(7)), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Round 1: 88 cards from 2 deck(s) to 3 players");
        assert!(lines[1].starts_with("P1 (30): "));
        assert!(lines[3].starts_with("P2 (29): "));
        assert!(lines[5].starts_with("P3 (29): "));
    }

    #[test]
    fn test_deal_command_deterministic() {
        let mut out1 = Vec::new();
        let mut out2 = Vec::new();

        handle_deal_command(&args(Some(12345)), &mut out1).unwrap();
        handle_deal_command(&args(Some(12345)), &mut out2).unwrap();

        assert_eq!(out1, out2, "Same seed should produce identical output");
    }

    #[test]
    fn test_deal_command_without_seed() {
        let mut out = Vec::new();
        assert!(handle_deal_command(&args(None), &mut out).is_ok());
    }
}
