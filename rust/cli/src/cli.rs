//! Command-line argument definitions.
//!
//! Parsed with clap derive; [`crate::run`] dispatches on [`Commands`].

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "stablerace",
    version,
    about = "Stabling & racing dice simulation"
)]
pub struct StableraceCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Game options shared by every command that builds an engine.
///
/// Each flag is optional so that unset flags fall through to the
/// environment, the config file, and finally the built-in defaults.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameArgs {
    /// Number of players (>= 2)
    #[arg(long)]
    pub players: Option<u32>,
    /// Starting tokens per player
    #[arg(long)]
    pub tokens: Option<u64>,
    /// Number of rounds before the run ends
    #[arg(long)]
    pub rounds: Option<u32>,
    /// Number of 44-card decks combined into the shoe
    #[arg(long)]
    pub decks: Option<u32>,
    /// Multiplier applied to every stabling fee
    #[arg(long)]
    pub fee: Option<u64>,
    /// Play until fewer than two players remain
    #[arg(long)]
    pub no_cap: bool,
    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a game to completion and print a summary
    Sim {
        #[command(flatten)]
        game: GameArgs,
        /// Upper bound on engine steps
        #[arg(long, default_value_t = 1_000_000)]
        max_steps: u64,
        /// Write one JSONL record per step to this file
        #[arg(long)]
        output: Option<String>,
        /// Print the final snapshot as JSON
        #[arg(long)]
        snapshot: bool,
    },
    /// Play a game back tick by tick, printing events as they happen
    Watch {
        #[command(flatten)]
        game: GameArgs,
        /// Playback speed preset
        #[arg(long, value_enum, default_value_t = Speed::Normal)]
        speed: Speed,
        /// Milliseconds between ticks (overrides the preset)
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Engine steps per tick (overrides the preset)
        #[arg(long)]
        steps_per_tick: Option<u32>,
        /// Stop after this many ticks even if the run has not ended
        #[arg(long)]
        max_ticks: Option<u64>,
        /// Draw the track after every tick of a race
        #[arg(long)]
        board: bool,
    },
    /// Run a game and write the per-player token history
    Export {
        #[command(flatten)]
        game: GameArgs,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Destination file; stdout when omitted
        #[arg(long)]
        output: Option<String>,
        #[arg(long, default_value_t = 1_000_000)]
        max_steps: u64,
    },
    /// Show the resolved configuration and where each value came from
    Cfg {
        #[command(flatten)]
        game: GameArgs,
    },
    /// Print the first values of the seeded random stream
    Rng {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// Deal one round and print every hand
    Deal {
        #[command(flatten)]
        game: GameArgs,
    },
}

/// Output format for the `export` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Playback presets for the `watch` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Speed {
    /// 1x: one step every 800 ms
    Normal,
    /// 2x: one step every 450 ms
    Double,
    /// 5x: two steps every 180 ms
    Fast,
    /// Eight steps every 30 ms
    Instant,
}

impl Speed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speed::Normal => "1x",
            Speed::Double => "2x",
            Speed::Fast => "5x",
            Speed::Instant => "instant",
        }
    }
}
