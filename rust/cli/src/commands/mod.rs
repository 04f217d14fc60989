//! Command handler modules for the stablerace CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed as parameters
//! - Errors propagated via the `CliError` enum

pub mod cfg;
pub mod deal;
pub mod export;
pub mod rng;
pub mod sim;
pub mod watch;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use export::handle_export_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;
pub use watch::{WatchOptions, handle_watch_command};
