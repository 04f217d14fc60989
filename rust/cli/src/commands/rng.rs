//! The `rng` command: inspect the seeded random stream.
//!
//! Prints the first values drawn from the same generator a seeded engine
//! uses, so a run can be checked against another implementation draw by draw.

use crate::error::CliError;
use stablerace_engine::rng::Mulberry32;
use std::io::Write;

/// Prints `count` draws as raw `u32`, as the unit float the engine consumes,
/// and as the die face that float would produce.
///
/// Without a seed a random 32-bit seed is chosen and printed.
pub fn handle_rng_command(
    seed: Option<u64>,
    count: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if count == 0 {
        return Err(CliError::InvalidInput("count must be >= 1".to_string()));
    }
    let seed = seed.unwrap_or_else(|| u64::from(rand::random::<u32>()));
    let mut rng = Mulberry32::new(seed);
    writeln!(out, "RNG sample (seed {}):", seed)?;
    for i in 0..count {
        let raw = rng.next_u32();
        let unit = f64::from(raw) / 4_294_967_296.0;
        let face = (unit * 6.0).floor() as u8 + 1;
        writeln!(out, "{:>4} {:>10} {:.8} {}", i + 1, raw, unit, face)?;
    }
    Ok(())
}
