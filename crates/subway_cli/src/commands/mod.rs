pub mod line;
pub mod station;

use anyhow::Result;
use serde::Serialize;

/// Writes one service result to stdout as pretty JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
