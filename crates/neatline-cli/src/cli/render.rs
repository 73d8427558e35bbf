//! JSON output. Payloads are pretty-printed to stdout, one document per invocation.

use anyhow::{Context, Result};
use neatline::commands::{CmdResult, MessageLevel};
use serde::Serialize;
use tracing::warn;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{}", out);
    Ok(())
}

/// Print a write command's result. Warnings are also logged so they reach stderr.
pub fn print_result(result: &CmdResult) -> Result<()> {
    for message in &result.messages {
        if message.level == MessageLevel::Warning {
            warn!("{}", message.content);
        }
    }
    print_json(result)
}
