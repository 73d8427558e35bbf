//! # Neatline CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/neatline/` — Core library: resolution, indexing, serialization, commands
//! - `crates/neatline-cli/` — This tool, depends on the `neatline` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/neatline-cli/src/cli/)                   │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Bundle loading + dispatch (commands.rs)                  │
//! │  - JSON output (render.rs)                                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/neatline/src/api.rs)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/neatline/src/commands/*)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI owns argument parsing, config
//! discovery, logging setup, output and exit codes.
//!
//! ## Output Streams
//!
//! Payloads go to stdout as JSON. Log events go to stderr, so piping `neatline render`
//! into another tool always yields valid JSON.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
