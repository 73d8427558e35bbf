//! # CLI Behavior
//!
//! This is **one possible client** for neatline, not the application itself. It works on
//! an exhibit *bundle*: a directory holding `exhibits.json`, `records.json` and an
//! optional `catalog.json` with item metadata, WMS layers and feature shapes.
//!
//! ## Read Commands
//!
//! - `neatline render <bundle> [exhibit-id]`: map and timeline payloads (all exhibits
//!   when no id is given)
//! - `neatline form <bundle> <record-id>`: the edit form of a record
//! - `neatline new-form <bundle> <exhibit-id> <item-id>`: form defaults for a record
//!   created from a catalog item
//! - `neatline defaults [--template]`: the effective system style defaults
//!
//! ## Write Commands
//!
//! - `neatline create <bundle> <exhibit-id> [--item <id>]`
//! - `neatline update <bundle> <record-id> <json>`: apply an editor submission
//! - `neatline delete <bundle> <record-id>`: delete and re-parent children
//!
//! Write commands print the command messages and the affected records.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Context setup and dispatch
//! - `render`: JSON output

mod commands;
mod render;
pub mod setup;

pub use commands::run;
