//! # Command Layer
//!
//! This module contains the **core business logic** of neatline. Each command lives in its
//! own submodule and implements plain Rust functions over the store and the catalog.
//!
//! ## Role and Responsibilities
//!
//! Commands are where the work happens:
//! - Load what a pass needs once (records, graph index, catalog snapshot)
//! - Drive the resolver and serializer
//! - Apply editor submissions through the validating setters
//! - Return structured payloads or a [`CmdResult`] with affected records and messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: No stdout, stderr, or formatting
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Testing Strategy
//!
//! **This is where most of the testing lives.** Command tests use `InMemoryStore`
//! fixtures and a `StaticCatalog`, and check both the returned data and what ended up in
//! the store.
//!
//! ## Command Modules
//!
//! - [`render`]: Map and timeline payloads for a whole exhibit
//! - [`form`]: Edit-form payloads, for saved records and for new records from an item
//! - [`create`]: Create an empty record in an exhibit
//! - [`update`]: Apply an editor submission to a record
//! - [`delete`]: Delete a record and re-parent its children
//! - [`helpers`]: The per-pass exhibit context

use crate::model::Record;
use serde::Serialize;

pub mod create;
pub mod delete;
pub mod form;
pub mod helpers;
pub mod render;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
