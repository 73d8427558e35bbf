//! # Neatline Architecture
//!
//! Neatline exhibits are maps and timelines composed of annotated **records**. A record
//! carries geometry, text, a temporal range and a display style, and most of those
//! attributes are optional: an unset value is inherited from the record's parent record,
//! from the owning exhibit's defaults, or from the system defaults.
//!
//! This crate is the engine that turns stored records into what the exhibit viewer and
//! editor consume. It resolves the *effective* value of every attribute and emits the
//! payload projections (map feature, timeline event, edit form).
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the store, the catalog and the system defaults      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - render, form, create, update, delete                     │
//! │  - One index build + one catalog prefetch per render pass   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Serializer (serialize.rs)                                  │
//! │  - MapFeature / TimelineEvent / EditForm projections        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  RecordGraphIndex (index.rs) + AttributeResolver            │
//! │  (attributes/resolve.rs)                                    │
//! │  - Arena of records, pre-linked parents, cycle guard        │
//! │  - Pure fallback chains, no I/O                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/) + Catalog (catalog.rs)              │
//! │  - ExhibitStore trait, in-memory and bundle-file backends   │
//! │  - ItemCatalog trait, batched CatalogSnapshot               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Resolution Is a Pure Function
//!
//! Nothing below the command layer performs I/O. Records, their lineage, the exhibit,
//! catalog data and the system defaults are all passed in explicitly. The command layer
//! is responsible for loading everything a render pass needs up front:
//!
//! - all records of the exhibit, once, into a [`index::RecordGraphIndex`]
//! - catalog data for each *distinct* linked item, once, into a [`catalog::CatalogSnapshot`]
//!
//! The index and the snapshot are rebuilt for every request. Records may have been edited
//! between two requests, and a stale parent link would silently serve outdated styles.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`attributes`]: Style registry, style values and the resolver
//! - [`index`]: The per-pass record graph
//! - [`serialize`]: Payload projections
//! - [`catalog`]: External item metadata / WMS / feature lookups
//! - [`store`]: Storage abstraction, in-memory and file backends
//! - [`model`]: `Exhibit`, `Record` and the validating setters
//! - [`config`]: System style defaults
//! - [`error`]: Error types

pub mod api;
pub mod attributes;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod serialize;
pub mod store;
