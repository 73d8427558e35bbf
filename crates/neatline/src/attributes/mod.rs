//! # Attribute System
//!
//! Records and exhibits share a set of **style fields** (colors, opacities, widths,
//! radii, point image). Each one is independently nullable, and a null value is filled in
//! by walking a fallback chain. This module provides:
//!
//! - **Specifications**: the registry of style fields and the kind of value each holds
//! - **Values**: the runtime representation of a style value
//! - **Style sets**: the nullable per-row storage shared by records and exhibits
//! - **Resolution**: the generic fallback chain and the per-attribute resolvers
//!
//! ## Fallback Chains
//!
//! | Attribute | Own value | Parent | Exhibit | Terminal |
//! |-----------|-----------|--------|---------|----------|
//! | style     | yes | parent's *resolved* value | exhibit default | system default |
//! | visible dates | yes | nearest ancestor's *own* value | - | `""` |
//! | title / description | yes | - | - | item metadata, then `""` |
//! | start / end date | yes | - | - | parsed item date, then `""` |
//! | geocoverage | yes | - | - | item features or coverage, then `""` |
//! | percentages | yes | - | - | `0` / `100` |
//!
//! ## Usage
//!
//! ```ignore
//! let lineage = index.lineage(record.id);
//! let color = resolve_style(&record, &lineage, exhibit, StyleName::VectorColor, &defaults);
//! ```

mod resolve;
mod spec;
mod styles;
mod value;

pub use resolve::{
    inherited_style, parse_date_range, resolve_date_range, resolve_description,
    resolve_geocoverage, resolve_percentages, resolve_slug, resolve_style, resolve_title,
    resolve_visible_date_range, title_or_description, Cascade, DateRange, ParentPolicy,
    Percentages, DEFAULT_LEFT_PERCENT, DEFAULT_RIGHT_PERCENT,
};
pub use spec::{StyleKind, StyleName, StyleSpec, STYLES};
pub use styles::StyleSet;
pub use value::StyleValue;
