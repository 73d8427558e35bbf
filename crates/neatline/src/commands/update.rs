//! Apply an editor form submission to a saved record.
//!
//! Every field of [`RecordUpdate`] is optional; absent fields leave the record alone.
//! Values go through the validating setters on [`Record`], so whitespace-only text
//! clears a field, the `"null"` geocoverage placeholder is ignored, and styles equal to
//! what the record would inherit are stored as null.
//!
//! The submission is applied to a copy and saved in one write. Hard failures (bad
//! percentages, a parent that would create a cycle) abort before anything is saved.
//! Soft failures (a taken slug) are reported as warnings and the rest is applied.

use serde::Deserialize;
use tracing::debug;

use crate::attributes::{inherited_style, StyleName, StyleSet};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::StyleDefaults;
use crate::error::{NeatlineError, Result};
use crate::index::RecordGraphIndex;
use crate::model::{ParentRef, Record, RecordId};
use crate::store::ExhibitStore;

/// An editor submission. Field names match the edit form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecordUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_visible_date: Option<String>,
    pub end_visible_date: Option<String>,
    pub geocoverage: Option<String>,
    pub map_bounds: Option<String>,
    pub map_zoom: Option<i64>,
    pub left_percent: Option<i64>,
    pub right_percent: Option<i64>,
    pub parent_record_id: Option<ParentRef>,
    #[serde(alias = "use_dc_metadata")]
    pub use_external_metadata: Option<bool>,
    pub show_bubble: Option<bool>,
    pub space_active: Option<bool>,
    pub time_active: Option<bool>,
    pub items_active: Option<bool>,
    #[serde(flatten)]
    pub styles: StyleSet,
    /// Clear every own style before applying `styles`.
    pub reset_styles: bool,
}

pub fn run<S: ExhibitStore>(
    store: &mut S,
    defaults: &StyleDefaults,
    record_id: RecordId,
    update: &RecordUpdate,
) -> Result<CmdResult> {
    let mut record = store.get_record(record_id)?;
    let mut result = CmdResult::default();

    let (exhibit, siblings) = match record.exhibit_id {
        Some(exhibit_id) => {
            let exhibit = match store.get_exhibit(exhibit_id) {
                Ok(exhibit) => Some(exhibit),
                Err(NeatlineError::ExhibitNotFound(_)) => None,
                Err(e) => return Err(e),
            };
            (exhibit, store.load_records_for_exhibit(exhibit_id)?)
        }
        None => (None, Vec::new()),
    };
    let index = RecordGraphIndex::build(siblings);

    if let Some(parent) = update.parent_record_id {
        apply_parent(store, &index, &mut record, parent)?;
    }

    if update.left_percent.is_some() || update.right_percent.is_some() {
        let left = update.left_percent.or(record.left_percent).unwrap_or(0);
        let right = update.right_percent.or(record.right_percent).unwrap_or(100);
        if !record.set_percentages(left, right) {
            return Err(NeatlineError::Api(format!(
                "Invalid ambiguity range {}-{}: expected 0 <= left <= right <= 100",
                left, right
            )));
        }
    }

    let text_fields = [
        ("title", &update.title),
        ("description", &update.description),
        ("start_date", &update.start_date),
        ("end_date", &update.end_date),
        ("start_visible_date", &update.start_visible_date),
        ("end_visible_date", &update.end_visible_date),
        ("map_bounds", &update.map_bounds),
    ];
    for (field, value) in text_fields {
        if let Some(value) = value {
            record.set_not_empty(field, value);
        }
    }

    if let Some(slug) = &update.slug {
        let taken = !slug.trim().is_empty()
            && index.records().any(|other| {
                other.id != record.id && other.slug.as_deref() == Some(slug.as_str())
            });
        if taken {
            result.add_message(CmdMessage::warning(format!(
                "Slug '{}' is already used in this exhibit, keeping the current slug",
                slug
            )));
        } else {
            record.set_not_empty("slug", slug);
        }
    }

    if let Some(geocoverage) = &update.geocoverage {
        if !record.set_geocoverage(geocoverage) {
            debug!(record = record.id, "Ignoring empty map geocoverage");
        }
    }
    if let Some(zoom) = update.map_zoom {
        record.map_zoom = Some(zoom);
    }

    if let Some(flag) = update.use_external_metadata {
        record.set_use_external_metadata(flag);
    }
    if let Some(flag) = update.show_bubble {
        record.show_bubble = flag;
    }
    for (viewport, value) in [
        ("space", update.space_active),
        ("time", update.time_active),
        ("items", update.items_active),
    ] {
        if let Some(value) = value {
            record.set_status(viewport, value);
        }
    }

    if update.reset_styles {
        record.reset_styles();
    }
    let lineage = index.lineage_from(record.parent_record_id);
    for name in StyleName::ALL {
        if let Some(value) = update.styles.get(name) {
            let inherited = inherited_style(&lineage, exhibit.as_ref(), name, defaults);
            record.set_style(name, value, &inherited);
        }
    }

    store.save_record(&record)?;
    result.add_message(CmdMessage::success(format!("Record saved: {}", record.id)));
    Ok(result.with_affected_records(vec![record]))
}

/// Move `record` under `parent`, refusing moves that would close a cycle or leave the
/// record's exhibit.
fn apply_parent<S: ExhibitStore>(
    store: &S,
    index: &RecordGraphIndex,
    record: &mut Record,
    parent: ParentRef,
) -> Result<()> {
    if let ParentRef::Record(parent_id) = parent {
        if parent_id != record.id {
            if !index.contains(parent_id) {
                let candidate = store.get_record(parent_id)?;
                if candidate.exhibit_id != record.exhibit_id {
                    return Err(NeatlineError::Api(format!(
                        "Record {} is in another exhibit and cannot parent record {}",
                        parent_id, record.id
                    )));
                }
            }
            if index.is_ancestor(record.id, parent_id) {
                return Err(NeatlineError::Api(format!(
                    "Record {} is below record {} and cannot become its parent",
                    parent_id, record.id
                )));
            }
        }
    }

    if !record.set_parent_record_id(parent) {
        debug!(record = record.id, parent = %parent, "Parent unchanged");
    }
    Ok(())
}
