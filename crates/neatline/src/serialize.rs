//! # Payload Projections
//!
//! The front end consumes three JSON shapes per record:
//!
//! | Payload | Producer | Filter |
//! |---------|----------|--------|
//! | [`MapFeature`] | [`Serializer::map_feature`] | `space_active` only |
//! | [`TimelineEvent`] | [`Serializer::timeline_event`] | none (callers filter on `time_active`) |
//! | [`EditForm`] | [`Serializer::edit_form`] | none |
//!
//! plus [`RecordFormDefaults`] for the "new record from catalog item" form, which has no
//! record and no parent chain yet.
//!
//! Field names are fixed by the front end (`wmsAddress`, `eventID`, `textColor`, ...).
//! Flags are emitted as `0`/`1`.
//!
//! A [`Serializer`] borrows everything a render pass prepared up front: the graph index,
//! the exhibit, the prefetched catalog snapshot and the system defaults. It performs no
//! lookups of its own, so serializing the same record twice yields identical output.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::attributes::{
    inherited_style, parse_date_range, resolve_date_range, resolve_description,
    resolve_geocoverage, resolve_percentages, resolve_slug, resolve_style, resolve_title,
    resolve_visible_date_range, title_or_description, StyleName, StyleValue,
};
use crate::catalog::{CatalogSnapshot, ItemMetadata};
use crate::config::StyleDefaults;
use crate::index::RecordGraphIndex;
use crate::model::{Exhibit, ItemId, ParentRef, Record, RecordId};

/// Display color of timeline event labels.
pub const TIMELINE_TEXT_COLOR: &str = "#000000";

/// Default truncation length for parent-select titles.
pub const SELECT_TITLE_LENGTH: usize = 60;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

fn flag<S>(value: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

/// The ten style fields, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStyles {
    pub vector_color: StyleValue,
    pub stroke_color: StyleValue,
    pub highlight_color: StyleValue,
    pub vector_opacity: StyleValue,
    pub select_opacity: StyleValue,
    pub stroke_opacity: StyleValue,
    pub graphic_opacity: StyleValue,
    pub stroke_width: StyleValue,
    pub point_radius: StyleValue,
    pub point_image: StyleValue,
}

impl ResolvedStyles {
    fn collect(mut resolve: impl FnMut(StyleName) -> StyleValue) -> Self {
        Self {
            vector_color: resolve(StyleName::VectorColor),
            stroke_color: resolve(StyleName::StrokeColor),
            highlight_color: resolve(StyleName::HighlightColor),
            vector_opacity: resolve(StyleName::VectorOpacity),
            select_opacity: resolve(StyleName::SelectOpacity),
            stroke_opacity: resolve(StyleName::StrokeOpacity),
            graphic_opacity: resolve(StyleName::GraphicOpacity),
            stroke_width: resolve(StyleName::StrokeWidth),
            point_radius: resolve(StyleName::PointRadius),
            point_image: resolve(StyleName::PointImage),
        }
    }

    pub fn get(&self, name: StyleName) -> &StyleValue {
        match name {
            StyleName::VectorColor => &self.vector_color,
            StyleName::StrokeColor => &self.stroke_color,
            StyleName::HighlightColor => &self.highlight_color,
            StyleName::VectorOpacity => &self.vector_opacity,
            StyleName::SelectOpacity => &self.select_opacity,
            StyleName::StrokeOpacity => &self.stroke_opacity,
            StyleName::GraphicOpacity => &self.graphic_opacity,
            StyleName::StrokeWidth => &self.stroke_width,
            StyleName::PointRadius => &self.point_radius,
            StyleName::PointImage => &self.point_image,
        }
    }
}

/// One record as drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFeature {
    pub id: RecordId,
    pub item_id: Option<ItemId>,
    pub title: String,
    pub description: String,
    pub slug: String,
    #[serde(flatten)]
    pub styles: ResolvedStyles,
    #[serde(serialize_with = "flag")]
    pub show_bubble: bool,
    /// The record's saved map viewport.
    pub center: Option<String>,
    pub zoom: Option<i64>,
    pub wkt: String,
    #[serde(rename = "wmsAddress")]
    pub wms_address: Option<String>,
    pub layers: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub start_visible_date: String,
    pub end_visible_date: String,
}

/// One record as drawn on the timeline.
///
/// `start` and `end` are omitted, not empty, when unset: the timeline widget treats a
/// missing key differently from `""`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEvent {
    #[serde(rename = "eventID")]
    pub event_id: RecordId,
    pub title: String,
    pub description: String,
    pub color: StyleValue,
    pub left_ambiguity: i64,
    pub right_ambiguity: i64,
    #[serde(serialize_with = "flag")]
    pub show_bubble: bool,
    #[serde(rename = "textColor")]
    pub text_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// An entry of the parent-record dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentOption {
    pub id: RecordId,
    pub title: String,
}

/// Editable fields of a record, resolved where the editor shows inherited values.
///
/// Visibility dates are the record's own values: the editor shows what was typed, not
/// what is inherited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditForm {
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(flatten)]
    pub styles: ResolvedStyles,
    pub start_date: String,
    pub end_date: String,
    pub start_visible_date: String,
    pub end_visible_date: String,
    pub left_percent: i64,
    pub right_percent: i64,
    pub parent_record_id: ParentRef,
    #[serde(serialize_with = "flag")]
    pub use_dc_metadata: bool,
    #[serde(serialize_with = "flag")]
    pub show_bubble: bool,
    pub geocoverage: String,
    pub records: Vec<ParentOption>,
}

/// Starting values for a record that will be created from a catalog item.
pub type RecordFormDefaults = EditForm;

/// Strip HTML tags and truncate to `length` characters, appending ` ...` when cut.
pub fn title_for_select(title: &str, length: usize) -> String {
    let plain = HTML_TAG.replace_all(title, "");
    if plain.chars().count() > length {
        let mut fixed: String = plain.chars().take(length).collect();
        fixed.push_str(" ...");
        fixed
    } else {
        plain.into_owned()
    }
}

/// Produces payloads for the records of one exhibit.
pub struct Serializer<'a> {
    index: &'a RecordGraphIndex,
    exhibit: Option<&'a Exhibit>,
    catalog: &'a CatalogSnapshot,
    defaults: &'a StyleDefaults,
}

impl<'a> Serializer<'a> {
    pub fn new(
        index: &'a RecordGraphIndex,
        exhibit: Option<&'a Exhibit>,
        catalog: &'a CatalogSnapshot,
        defaults: &'a StyleDefaults,
    ) -> Self {
        Self {
            index,
            exhibit,
            catalog,
            defaults,
        }
    }

    /// Ancestors of `record`. Records outside the index hang under their stored parent.
    fn lineage(&self, record: &Record) -> Vec<&'a Record> {
        if self.index.contains(record.id) {
            self.index.lineage(record.id)
        } else {
            self.index
                .lineage_from(record.parent_record_id.filter(|pid| *pid != record.id))
        }
    }

    fn item(&self, record: &Record) -> Option<&'a ItemMetadata> {
        self.catalog.item(record.item_id)
    }

    pub fn styles(&self, record: &Record) -> ResolvedStyles {
        let lineage = self.lineage(record);
        ResolvedStyles::collect(|name| {
            resolve_style(record, &lineage, self.exhibit, name, self.defaults)
        })
    }

    /// The map payload, or `None` when the record is not active on the map.
    pub fn map_feature(&self, record: &Record) -> Option<MapFeature> {
        if !record.space_active {
            return None;
        }

        let lineage = self.lineage(record);
        let item = self.item(record);
        let dates = resolve_date_range(record, item);
        let visible = resolve_visible_date_range(record, &lineage);
        let wms = self.catalog.wms(record.item_id);

        Some(MapFeature {
            id: record.id,
            item_id: record.item_id,
            title: resolve_title(record, item),
            description: resolve_description(record, item),
            slug: resolve_slug(record),
            styles: ResolvedStyles::collect(|name| {
                resolve_style(record, &lineage, self.exhibit, name, self.defaults)
            }),
            show_bubble: record.show_bubble,
            center: record.map_bounds.clone(),
            zoom: record.map_zoom,
            wkt: resolve_geocoverage(record, item, self.catalog.features(record.item_id)),
            wms_address: wms.map(|w| w.address.clone()),
            layers: wms.map(|w| w.layers.clone()),
            start_date: dates.start,
            end_date: dates.end,
            start_visible_date: visible.start,
            end_visible_date: visible.end,
        })
    }

    /// The timeline payload. Produced for any record.
    pub fn timeline_event(&self, record: &Record) -> TimelineEvent {
        let lineage = self.lineage(record);
        let item = self.item(record);
        let percentages = resolve_percentages(record);
        let dates = resolve_date_range(record, item);

        let (start, end) = if dates.start.is_empty() {
            (None, None)
        } else {
            let end = (!dates.end.is_empty()).then_some(dates.end);
            (Some(dates.start), end)
        };

        TimelineEvent {
            event_id: record.id,
            title: resolve_title(record, item).trim().to_string(),
            description: resolve_description(record, item),
            color: resolve_style(
                record,
                &lineage,
                self.exhibit,
                StyleName::VectorColor,
                self.defaults,
            ),
            left_ambiguity: percentages.left,
            right_ambiguity: percentages.right,
            show_bubble: record.show_bubble,
            text_color: TIMELINE_TEXT_COLOR.to_string(),
            start,
            end,
        }
    }

    /// Map payloads for every record in the index that is active on the map.
    pub fn map_features(&self) -> Vec<MapFeature> {
        self.index
            .records()
            .filter_map(|record| self.map_feature(record))
            .collect()
    }

    /// Timeline payloads for every record in the index that is active on the timeline.
    pub fn timeline_events(&self) -> Vec<TimelineEvent> {
        self.index
            .records()
            .filter(|record| record.time_active)
            .map(|record| self.timeline_event(record))
            .collect()
    }

    /// Parent choices for `record`: everything except itself and its descendants.
    ///
    /// Untitled records are labelled by their description.
    pub fn parent_options(&self, record: Option<RecordId>) -> Vec<ParentOption> {
        self.index
            .selectable_parents(record)
            .into_iter()
            .map(|candidate| ParentOption {
                id: candidate.id,
                title: title_for_select(
                    &title_or_description(candidate, self.item(candidate)),
                    SELECT_TITLE_LENGTH,
                ),
            })
            .collect()
    }

    pub fn edit_form(&self, record: &Record) -> EditForm {
        let item = self.item(record);
        let dates = resolve_date_range(record, item);
        let percentages = resolve_percentages(record);

        EditForm {
            title: resolve_title(record, item),
            slug: resolve_slug(record),
            description: resolve_description(record, item),
            styles: self.styles(record),
            start_date: dates.start,
            end_date: dates.end,
            start_visible_date: record.start_visible_date.clone().unwrap_or_default(),
            end_visible_date: record.end_visible_date.clone().unwrap_or_default(),
            left_percent: percentages.left,
            right_percent: percentages.right,
            parent_record_id: ParentRef::from(record.parent_record_id),
            use_dc_metadata: record.use_external_metadata,
            show_bubble: record.show_bubble,
            geocoverage: resolve_geocoverage(record, item, self.catalog.features(record.item_id)),
            records: self.parent_options(Some(record.id)),
        }
    }
}

/// Form values for a record about to be created from a catalog item.
///
/// Text and dates come from the item. Styles cascade from the exhibit to the system
/// defaults, since there is no parent yet. Everything else is a fixed literal.
pub fn new_record_defaults(
    item: Option<&ItemMetadata>,
    exhibit: Option<&Exhibit>,
    defaults: &StyleDefaults,
    records: Vec<ParentOption>,
) -> RecordFormDefaults {
    let dates = item
        .map(|meta| parse_date_range(&meta.date))
        .unwrap_or_default();

    RecordFormDefaults {
        title: item.map(|meta| meta.title.clone()).unwrap_or_default(),
        slug: String::new(),
        description: item.map(|meta| meta.description.clone()).unwrap_or_default(),
        styles: ResolvedStyles::collect(|name| inherited_style(&[], exhibit, name, defaults)),
        start_date: dates.start,
        end_date: dates.end,
        start_visible_date: String::new(),
        end_visible_date: String::new(),
        left_percent: crate::attributes::DEFAULT_LEFT_PERCENT,
        right_percent: crate::attributes::DEFAULT_RIGHT_PERCENT,
        parent_record_id: ParentRef::None,
        use_dc_metadata: false,
        show_bubble: true,
        geocoverage: String::new(),
        records,
    }
}
