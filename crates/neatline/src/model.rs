//! # Domain Model: Exhibits and Records
//!
//! This module defines the two stored types, [`Exhibit`] and [`Record`], and the
//! validating setters the editor goes through when it writes to a record.
//!
//! ## Nullable Means "Inherit"
//!
//! Almost every record field is an `Option`. `None` is not "empty": it means the effective
//! value comes from somewhere else (the parent record, the exhibit, an external catalog
//! item, or a system default). See [`crate::attributes`] for the fallback chains.
//!
//! Because of this, setters never store empty strings. [`Record::set_not_empty`] turns
//! whitespace-only input into `None`, and [`Record::set_style`] stores `None` when the
//! submitted value equals the value the record would inherit anyway. That normalization
//! is what lets a change to an ancestor's style propagate to every descendant that never
//! deliberately overrode it.
//!
//! ## Validating Setters
//!
//! Setters that validate input return `bool` instead of `Result`:
//!
//! - [`Record::set_percentages`]: `0 <= left <= right <= 100`
//! - [`Record::set_status`]: known viewport name
//! - [`Record::set_geocoverage`]: rejects the editor's `"null"` placeholder
//! - [`Record::set_parent_record_id`]: rejects self-parenting, reports change
//! - [`Record::set_style`]: rejects mistyped values, reports change
//!
//! On failure the record is left untouched.
//!
//! ## Parent References
//!
//! A record has at most one parent and must never be its own ancestor. The setter rejects
//! the direct self-reference; the deeper "not one of my descendants" check needs the whole
//! exhibit and lives in the update command (via [`crate::index::RecordGraphIndex`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::attributes::{StyleName, StyleSet, StyleValue};

pub type RecordId = u64;
pub type ExhibitId = u64;
pub type ItemId = u64;

/// Top-level container of records, with its own default styles and map viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exhibit {
    pub id: ExhibitId,
    pub title: String,
    pub slug: String,
    /// Map focus point, an opaque `lon,lat` string owned by the map widget.
    #[serde(default)]
    pub map_focus: Option<String>,
    #[serde(default)]
    pub map_zoom: Option<i64>,
    /// Exhibit-level style defaults. `None` falls through to the system default.
    #[serde(flatten)]
    pub styles: StyleSet,
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

impl Exhibit {
    pub fn new(id: ExhibitId, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            slug: slug.into(),
            map_focus: None,
            map_zoom: None,
            styles: StyleSet::default(),
            modified: Utc::now(),
        }
    }

    /// Mark the exhibit as modified now.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

/// The three places a record can be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Space,
    Time,
    Items,
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "space" => Ok(Viewport::Space),
            "time" => Ok(Viewport::Time),
            "items" => Ok(Viewport::Items),
            _ => Err(format!("Unknown viewport: {}", s)),
        }
    }
}

/// A parent reference as the editor sees it: either `"none"` or a record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRef {
    None,
    Record(RecordId),
}

impl ParentRef {
    pub fn id(self) -> Option<RecordId> {
        match self {
            ParentRef::None => None,
            ParentRef::Record(id) => Some(id),
        }
    }
}

impl From<Option<RecordId>> for ParentRef {
    fn from(value: Option<RecordId>) -> Self {
        value.map_or(ParentRef::None, ParentRef::Record)
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRef::None => f.write_str("none"),
            ParentRef::Record(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for ParentRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "none" {
            return Ok(ParentRef::None);
        }
        trimmed
            .parse()
            .map(ParentRef::Record)
            .map_err(|_| format!("Invalid parent reference: {}", s))
    }
}

impl Serialize for ParentRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ParentRef::None => serializer.serialize_str("none"),
            ParentRef::Record(id) => serializer.serialize_u64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for ParentRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Id(RecordId),
            Text(String),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Id(id) => Ok(ParentRef::Record(id)),
            Helper::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

fn default_true() -> bool {
    true
}

/// One annotated map/timeline entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub exhibit_id: Option<ExhibitId>,
    #[serde(default)]
    pub parent_record_id: Option<RecordId>,

    // Text
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    /// Use the linked item's metadata as the description.
    #[serde(default, alias = "use_dc_metadata")]
    pub use_external_metadata: bool,

    // Temporal
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub start_visible_date: Option<String>,
    #[serde(default)]
    pub end_visible_date: Option<String>,

    #[serde(flatten)]
    pub styles: StyleSet,

    // Geometry / display
    #[serde(default)]
    pub geocoverage: Option<String>,
    #[serde(default)]
    pub map_bounds: Option<String>,
    #[serde(default)]
    pub map_zoom: Option<i64>,
    #[serde(default)]
    pub left_percent: Option<i64>,
    #[serde(default)]
    pub right_percent: Option<i64>,
    #[serde(default)]
    pub space_active: bool,
    #[serde(default)]
    pub time_active: bool,
    #[serde(default)]
    pub items_active: bool,
    #[serde(default)]
    pub display_order: Option<u32>,
    #[serde(default = "default_true")]
    pub show_bubble: bool,
}

impl Record {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            item_id: None,
            exhibit_id: None,
            parent_record_id: None,
            title: None,
            description: None,
            slug: None,
            use_external_metadata: false,
            start_date: None,
            end_date: None,
            start_visible_date: None,
            end_visible_date: None,
            styles: StyleSet::default(),
            geocoverage: None,
            map_bounds: None,
            map_zoom: None,
            left_percent: Some(crate::attributes::DEFAULT_LEFT_PERCENT),
            right_percent: Some(crate::attributes::DEFAULT_RIGHT_PERCENT),
            space_active: false,
            time_active: false,
            items_active: false,
            display_order: None,
            show_bubble: true,
        }
    }

    pub fn in_exhibit(mut self, exhibit_id: ExhibitId) -> Self {
        self.exhibit_id = Some(exhibit_id);
        self
    }

    pub fn for_item(mut self, item_id: ItemId) -> Self {
        self.item_id = Some(item_id);
        self
    }

    pub fn with_parent(mut self, parent_id: RecordId) -> Self {
        self.parent_record_id = Some(parent_id);
        self
    }

    /// Set a text field, storing `None` for whitespace-only input.
    ///
    /// Returns `false` if the field name is not a nullable text field.
    ///
    /// # Supported Fields
    ///
    /// `title`, `description`, `slug`, `start_date`, `end_date`, `start_visible_date`,
    /// `end_visible_date`, `geocoverage`, `map_bounds`.
    pub fn set_not_empty(&mut self, field: &str, value: &str) -> bool {
        let stored = if value.trim().is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        let slot = match field {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "slug" => &mut self.slug,
            "start_date" => &mut self.start_date,
            "end_date" => &mut self.end_date,
            "start_visible_date" => &mut self.start_visible_date,
            "end_visible_date" => &mut self.end_visible_date,
            "geocoverage" => &mut self.geocoverage,
            "map_bounds" => &mut self.map_bounds,
            _ => return false,
        };
        *slot = stored;
        true
    }

    /// Set the ambiguity gradient bounds. Requires `0 <= left <= right <= 100`.
    pub fn set_percentages(&mut self, left: i64, right: i64) -> bool {
        if !(0 <= left && left <= right && right <= 100) {
            return false;
        }
        self.left_percent = Some(left);
        self.right_percent = Some(right);
        true
    }

    /// Toggle presence on the map (`space`), timeline (`time`) or item list (`items`).
    pub fn set_status(&mut self, viewport: &str, value: bool) -> bool {
        match viewport.parse::<Viewport>() {
            Ok(Viewport::Space) => self.space_active = value,
            Ok(Viewport::Time) => self.time_active = value,
            Ok(Viewport::Items) => self.items_active = value,
            Err(_) => return false,
        }
        true
    }

    /// Set the geocoverage. The editor submits the literal `"null"` when no map was
    /// instantiated; that value is rejected so existing geometry survives.
    pub fn set_geocoverage(&mut self, value: &str) -> bool {
        if value == "null" {
            return false;
        }
        self.set_not_empty("geocoverage", value)
    }

    /// Set the parent record. `ParentRef::None` clears it; pointing at self is ignored.
    ///
    /// Returns `true` only if the stored value changed.
    pub fn set_parent_record_id(&mut self, parent: ParentRef) -> bool {
        let original = self.parent_record_id;
        match parent {
            ParentRef::None => self.parent_record_id = None,
            ParentRef::Record(id) if id != self.id => self.parent_record_id = Some(id),
            ParentRef::Record(_) => {}
        }
        original != self.parent_record_id
    }

    /// Only honoured when the record is linked to a catalog item.
    pub fn set_use_external_metadata(&mut self, flag: bool) {
        if self.item_id.is_some() {
            self.use_external_metadata = flag;
        }
    }

    /// Set a style, normalizing against the value the record would inherit.
    ///
    /// `inherited` is what the record resolves to with no own value (see
    /// [`crate::attributes::inherited_style`]). A value equal to it is stored as `None`.
    ///
    /// Returns `true` if the stored value changed. Returns `false` (and changes nothing)
    /// for a value whose type does not match the style.
    pub fn set_style(&mut self, name: StyleName, value: StyleValue, inherited: &StyleValue) -> bool {
        if !value.fits(name.kind()) {
            return false;
        }
        let current = self.styles.get(name);
        let next = if &value == inherited { None } else { Some(value) };
        if current == next {
            return false;
        }
        self.styles.set(name, next)
    }

    /// Clear every own style so the record inherits all of them.
    pub fn reset_styles(&mut self) {
        self.styles.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_defaults() {
        let record = Record::new(1);
        assert!(record.show_bubble);
        assert_eq!(record.left_percent, Some(0));
        assert_eq!(record.right_percent, Some(100));
        assert!(!record.space_active);
        assert!(!record.time_active);
        assert!(!record.items_active);
        assert!(record.styles.is_empty());
    }

    #[test]
    fn set_not_empty_nulls_whitespace() {
        let mut record = Record::new(1);
        assert!(record.set_not_empty("title", "Battle of Bull Run"));
        assert_eq!(record.title.as_deref(), Some("Battle of Bull Run"));
        assert!(record.set_not_empty("title", "   "));
        assert_eq!(record.title, None);
    }

    #[test]
    fn set_not_empty_unknown_field() {
        let mut record = Record::new(1);
        assert!(!record.set_not_empty("vector_color", "#ffffff"));
        assert!(!record.set_not_empty("id", "2"));
    }

    #[test]
    fn percentages_validation() {
        let mut record = Record::new(1);
        assert!(!record.set_percentages(10, 5));
        assert!(!record.set_percentages(-1, 50));
        assert!(!record.set_percentages(20, 101));
        assert_eq!(record.left_percent, Some(0));
        assert_eq!(record.right_percent, Some(100));

        assert!(record.set_percentages(0, 100));
        assert!(record.set_percentages(30, 30));
        assert_eq!(record.left_percent, Some(30));
        assert_eq!(record.right_percent, Some(30));
    }

    #[test]
    fn set_status_by_viewport() {
        let mut record = Record::new(1);
        assert!(record.set_status("space", true));
        assert!(record.set_status("time", true));
        assert!(record.set_status("items", true));
        assert!(record.space_active && record.time_active && record.items_active);

        assert!(record.set_status("time", false));
        assert!(!record.time_active);
    }

    #[test]
    fn set_status_unknown_viewport() {
        let mut record = Record::new(1);
        assert!(!record.set_status("globe", true));
        assert!(!record.space_active);
    }

    #[test]
    fn geocoverage_rejects_null_placeholder() {
        let mut record = Record::new(1);
        record.geocoverage = Some("POINT(1 2)".into());
        assert!(!record.set_geocoverage("null"));
        assert_eq!(record.geocoverage.as_deref(), Some("POINT(1 2)"));

        assert!(record.set_geocoverage(""));
        assert_eq!(record.geocoverage, None);
    }

    #[test]
    fn parent_cannot_be_self() {
        let mut record = Record::new(7);
        assert!(!record.set_parent_record_id(ParentRef::Record(7)));
        assert_eq!(record.parent_record_id, None);
    }

    #[test]
    fn parent_change_detection() {
        let mut record = Record::new(7);
        assert!(record.set_parent_record_id(ParentRef::Record(3)));
        assert!(!record.set_parent_record_id(ParentRef::Record(3)));
        assert!(!record.set_parent_record_id(ParentRef::Record(7)));
        assert_eq!(record.parent_record_id, Some(3));
        assert!(record.set_parent_record_id(ParentRef::None));
        assert!(!record.set_parent_record_id(ParentRef::None));
    }

    #[test]
    fn use_external_metadata_requires_item() {
        let mut record = Record::new(1);
        record.set_use_external_metadata(true);
        assert!(!record.use_external_metadata);

        let mut linked = Record::new(2).for_item(10);
        linked.set_use_external_metadata(true);
        assert!(linked.use_external_metadata);
    }

    #[test]
    fn set_style_normalizes_inherited_value() {
        let mut record = Record::new(1);
        let inherited = StyleValue::from("#ffb80e");

        assert!(!record.set_style(StyleName::VectorColor, "#ffb80e".into(), &inherited));
        assert_eq!(record.styles.vector_color, None);

        assert!(record.set_style(StyleName::VectorColor, "#000000".into(), &inherited));
        assert_eq!(record.styles.vector_color.as_deref(), Some("#000000"));
        assert!(!record.set_style(StyleName::VectorColor, "#000000".into(), &inherited));

        // Setting back to the inherited value nulls the override.
        assert!(record.set_style(StyleName::VectorColor, "#ffb80e".into(), &inherited));
        assert_eq!(record.styles.vector_color, None);
    }

    #[test]
    fn set_style_rejects_wrong_type() {
        let mut record = Record::new(1);
        let inherited = StyleValue::from(20);
        assert!(!record.set_style(StyleName::VectorOpacity, "high".into(), &inherited));
        assert_eq!(record.styles.vector_opacity, None);
    }

    #[test]
    fn reset_styles_clears_overrides() {
        let mut record = Record::new(1);
        record.styles.stroke_width = Some(9);
        record.styles.highlight_color = Some("#00ff00".into());
        record.reset_styles();
        assert!(record.styles.is_empty());
    }

    #[test]
    fn parent_ref_parsing_and_serde() {
        assert_eq!("none".parse::<ParentRef>(), Ok(ParentRef::None));
        assert_eq!("12".parse::<ParentRef>(), Ok(ParentRef::Record(12)));
        assert!("twelve".parse::<ParentRef>().is_err());

        assert_eq!(serde_json::to_string(&ParentRef::None).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&ParentRef::Record(4)).unwrap(), "4");
        let parsed: ParentRef = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, ParentRef::None);
        let parsed: ParentRef = serde_json::from_str("9").unwrap();
        assert_eq!(parsed, ParentRef::Record(9));
        let parsed: ParentRef = serde_json::from_str("\"9\"").unwrap();
        assert_eq!(parsed, ParentRef::Record(9));
    }

    #[test]
    fn record_deserializes_from_sparse_json() {
        let record: Record = serde_json::from_str(
            r##"{
                "id": 5,
                "exhibit_id": 1,
                "parent_record_id": 2,
                "use_dc_metadata": true,
                "vector_color": "#ffffff",
                "stroke_width": 3,
                "space_active": true
            }"##,
        )
        .unwrap();

        assert_eq!(record.id, 5);
        assert_eq!(record.parent_record_id, Some(2));
        assert!(record.use_external_metadata);
        assert_eq!(record.styles.vector_color.as_deref(), Some("#ffffff"));
        assert_eq!(record.styles.stroke_width, Some(3));
        assert!(record.space_active);
        assert!(record.show_bubble);
        assert_eq!(record.left_percent, None);
    }

    #[test]
    fn exhibit_touch_advances_modified() {
        let mut exhibit = Exhibit::new(1, "Civil War", "civil-war");
        let before = exhibit.modified;
        std::thread::sleep(std::time::Duration::from_millis(5));
        exhibit.touch();
        assert!(exhibit.modified > before);
    }

    #[test]
    fn exhibit_roundtrip_keeps_flattened_styles() {
        let mut exhibit = Exhibit::new(3, "Maps", "maps");
        exhibit.styles.vector_opacity = Some(55);
        let json = serde_json::to_string(&exhibit).unwrap();
        assert!(json.contains("\"vector_opacity\":55"));
        let back: Exhibit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exhibit);
    }

    #[test]
    fn exhibit_without_modified_loads() {
        let before = Utc::now();
        let exhibit: Exhibit =
            serde_json::from_str(r#"{"id": 4, "title": "Gettysburg", "slug": "gettysburg"}"#)
                .unwrap();
        assert_eq!(exhibit.slug, "gettysburg");
        assert!(exhibit.modified >= before);
    }
}
