//! Attribute resolution.
//!
//! Every resolver here is a pure function of its inputs: the record, its lineage (nearest
//! ancestor first, as produced by [`crate::index::RecordGraphIndex::lineage`]), the owning
//! exhibit, prefetched catalog data and the system defaults. Nothing is looked up.
//!
//! All attribute families share one shape, captured by [`Cascade`]:
//!
//! ```text
//! own value ──► parent (policy) ──► exhibit default ──► fallback
//! ```
//!
//! They differ only in the parent policy. Styles recurse into the parent's *resolved*
//! value, visibility dates take the nearest ancestor's *own* value, and everything else
//! ignores the parent.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::spec::StyleName;
use super::value::StyleValue;
use crate::catalog::{ItemFeature, ItemMetadata};
use crate::config::StyleDefaults;
use crate::model::{Exhibit, Record};

pub const DEFAULT_LEFT_PERCENT: i64 = 0;
pub const DEFAULT_RIGHT_PERCENT: i64 = 100;

/// Dublin-Core style date range: `start` optionally followed by `/end`.
static DC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<start>[0-9:\-\s]+)(/(?P<end>[0-9:\-\s]+))?").expect("valid regex")
});

/// How a cascade consults the parent chain when the record has no own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentPolicy {
    /// Use the parent's fully resolved value (which may itself come from the exhibit).
    Resolved,
    /// Use the own value of the nearest ancestor that has one.
    Raw,
    /// Skip the parent chain.
    Ignore,
}

type Accessor<'f, S, T> = Box<dyn Fn(&S) -> Option<T> + 'f>;

/// A fallback chain for one attribute.
///
/// ```ignore
/// let color = Cascade::new(|r: &Record| r.styles.vector_color.clone(), "#ffb80e".to_string())
///     .parent(ParentPolicy::Resolved)
///     .exhibit(|e: &Exhibit| e.styles.vector_color.clone())
///     .resolve(&record, &lineage, Some(&exhibit));
/// ```
pub struct Cascade<'f, T> {
    own: Accessor<'f, Record, T>,
    parent: ParentPolicy,
    exhibit: Option<Accessor<'f, Exhibit, T>>,
    fallback: T,
}

impl<'f, T: Clone> Cascade<'f, T> {
    pub fn new(own: impl Fn(&Record) -> Option<T> + 'f, fallback: T) -> Self {
        Self {
            own: Box::new(own),
            parent: ParentPolicy::Ignore,
            exhibit: None,
            fallback,
        }
    }

    pub fn parent(mut self, policy: ParentPolicy) -> Self {
        self.parent = policy;
        self
    }

    pub fn exhibit(mut self, accessor: impl Fn(&Exhibit) -> Option<T> + 'f) -> Self {
        self.exhibit = Some(Box::new(accessor));
        self
    }

    /// Resolve the effective value for `record`.
    ///
    /// `lineage` lists the record's ancestors, nearest first. It must be finite and
    /// acyclic, which the graph index guarantees.
    pub fn resolve(&self, record: &Record, lineage: &[&Record], exhibit: Option<&Exhibit>) -> T {
        match (self.own)(record) {
            Some(value) => value,
            None => self.inherited(lineage, exhibit),
        }
    }

    /// The value a record with this lineage would get if it had no own value.
    pub fn inherited(&self, lineage: &[&Record], exhibit: Option<&Exhibit>) -> T {
        match self.parent {
            ParentPolicy::Resolved => {
                if let Some((parent, rest)) = lineage.split_first() {
                    return self.resolve(parent, rest, exhibit);
                }
            }
            ParentPolicy::Raw => {
                if let Some(value) = lineage.iter().find_map(|ancestor| (self.own)(ancestor)) {
                    return value;
                }
            }
            ParentPolicy::Ignore => {}
        }

        self.exhibit
            .as_ref()
            .zip(exhibit)
            .and_then(|(accessor, exhibit)| accessor(exhibit))
            .unwrap_or_else(|| self.fallback.clone())
    }
}

fn style_cascade(name: StyleName, defaults: &StyleDefaults) -> Cascade<'static, StyleValue> {
    Cascade::new(move |r: &Record| r.styles.get(name), defaults.get(name))
        .parent(ParentPolicy::Resolved)
        .exhibit(move |e: &Exhibit| e.styles.get(name))
}

/// Effective style: own, parent's resolved, exhibit default, system default.
pub fn resolve_style(
    record: &Record,
    lineage: &[&Record],
    exhibit: Option<&Exhibit>,
    name: StyleName,
    defaults: &StyleDefaults,
) -> StyleValue {
    style_cascade(name, defaults).resolve(record, lineage, exhibit)
}

/// The style a record would inherit if it had no own value.
///
/// This is the reference value for normalization on write.
pub fn inherited_style(
    lineage: &[&Record],
    exhibit: Option<&Exhibit>,
    name: StyleName,
    defaults: &StyleDefaults,
) -> StyleValue {
    style_cascade(name, defaults).inherited(lineage, exhibit)
}

/// Own title, else the linked item's title, else empty.
pub fn resolve_title(record: &Record, item: Option<&ItemMetadata>) -> String {
    let fallback = linked(record, item)
        .map(|meta| meta.title.clone())
        .unwrap_or_default();
    Cascade::new(|r: &Record| r.title.clone(), fallback).resolve(record, &[], None)
}

/// Description, honouring the "use external metadata" flag.
///
/// With the flag set on an item-linked record, the item's description wins over the own
/// value. Otherwise: own, then item, then empty.
pub fn resolve_description(record: &Record, item: Option<&ItemMetadata>) -> String {
    let from_item = linked(record, item).map(|meta| meta.description.clone());
    if record.use_external_metadata {
        if let Some(description) = &from_item {
            return description.clone();
        }
    }
    Cascade::new(|r: &Record| r.description.clone(), from_item.unwrap_or_default())
        .resolve(record, &[], None)
}

pub fn resolve_slug(record: &Record) -> String {
    record.slug.clone().unwrap_or_default()
}

/// Title, else the first 200 characters of the description, else `[Untitled]`.
pub fn title_or_description(record: &Record, item: Option<&ItemMetadata>) -> String {
    let title = resolve_title(record, item);
    if !title.is_empty() {
        return title;
    }
    let description = resolve_description(record, item);
    if !description.is_empty() {
        return description.chars().take(200).collect();
    }
    "[Untitled]".to_string()
}

/// A start/end pair. Empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Parse a free-text date as `start[/end]`.
///
/// ```ignore
/// parse_date_range("1861/1865") // { start: "1861", end: "1865" }
/// parse_date_range("1861-1865") // { start: "1861-1865", end: "" }
/// parse_date_range("circa 1861") // { start: "", end: "" }
/// ```
pub fn parse_date_range(text: &str) -> DateRange {
    match DC_DATE.captures(text) {
        Some(caps) => DateRange {
            start: caps
                .name("start")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            end: caps
                .name("end")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        },
        None => DateRange::default(),
    }
}

/// Own start/end if a start date is set, else the linked item's parsed date, else empty.
pub fn resolve_date_range(record: &Record, item: Option<&ItemMetadata>) -> DateRange {
    if let Some(start) = &record.start_date {
        return DateRange {
            start: start.clone(),
            end: record.end_date.clone().unwrap_or_default(),
        };
    }
    linked(record, item)
        .map(|meta| parse_date_range(&meta.date))
        .unwrap_or_default()
}

/// Visibility window. Each bound comes from the nearest record in the lineage that sets it.
pub fn resolve_visible_date_range(record: &Record, lineage: &[&Record]) -> DateRange {
    let start = Cascade::new(|r: &Record| r.start_visible_date.clone(), String::new())
        .parent(ParentPolicy::Raw)
        .resolve(record, lineage, None);
    let end = Cascade::new(|r: &Record| r.end_visible_date.clone(), String::new())
        .parent(ParentPolicy::Raw)
        .resolve(record, lineage, None);
    DateRange { start, end }
}

/// Own geometry, else catalog geometry for a linked item, else empty.
///
/// `features` is `None` when no feature source is installed; the item's coverage field is
/// used instead. With a feature source, every non-empty shape is joined with `|`.
pub fn resolve_geocoverage(
    record: &Record,
    item: Option<&ItemMetadata>,
    features: Option<&[ItemFeature]>,
) -> String {
    let fallback = if record.item_id.is_none() {
        String::new()
    } else {
        match features {
            Some(features) => features
                .iter()
                .filter_map(|f| f.wkt.as_deref())
                .filter(|wkt| !wkt.is_empty())
                .collect::<Vec<_>>()
                .join("|"),
            None => item.map(|meta| meta.coverage.clone()).unwrap_or_default(),
        }
    };
    Cascade::new(
        |r: &Record| r.geocoverage.clone().filter(|g| !g.is_empty()),
        fallback,
    )
    .resolve(record, &[], None)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Percentages {
    pub left: i64,
    pub right: i64,
}

pub fn resolve_percentages(record: &Record) -> Percentages {
    Percentages {
        left: record.left_percent.unwrap_or(DEFAULT_LEFT_PERCENT),
        right: record.right_percent.unwrap_or(DEFAULT_RIGHT_PERCENT),
    }
}

fn linked<'m>(record: &Record, item: Option<&'m ItemMetadata>) -> Option<&'m ItemMetadata> {
    record.item_id.and(item)
}
