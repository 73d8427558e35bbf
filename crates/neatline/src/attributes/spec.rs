//! Style specifications and registry.
//!
//! This module defines the schema for style fields: their wire names and the kind of
//! value each one holds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of value a style field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    /// Hex color string (e.g. `#ffb80e`)
    Color,

    /// Integer percentage, 0 to 100
    Opacity,

    /// Integer size in pixels (stroke width, point radius)
    Length,

    /// Image address (may be empty)
    Url,
}

impl StyleKind {
    /// Whether values of this kind are stored as integers.
    pub fn is_numeric(self) -> bool {
        matches!(self, StyleKind::Opacity | StyleKind::Length)
    }
}

/// Every style field a record or an exhibit can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleName {
    VectorColor,
    StrokeColor,
    HighlightColor,
    VectorOpacity,
    SelectOpacity,
    StrokeOpacity,
    GraphicOpacity,
    StrokeWidth,
    PointRadius,
    PointImage,
}

impl StyleName {
    pub const ALL: [StyleName; 10] = [
        StyleName::VectorColor,
        StyleName::StrokeColor,
        StyleName::HighlightColor,
        StyleName::VectorOpacity,
        StyleName::SelectOpacity,
        StyleName::StrokeOpacity,
        StyleName::GraphicOpacity,
        StyleName::StrokeWidth,
        StyleName::PointRadius,
        StyleName::PointImage,
    ];

    pub fn spec(self) -> &'static StyleSpec {
        // Registry order matches declaration order.
        &STYLES[self as usize]
    }

    /// The wire/column name, e.g. `"vector_color"`.
    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn kind(self) -> StyleKind {
        self.spec().kind
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Specification for a single style field.
#[derive(Debug, Clone)]
pub struct StyleSpec {
    pub name: StyleName,

    /// The name used in payloads and forms
    pub key: &'static str,

    pub kind: StyleKind,
}

impl StyleSpec {
    const fn new(name: StyleName, key: &'static str, kind: StyleKind) -> Self {
        Self { name, key, kind }
    }
}

/// Registry of all style fields.
///
/// The order here is the order styles appear in payloads.
pub const STYLES: &[StyleSpec] = &[
    StyleSpec::new(StyleName::VectorColor, "vector_color", StyleKind::Color),
    StyleSpec::new(StyleName::StrokeColor, "stroke_color", StyleKind::Color),
    StyleSpec::new(StyleName::HighlightColor, "highlight_color", StyleKind::Color),
    StyleSpec::new(StyleName::VectorOpacity, "vector_opacity", StyleKind::Opacity),
    StyleSpec::new(StyleName::SelectOpacity, "select_opacity", StyleKind::Opacity),
    StyleSpec::new(StyleName::StrokeOpacity, "stroke_opacity", StyleKind::Opacity),
    StyleSpec::new(StyleName::GraphicOpacity, "graphic_opacity", StyleKind::Opacity),
    StyleSpec::new(StyleName::StrokeWidth, "stroke_width", StyleKind::Length),
    StyleSpec::new(StyleName::PointRadius, "point_radius", StyleKind::Length),
    StyleSpec::new(StyleName::PointImage, "point_image", StyleKind::Url),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_style_name() {
        assert_eq!(STYLES.len(), StyleName::ALL.len());
        for name in StyleName::ALL {
            assert_eq!(name.spec().name, name);
        }
    }

    #[test]
    fn keys_are_snake_case_names() {
        for name in StyleName::ALL {
            assert_eq!(name.to_string(), name.key());
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{}\"", name.key()));
        }
    }

    #[test]
    fn kinds_are_correct() {
        assert_eq!(StyleName::VectorColor.kind(), StyleKind::Color);
        assert_eq!(StyleName::SelectOpacity.kind(), StyleKind::Opacity);
        assert_eq!(StyleName::PointRadius.kind(), StyleKind::Length);
        assert_eq!(StyleName::PointImage.kind(), StyleKind::Url);
        assert!(StyleName::StrokeWidth.kind().is_numeric());
        assert!(!StyleName::HighlightColor.kind().is_numeric());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&StyleName::GraphicOpacity).unwrap();
        assert_eq!(json, "\"graphic_opacity\"");
        let back: StyleName = serde_json::from_str("\"stroke_color\"").unwrap();
        assert_eq!(back, StyleName::StrokeColor);
    }
}
