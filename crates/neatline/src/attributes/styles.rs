//! Nullable style storage shared by records and exhibits.

use super::spec::StyleName;
use super::value::StyleValue;
use serde::{Deserialize, Serialize};

/// The ten style columns of a record or an exhibit. `None` means "inherit".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSet {
    #[serde(default)]
    pub vector_color: Option<String>,
    #[serde(default)]
    pub stroke_color: Option<String>,
    #[serde(default)]
    pub highlight_color: Option<String>,
    #[serde(default)]
    pub vector_opacity: Option<i64>,
    #[serde(default)]
    pub select_opacity: Option<i64>,
    #[serde(default)]
    pub stroke_opacity: Option<i64>,
    #[serde(default)]
    pub graphic_opacity: Option<i64>,
    #[serde(default)]
    pub stroke_width: Option<i64>,
    #[serde(default)]
    pub point_radius: Option<i64>,
    #[serde(default)]
    pub point_image: Option<String>,
}

impl StyleSet {
    /// Get the stored value of a style, if any.
    pub fn get(&self, name: StyleName) -> Option<StyleValue> {
        match name {
            StyleName::VectorColor => self.vector_color.clone().map(StyleValue::Text),
            StyleName::StrokeColor => self.stroke_color.clone().map(StyleValue::Text),
            StyleName::HighlightColor => self.highlight_color.clone().map(StyleValue::Text),
            StyleName::VectorOpacity => self.vector_opacity.map(StyleValue::Number),
            StyleName::SelectOpacity => self.select_opacity.map(StyleValue::Number),
            StyleName::StrokeOpacity => self.stroke_opacity.map(StyleValue::Number),
            StyleName::GraphicOpacity => self.graphic_opacity.map(StyleValue::Number),
            StyleName::StrokeWidth => self.stroke_width.map(StyleValue::Number),
            StyleName::PointRadius => self.point_radius.map(StyleValue::Number),
            StyleName::PointImage => self.point_image.clone().map(StyleValue::Text),
        }
    }

    /// Store (or clear, with `None`) a style value.
    ///
    /// Returns `false` and leaves the set unchanged when the value's type does not match
    /// the style's kind.
    pub fn set(&mut self, name: StyleName, value: Option<StyleValue>) -> bool {
        if let Some(v) = &value {
            if !v.fits(name.kind()) {
                return false;
            }
        }
        let text = value.as_ref().and_then(|v| v.as_text()).map(str::to_string);
        let number = value.as_ref().and_then(|v| v.as_number());
        match name {
            StyleName::VectorColor => self.vector_color = text,
            StyleName::StrokeColor => self.stroke_color = text,
            StyleName::HighlightColor => self.highlight_color = text,
            StyleName::VectorOpacity => self.vector_opacity = number,
            StyleName::SelectOpacity => self.select_opacity = number,
            StyleName::StrokeOpacity => self.stroke_opacity = number,
            StyleName::GraphicOpacity => self.graphic_opacity = number,
            StyleName::StrokeWidth => self.stroke_width = number,
            StyleName::PointRadius => self.point_radius = number,
            StyleName::PointImage => self.point_image = text,
        }
        true
    }

    /// Clear every style.
    pub fn reset(&mut self) {
        *self = StyleSet::default();
    }

    pub fn is_empty(&self) -> bool {
        StyleName::ALL.iter().all(|name| self.get(*name).is_none())
    }
}
