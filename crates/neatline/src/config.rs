//! # System Style Defaults
//!
//! The last link of every style fallback chain. Defaults are loaded with [`confique`] and
//! then passed explicitly into resolution; nothing reads them from ambient state.
//!
//! ## Layers
//!
//! Resolved in priority order:
//! 1. **Environment variables**: `NEATLINE_VECTOR_COLOR`, `NEATLINE_STROKE_WIDTH`, etc.
//! 2. **Config files**: in the order given to [`StyleDefaults::load`]. The CLI passes an
//!    explicit `--config` file first, then `neatline.toml` from the OS config directory.
//! 3. **Compiled defaults**: `#[config(default = ...)]` below.
//!
//! Missing files are skipped.
//!
//! ## Available Settings
//!
//! | Key | Default |
//! |-----|---------|
//! | `vector_color` | `#ffb80e` |
//! | `stroke_color` | `#ea3a3a` |
//! | `highlight_color` | `#ff0000` |
//! | `vector_opacity` | `20` |
//! | `select_opacity` | `40` |
//! | `stroke_opacity` | `70` |
//! | `graphic_opacity` | `100` |
//! | `stroke_width` | `4` |
//! | `point_radius` | `6` |
//! | `point_image` | `""` |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::attributes::{StyleName, StyleValue};
use crate::error::Result;

/// System-wide style defaults, stored in `neatline.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StyleDefaults {
    /// Fill color of shapes.
    #[config(default = "#ffb80e", env = "NEATLINE_VECTOR_COLOR")]
    pub vector_color: String,

    /// Outline color of shapes.
    #[config(default = "#ea3a3a", env = "NEATLINE_STROKE_COLOR")]
    pub stroke_color: String,

    /// Fill color of a highlighted shape.
    #[config(default = "#ff0000", env = "NEATLINE_HIGHLIGHT_COLOR")]
    pub highlight_color: String,

    /// Fill opacity, 0 to 100.
    #[config(default = 20, env = "NEATLINE_VECTOR_OPACITY")]
    pub vector_opacity: i64,

    /// Fill opacity of a selected shape, 0 to 100.
    #[config(default = 40, env = "NEATLINE_SELECT_OPACITY")]
    pub select_opacity: i64,

    /// Outline opacity, 0 to 100.
    #[config(default = 70, env = "NEATLINE_STROKE_OPACITY")]
    pub stroke_opacity: i64,

    /// Opacity of point images, 0 to 100.
    #[config(default = 100, env = "NEATLINE_GRAPHIC_OPACITY")]
    pub graphic_opacity: i64,

    /// Outline width in pixels.
    #[config(default = 4, env = "NEATLINE_STROKE_WIDTH")]
    pub stroke_width: i64,

    /// Point radius in pixels.
    #[config(default = 6, env = "NEATLINE_POINT_RADIUS")]
    pub point_radius: i64,

    /// Image drawn in place of points. Empty for none.
    #[config(default = "", env = "NEATLINE_POINT_IMAGE")]
    pub point_image: String,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            vector_color: "#ffb80e".to_string(),
            stroke_color: "#ea3a3a".to_string(),
            highlight_color: "#ff0000".to_string(),
            vector_opacity: 20,
            select_opacity: 40,
            stroke_opacity: 70,
            graphic_opacity: 100,
            stroke_width: 4,
            point_radius: 6,
            point_image: String::new(),
        }
    }
}

impl StyleDefaults {
    /// Load defaults from the environment, then `files` (highest priority first), then
    /// compiled defaults.
    pub fn load<P: AsRef<Path>>(files: &[P]) -> Result<Self> {
        let mut builder = Self::builder().env();
        for file in files {
            builder = builder.file(file.as_ref());
        }
        Ok(builder.load()?)
    }

    /// A commented `neatline.toml` listing every setting.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }

    pub fn get(&self, name: StyleName) -> StyleValue {
        match name {
            StyleName::VectorColor => self.vector_color.as_str().into(),
            StyleName::StrokeColor => self.stroke_color.as_str().into(),
            StyleName::HighlightColor => self.highlight_color.as_str().into(),
            StyleName::VectorOpacity => self.vector_opacity.into(),
            StyleName::SelectOpacity => self.select_opacity.into(),
            StyleName::StrokeOpacity => self.stroke_opacity.into(),
            StyleName::GraphicOpacity => self.graphic_opacity.into(),
            StyleName::StrokeWidth => self.stroke_width.into(),
            StyleName::PointRadius => self.point_radius.into(),
            StyleName::PointImage => self.point_image.as_str().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let defaults = StyleDefaults::default();
        assert_eq!(defaults.get(StyleName::VectorColor), StyleValue::from("#ffb80e"));
        assert_eq!(defaults.get(StyleName::StrokeColor), StyleValue::from("#ea3a3a"));
        assert_eq!(defaults.get(StyleName::HighlightColor), StyleValue::from("#ff0000"));
        assert_eq!(defaults.get(StyleName::VectorOpacity), StyleValue::from(20));
        assert_eq!(defaults.get(StyleName::SelectOpacity), StyleValue::from(40));
        assert_eq!(defaults.get(StyleName::StrokeOpacity), StyleValue::from(70));
        assert_eq!(defaults.get(StyleName::GraphicOpacity), StyleValue::from(100));
        assert_eq!(defaults.get(StyleName::StrokeWidth), StyleValue::from(4));
        assert_eq!(defaults.get(StyleName::PointRadius), StyleValue::from(6));
        assert_eq!(defaults.get(StyleName::PointImage), StyleValue::from(""));
    }

    #[test]
    fn test_every_default_fits_its_kind() {
        let defaults = StyleDefaults::default();
        for name in StyleName::ALL {
            assert!(defaults.get(name).fits(name.kind()), "{}", name);
        }
    }

    #[test]
    fn test_file_overrides_compiled_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("neatline.toml");
        fs::write(&path, "stroke_width = 9\npoint_image = \"pin.png\"\n").unwrap();

        let defaults = StyleDefaults::load(&[&path]).unwrap();
        assert_eq!(defaults.stroke_width, 9);
        assert_eq!(defaults.point_image, "pin.png");
        assert_eq!(defaults.vector_color, "#ffb80e");
    }

    #[test]
    fn test_first_file_wins() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let global = dir.path().join("global.toml");
        fs::write(&explicit, "point_radius = 12\n").unwrap();
        fs::write(&global, "point_radius = 3\nselect_opacity = 55\n").unwrap();

        let defaults = StyleDefaults::load(&[&explicit, &global]).unwrap();
        assert_eq!(defaults.point_radius, 12);
        assert_eq!(defaults.select_opacity, 55);
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let defaults = StyleDefaults::load(&[&missing]).unwrap();
        assert_eq!(defaults.graphic_opacity, 100);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("neatline.toml");
        fs::write(&path, "stroke_width = \"wide\"\n").unwrap();
        assert!(StyleDefaults::load(&[&path]).is_err());
    }

    #[test]
    fn test_template_lists_settings() {
        let template = StyleDefaults::template();
        assert!(template.contains("vector_color"));
        assert!(template.contains("point_image"));
    }
}
