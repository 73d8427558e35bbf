//! Style value type.

use super::spec::StyleKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime representation of a style value.
///
/// Colors and image addresses are text, opacities and sizes are integers. On the wire
/// the value is a bare JSON string or number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(i64),
    Text(String),
}

impl StyleValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(_) => None,
        }
    }

    /// Whether this value can be stored in a field of the given kind.
    pub fn fits(&self, kind: StyleKind) -> bool {
        match self {
            StyleValue::Number(_) => kind.is_numeric(),
            StyleValue::Text(_) => !kind.is_numeric(),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}
