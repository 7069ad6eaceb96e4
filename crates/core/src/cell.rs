//! Loosely-typed spreadsheet cell values.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell as delivered by the sheet reader.
///
/// Spreadsheet columns are not typed: the same column may hold `141` as a
/// number in one row and `"1,41m"` as text in the next.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Build a text cell, mapping the empty string to [`CellValue::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    /// `true` for an empty cell or an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Render the cell as text. Integral numbers render without a fraction
    /// (`24860.0` -> `"24860"`). Returns `None` for empty cells.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Empty => None,
            Self::Text(s) if s.is_empty() => None,
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Number(n) => Some(Cow::Owned(n.to_string())),
        }
    }

    /// Trimmed text, or `None` when the cell is empty or whitespace only.
    pub fn to_trimmed(&self) -> Option<String> {
        self.to_text()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}
