//! Spreadsheet header resolution.
//!
//! Source workbooks disagree on header spelling ("Länge", "Lange",
//! "Laenge", "length"). Every row is keyed by a normalized header and
//! fields are looked up through an ordered list of candidate names.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::cell::CellValue;

// ---------------------------------------------------------------------------
// Candidate header names, most canonical first
// ---------------------------------------------------------------------------

pub const RUG_NUMBER_HEADERS: &[&str] = &["Nummer", "nummer", "RugNumber"];
pub const NAME_HEADERS: &[&str] = &["Name", "Bezeichnung"];
pub const SORT_HEADERS: &[&str] = &["sort", "Sort"];
pub const LENGTH_HEADERS: &[&str] = &["Länge", "Lange", "Laenge", "length", "Length"];
pub const WIDTH_HEADERS: &[&str] = &["Breite", "width", "Width"];
pub const PRICE_HEADERS: &[&str] = &[
    "Preis Gesamt",
    "PreisGesamt",
    "preis gesamt",
    "Price",
    "price",
];
pub const COLOR_HEADERS: &[&str] = &["Farbe", "farbe", "Color", "color"];
pub const IMAGE_HEADERS: &[&str] = &["Bild", "bild", "Image", "image", "imagePath"];

/// Unicode block "Combining Diacritical Marks".
const COMBINING_DIACRITICS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Normalize a header for comparison: decompose, drop combining marks,
/// collapse whitespace runs, trim and lower-case.
///
/// `"  LÄNGE "` and `"Lange"` both normalize to `"lange"`.
pub fn normalize_header(raw: &str) -> String {
    let stripped: String = raw
        .nfkd()
        .filter(|c| !COMBINING_DIACRITICS.contains(c))
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// One spreadsheet row keyed by normalized header.
#[derive(Debug, Clone, Default)]
pub struct HeaderRow {
    cells: HashMap<String, CellValue>,
}

impl HeaderRow {
    /// Build a row from `(raw header, value)` pairs. When two headers
    /// normalize to the same key the later column wins.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, CellValue)>,
        K: AsRef<str>,
    {
        let cells = pairs
            .into_iter()
            .map(|(header, value)| (normalize_header(header.as_ref()), value))
            .collect();
        Self { cells }
    }

    /// Value of the first candidate header present in the row.
    ///
    /// `None` means no candidate column exists, which is distinct from
    /// `Some(&CellValue::Empty)` for a present but blank cell.
    pub fn pick(&self, candidates: &[&str]) -> Option<&CellValue> {
        candidates
            .iter()
            .find_map(|candidate| self.cells.get(&normalize_header(candidate)))
    }

    /// Like [`pick`](Self::pick), collapsing absence into an empty cell.
    pub fn pick_or_empty(&self, candidates: &[&str]) -> &CellValue {
        self.pick(candidates).unwrap_or(&EMPTY_CELL)
    }

    /// Normalized header keys, sorted (diagnostics only).
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.cells.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
