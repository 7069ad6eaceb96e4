//! Per-row reconciliation of spreadsheet data into canonical rug records.
//!
//! This module has zero external dependencies (no DB, no async, no I/O
//! beyond the [`FileProbe`] behind the image resolver). It provides:
//!
//! - [`NewRug`], the canonical record handed to storage.
//! - [`reconcile_row`], the gate sequence deciding accept vs. skip.
//! - [`ImportSummary`], the aggregate counters of an import run.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::headers::{
    HeaderRow, COLOR_HEADERS, IMAGE_HEADERS, LENGTH_HEADERS, NAME_HEADERS, PRICE_HEADERS,
    RUG_NUMBER_HEADERS, SORT_HEADERS, WIDTH_HEADERS,
};
use crate::images::{build_image_base, FileProbe, ImageResolver};
use crate::normalize::{euro_to_cents, to_cm};
use crate::types::{Cents, Timestamp};

/// Number of skipped rows kept for the end-of-run report.
pub const SKIPPED_SAMPLE_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A validated rug ready to be upserted by `rug_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRug {
    pub rug_number: String,
    pub name: Option<String>,
    pub length_cm: i64,
    pub width_cm: i64,
    pub color: Option<String>,
    pub price_cents: Cents,
    pub image_path: Option<String>,
}

/// Why a row was not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Price empty, unparseable or not positive: the rug is not sellable.
    PriceMissing,
    /// Rug number, length or width missing or zero.
    MissingRequired,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PriceMissing => "price_missing",
            Self::MissingRequired => "missing_required",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic for a skipped row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based data row number (header row excluded).
    pub row: usize,
    pub reason: SkipReason,
    pub rug_number: String,
    /// Raw length cell as text, for the report.
    pub length: Option<String>,
    /// Raw width cell as text, for the report.
    pub width: Option<String>,
}

/// A row that passed both gates.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedRow {
    pub rug: NewRug,
    /// Sort code as read from the sheet, kept for missing-image logs.
    pub sort: Option<String>,
}

impl AcceptedRow {
    pub fn image_missing(&self) -> bool {
        self.rug.image_path.is_none()
    }
}

/// Outcome of reconciling one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowDecision {
    Accept(AcceptedRow),
    Skip(SkippedRow),
}

/// Whether an upsert inserted a new row or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    /// Storage stamps both timestamps identically on insert; any later
    /// write advances `updated_at` only.
    pub fn classify(created_at: Timestamp, updated_at: Timestamp) -> Self {
        if created_at == updated_at {
            Self::Created
        } else {
            Self::Updated
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

/// Aggregate result of an import run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub created: u64,
    pub updated: u64,
    pub skipped: u64,
    pub missing_images: u64,
    /// First [`SKIPPED_SAMPLE_LIMIT`] skipped rows.
    pub skipped_sample: Vec<SkippedRow>,
}

impl ImportSummary {
    pub fn record_skip(&mut self, skipped: SkippedRow) {
        self.skipped += 1;
        if self.skipped_sample.len() < SKIPPED_SAMPLE_LIMIT {
            self.skipped_sample.push(skipped);
        }
    }

    pub fn record_missing_image(&mut self) {
        self.missing_images += 1;
    }

    pub fn record_outcome(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
        }
    }

    /// Rows persisted (created + updated).
    pub fn persisted(&self) -> u64 {
        self.created + self.updated
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Reconcile one spreadsheet row.
///
/// Gate order matters: a row without a sellable price is reported as
/// [`SkipReason::PriceMissing`] even when its identity fields are also
/// missing. A missing image never rejects a row.
pub fn reconcile_row<P: FileProbe>(
    row_number: usize,
    row: &HeaderRow,
    images: &ImageResolver<P>,
) -> RowDecision {
    let rug_number = row
        .pick_or_empty(RUG_NUMBER_HEADERS)
        .to_trimmed()
        .unwrap_or_default();
    let length_cell = row.pick_or_empty(LENGTH_HEADERS);
    let width_cell = row.pick_or_empty(WIDTH_HEADERS);
    let length_cm = to_cm(length_cell);
    let width_cm = to_cm(width_cell);
    let price_cents = euro_to_cents(row.pick_or_empty(PRICE_HEADERS));

    let skip = |reason| {
        RowDecision::Skip(SkippedRow {
            row: row_number,
            reason,
            rug_number: rug_number.clone(),
            length: raw_text(length_cell),
            width: raw_text(width_cell),
        })
    };

    let price_cents = match price_cents {
        Some(cents) if cents > 0 => cents,
        _ => return skip(SkipReason::PriceMissing),
    };

    let (length_cm, width_cm) = match (positive(length_cm), positive(width_cm)) {
        (Some(l), Some(w)) if !rug_number.is_empty() => (l, w),
        _ => return skip(SkipReason::MissingRequired),
    };

    let sort = row.pick_or_empty(SORT_HEADERS).to_trimmed();
    let provided_image = row.pick_or_empty(IMAGE_HEADERS).to_trimmed();
    let base = build_image_base(sort.as_deref(), &rug_number, Some(length_cm), Some(width_cm));
    let image_path = images.resolve(provided_image.as_deref(), base.as_deref());

    RowDecision::Accept(AcceptedRow {
        rug: NewRug {
            name: row.pick_or_empty(NAME_HEADERS).to_trimmed(),
            color: row.pick_or_empty(COLOR_HEADERS).to_trimmed(),
            rug_number,
            length_cm,
            width_cm,
            price_cents,
            image_path,
        },
        sort,
    })
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v > 0)
}

fn raw_text(cell: &CellValue) -> Option<String> {
    cell.to_text().map(|s| s.into_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
