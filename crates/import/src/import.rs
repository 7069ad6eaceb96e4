//! Import driver: reconcile every sheet row and upsert the accepted ones.

use std::collections::HashSet;

use rugcat_core::headers::{HeaderRow, RUG_NUMBER_HEADERS};
use rugcat_core::images::{FileProbe, ImageResolver};
use rugcat_core::reconcile::{reconcile_row, ImportSummary, RowDecision, SkipReason};

use crate::sheet::LoadedSheet;
use crate::sink::RugSink;

/// Number of distinct non-blank rug numbers in the sheet.
pub fn distinct_rug_numbers(rows: &[HeaderRow]) -> usize {
    rows.iter()
        .filter_map(|row| row.pick_or_empty(RUG_NUMBER_HEADERS).to_trimmed())
        .collect::<HashSet<_>>()
        .len()
}

/// Log what was read before anything is written.
pub fn log_sheet_diagnostics(sheet: &LoadedSheet) {
    tracing::info!(
        sheet = %sheet.name,
        rows = sheet.rows.len(),
        distinct_rug_numbers = distinct_rug_numbers(&sheet.rows),
        "Loaded sheet"
    );
    tracing::info!(headers = %sheet.headers.join(" | "), "Raw headers");
    if let Some(first) = sheet.rows.first() {
        tracing::debug!(keys = ?first.keys(), "Normalized header keys");
    }
}

/// Reconcile `rows` in order and upsert each accepted rug through `sink`.
///
/// Skipped rows and missing images are counted and logged; the first
/// storage failure aborts the run.
pub async fn run_import<S, P>(
    rows: &[HeaderRow],
    images: &ImageResolver<P>,
    sink: &S,
) -> Result<ImportSummary, S::Error>
where
    S: RugSink,
    P: FileProbe,
{
    let mut summary = ImportSummary::default();

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;

        match reconcile_row(row_number, row, images) {
            RowDecision::Skip(skipped) => {
                match skipped.reason {
                    SkipReason::PriceMissing => tracing::debug!(
                        row = row_number,
                        rug_number = %skipped.rug_number,
                        "Row skipped: no sellable price"
                    ),
                    SkipReason::MissingRequired => tracing::warn!(
                        row = row_number,
                        rug_number = %skipped.rug_number,
                        length = skipped.length.as_deref().unwrap_or("(empty)"),
                        width = skipped.width.as_deref().unwrap_or("(empty)"),
                        "Row skipped: rug number or size missing"
                    ),
                }
                summary.record_skip(skipped);
            }
            RowDecision::Accept(accepted) => {
                if accepted.image_missing() {
                    tracing::warn!(
                        row = row_number,
                        rug_number = %accepted.rug.rug_number,
                        sort = accepted.sort.as_deref().unwrap_or(""),
                        length_cm = accepted.rug.length_cm,
                        width_cm = accepted.rug.width_cm,
                        "Image not found"
                    );
                    summary.record_missing_image();
                }

                let outcome = sink.upsert(&accepted.rug).await?;
                tracing::debug!(
                    rug_number = %accepted.rug.rug_number,
                    outcome = outcome.as_str(),
                    "Rug upserted"
                );
                summary.record_outcome(outcome);
            }
        }
    }

    Ok(summary)
}

/// Log the end-of-run report.
pub fn log_summary(summary: &ImportSummary) {
    tracing::info!(
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped,
        missing_images = summary.missing_images,
        "Import finished"
    );
    for skipped in &summary.skipped_sample {
        tracing::info!(
            row = skipped.row,
            reason = %skipped.reason,
            rug_number = %skipped.rug_number,
            length = ?skipped.length,
            width = ?skipped.width,
            "Skipped row"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
