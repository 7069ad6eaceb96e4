//! Image repair driver: re-point stored image paths at files that exist.

use rugcat_core::images::{FileProbe, ImageResolver};
use rugcat_core::repair::{plan_repair, RepairAction, RepairSummary};
use rugcat_db::repositories::RugRepo;
use rugcat_db::DbPool;

/// Plan a repair for every stored rug and write back the rewrites.
///
/// With `dry_run` nothing is written but the summary is the same. Paths
/// are only ever replaced by verified ones, never cleared.
pub async fn run_repair<P: FileProbe>(
    pool: &DbPool,
    images: &ImageResolver<P>,
    dry_run: bool,
) -> Result<RepairSummary, sqlx::Error> {
    let rugs = RugRepo::list_all(pool).await?;
    tracing::info!(count = rugs.len(), dry_run, "Checking stored image paths");

    let mut summary = RepairSummary::default();

    for rug in &rugs {
        let action = plan_repair(rug.image_path.as_deref(), images);
        match &action {
            RepairAction::Rewrite(path) => {
                tracing::info!(
                    rug_number = %rug.rug_number,
                    from = rug.image_path.as_deref().unwrap_or(""),
                    to = %path,
                    "Rewriting image path"
                );
                if !dry_run {
                    RugRepo::set_image_path(pool, &rug.rug_number, path).await?;
                }
            }
            RepairAction::Missing(path) => {
                tracing::warn!(rug_number = %rug.rug_number, path = %path, "Image still missing");
            }
            RepairAction::UnexpectedPattern(name) => {
                tracing::warn!(
                    rug_number = %rug.rug_number,
                    file_name = %name,
                    "Image file name does not follow the naming convention"
                );
            }
            RepairAction::Unchanged => {}
        }
        summary.record(&action);
    }

    tracing::info!(
        fixed = summary.fixed,
        skipped = summary.skipped,
        missing = summary.missing,
        unexpected = summary.unexpected,
        "Repair finished"
    );
    Ok(summary)
}
