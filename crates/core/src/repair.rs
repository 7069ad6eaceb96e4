//! Image path repair for already-stored rugs.
//!
//! Older imports stored `.jpeg` paths where the asset set now only has
//! `.jpg` files, and some rows hold a bare file name instead of a path.
//! [`plan_repair`] decides per stored path what to do; it only ever
//! proposes a rewrite to a path that exists, and never clears a path.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::images::{extension_of, with_extension, FileProbe, ImageResolver};

/// `<sort>-<number>-<length>x<width>-<seq>.<jpg|jpeg>`, e.g.
/// `2-15057-272x183-01.jpg`.
static IMAGE_FILE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)-(\d+)-(\d+)x(\d+)-(\d+)\.(jpe?g)$").expect("valid regex")
});

/// Decision for one stored image path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "path", rename_all = "snake_case")]
pub enum RepairAction {
    /// Write this verified path back to the record.
    Rewrite(String),
    /// Nothing to do (no path, already valid, or an extension we leave alone).
    Unchanged,
    /// Path (or its reconstruction) does not exist on disk.
    Missing(String),
    /// Bare file name that does not follow the naming convention.
    UnexpectedPattern(String),
}

/// Totals of a repair run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairSummary {
    pub fixed: u64,
    pub skipped: u64,
    pub missing: u64,
    pub unexpected: u64,
}

impl RepairSummary {
    pub fn record(&mut self, action: &RepairAction) {
        match action {
            RepairAction::Rewrite(_) => self.fixed += 1,
            RepairAction::Unchanged => self.skipped += 1,
            RepairAction::Missing(_) => self.missing += 1,
            RepairAction::UnexpectedPattern(_) => self.unexpected += 1,
        }
    }
}

/// The base directory a conventional image file belongs in:
/// `2-15057-272x183-01.jpg` -> `2-15057-272x183`.
pub fn base_from_file_name(file_name: &str) -> Option<String> {
    let caps = IMAGE_FILE_NAME_RE.captures(file_name)?;
    Some(format!("{}-{}-{}x{}", &caps[1], &caps[2], &caps[3], &caps[4]))
}

/// Decide how to repair a stored image path.
pub fn plan_repair<P: FileProbe>(
    image_path: Option<&str>,
    images: &ImageResolver<P>,
) -> RepairAction {
    let path = match image_path.map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => return RepairAction::Unchanged,
    };

    if path.contains('/') {
        return plan_full_path(path, images);
    }

    let Some(base) = base_from_file_name(path) else {
        return RepairAction::UnexpectedPattern(path.to_string());
    };
    let rebuilt = with_extension(&images.path_in_base_dir(&base, path), "jpg");
    if images.probe().exists(&rebuilt) {
        RepairAction::Rewrite(rebuilt)
    } else {
        RepairAction::Missing(rebuilt)
    }
}

fn plan_full_path<P: FileProbe>(path: &str, images: &ImageResolver<P>) -> RepairAction {
    match extension_of(path).as_deref() {
        Some("jpeg") => {
            let jpg = with_extension(path, "jpg");
            if images.probe().exists(&jpg) {
                RepairAction::Rewrite(jpg)
            } else {
                RepairAction::Unchanged
            }
        }
        Some("jpg") => {
            if images.probe().exists(path) {
                RepairAction::Unchanged
            } else {
                RepairAction::Missing(path.to_string())
            }
        }
        _ => RepairAction::Unchanged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::images::DEFAULT_IMAGE_COLLECTION;

    const JPG: &str = "images/nain_trading/2-15057-272x183/2-15057-272x183-01.jpg";
    const JPEG: &str = "images/nain_trading/2-15057-272x183/2-15057-272x183-01.jpeg";

    fn resolver(files: &[&str]) -> ImageResolver<HashSet<String>> {
        ImageResolver::new(
            files.iter().map(|f| f.to_string()).collect(),
            DEFAULT_IMAGE_COLLECTION,
        )
    }

    #[test]
    fn empty_path_is_left_alone() {
        let r = resolver(&[JPG]);
        assert_eq!(plan_repair(None, &r), RepairAction::Unchanged);
        assert_eq!(plan_repair(Some("  "), &r), RepairAction::Unchanged);
    }

    #[test]
    fn jpeg_with_jpg_sibling_is_rewritten() {
        let r = resolver(&[JPG]);
        assert_eq!(plan_repair(Some(JPEG), &r), RepairAction::Rewrite(JPG.into()));
    }

    #[test]
    fn uppercase_jpeg_is_rewritten() {
        let r = resolver(&[JPG]);
        let upper = JPEG.replace(".jpeg", ".JPEG");
        assert_eq!(plan_repair(Some(&upper), &r), RepairAction::Rewrite(JPG.into()));
    }

    #[test]
    fn jpeg_without_sibling_is_unchanged() {
        let r = resolver(&[JPEG]);
        assert_eq!(plan_repair(Some(JPEG), &r), RepairAction::Unchanged);
    }

    #[test]
    fn existing_jpg_is_unchanged() {
        let r = resolver(&[JPG]);
        assert_eq!(plan_repair(Some(JPG), &r), RepairAction::Unchanged);
    }

    #[test]
    fn missing_jpg_is_flagged_not_modified() {
        let r = resolver(&[]);
        assert_eq!(plan_repair(Some(JPG), &r), RepairAction::Missing(JPG.into()));
    }

    #[test]
    fn other_extensions_are_untouched() {
        let r = resolver(&[]);
        assert_eq!(
            plan_repair(Some("images/x/y.png"), &r),
            RepairAction::Unchanged
        );
    }

    #[test]
    fn bare_file_name_is_rebuilt_as_jpg() {
        let r = resolver(&[JPG]);
        assert_eq!(
            plan_repair(Some("2-15057-272x183-01.jpeg"), &r),
            RepairAction::Rewrite(JPG.into())
        );
        assert_eq!(
            plan_repair(Some("2-15057-272x183-01.jpg"), &r),
            RepairAction::Rewrite(JPG.into())
        );
    }

    #[test]
    fn bare_file_name_without_file_is_missing() {
        let r = resolver(&[]);
        assert_eq!(
            plan_repair(Some("2-15057-272x183-01.jpg"), &r),
            RepairAction::Missing(JPG.into())
        );
    }

    #[test]
    fn diverging_file_names_are_unexpected() {
        let r = resolver(&[JPG]);
        for name in [
            "teppich-1.jpg",
            "2-15057-272x183.jpg",
            "2-15057-272-183-01.jpg",
            "A2-15057-272x183-01.jpg",
            "2-15057-272x183-01.png",
        ] {
            assert_eq!(
                plan_repair(Some(name), &r),
                RepairAction::UnexpectedPattern(name.into()),
                "name: {name}"
            );
        }
    }

    #[test]
    fn base_extraction() {
        assert_eq!(
            base_from_file_name("24860-1073-141x72-01.JPG").as_deref(),
            Some("24860-1073-141x72")
        );
        assert_eq!(base_from_file_name("nope.jpg"), None);
    }

    #[test]
    fn summary_counts_each_action() {
        let mut summary = RepairSummary::default();
        summary.record(&RepairAction::Rewrite("a".into()));
        summary.record(&RepairAction::Unchanged);
        summary.record(&RepairAction::Missing("b".into()));
        summary.record(&RepairAction::UnexpectedPattern("c".into()));
        summary.record(&RepairAction::Unchanged);
        assert_eq!(
            summary,
            RepairSummary { fixed: 1, skipped: 2, missing: 1, unexpected: 1 }
        );
    }
}
