//! Error types for the batch tools.

use std::path::PathBuf;

/// Failure to locate or read the input spreadsheet.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported spreadsheet format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to open workbook {}: {source}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Sheet '{requested}' not found. Available sheets: {}", .available.join(", "))]
    SheetNotFound {
        requested: String,
        available: Vec<String>,
    },

    #[error("Failed to read sheet '{sheet}': {source}")]
    Range {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("Failed to read CSV {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Any fatal error of an import or repair run.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
