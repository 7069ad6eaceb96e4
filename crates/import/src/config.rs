//! Command-line configuration for the batch tools.
//!
//! Every flag falls back to an environment variable (loaded from `.env`
//! by the binaries before parsing) and then to a development default.

use std::path::PathBuf;

use clap::{Args, Parser};
use rugcat_core::images::{ImageResolver, PublicDirProbe, DEFAULT_IMAGE_COLLECTION};

/// Where image assets live.
#[derive(Debug, Clone, Args)]
pub struct AssetArgs {
    /// Directory served as the site root; image paths are relative to it
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Image collection below the public directory
    #[arg(long, env = "IMAGE_COLLECTION", default_value = DEFAULT_IMAGE_COLLECTION)]
    pub image_collection: String,
}

impl AssetArgs {
    /// Resolver that checks candidate paths against the public directory.
    pub fn resolver(&self) -> ImageResolver<PublicDirProbe> {
        ImageResolver::new(
            PublicDirProbe::new(&self.public_dir),
            self.image_collection.clone(),
        )
    }
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "rugcat-import",
    version,
    about = "Import the rug spreadsheet into the catalog"
)]
pub struct ImportArgs {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Spreadsheet to import (.xlsx, .xlsm, .xls, .ods or .csv)
    #[arg(long, env = "IMPORT_FILE", default_value = "data/teppiche.xlsx")]
    pub file: PathBuf,

    /// Sheet name; matched exactly first, then ignoring case and padding
    #[arg(long, env = "IMPORT_SHEET", default_value = "Sheet1")]
    pub sheet: String,

    #[command(flatten)]
    pub assets: AssetArgs,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "rugcat-repair-images",
    version,
    about = "Rewrite stored image paths to files that exist"
)]
pub struct RepairArgs {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    #[command(flatten)]
    pub assets: AssetArgs,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}
