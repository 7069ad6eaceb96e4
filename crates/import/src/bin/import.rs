use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rugcat_import::config::ImportArgs;
use rugcat_import::error::ImportError;
use rugcat_import::import::{log_sheet_diagnostics, log_summary, run_import};
use rugcat_import::sheet::load_sheet;
use rugcat_import::sink::PgRugSink;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rugcat_import=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ImportArgs::parse();

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "Import failed");
        std::process::exit(1);
    }
}

async fn run(args: ImportArgs) -> Result<(), ImportError> {
    tracing::info!(file = %args.file.display(), sheet = %args.sheet, "Reading spreadsheet");
    let sheet = load_sheet(&args.file, &args.sheet)?;
    log_sheet_diagnostics(&sheet);

    if sheet.rows.is_empty() {
        tracing::warn!("No data rows found; check the file and sheet name");
        return Ok(());
    }

    let pool = rugcat_db::create_pool(&args.database_url).await?;
    rugcat_db::run_migrations(&pool).await?;

    let sink = PgRugSink::new(pool.clone());
    let result = run_import(&sheet.rows, &args.assets.resolver(), &sink).await;
    pool.close().await;

    log_summary(&result?);
    Ok(())
}
