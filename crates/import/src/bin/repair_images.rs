use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rugcat_import::config::RepairArgs;
use rugcat_import::error::ImportError;
use rugcat_import::repair::run_repair;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rugcat_import=info,rugcat_repair_images=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = RepairArgs::parse();

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "Image repair failed");
        std::process::exit(1);
    }
}

async fn run(args: RepairArgs) -> Result<(), ImportError> {
    let pool = rugcat_db::create_pool(&args.database_url).await?;
    let result = run_repair(&pool, &args.assets.resolver(), args.dry_run).await;
    pool.close().await;
    result?;
    Ok(())
}
