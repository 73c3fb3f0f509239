//! Harvest Management CLI
//!
//! Interactive terminal application for recording land plots and harvest
//! operations, with on-demand reconciliation against a Postgres backing store.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use harvest_management_cli::{config, menu};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harvest_management_cli=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting harvest management CLI");
    tracing::info!("Environment: {}", config.environment);

    menu::run(config).await;

    Ok(())
}
