//! Data-store validation entry point: loads the configured actor
//! database and reports a summary, failing hard when the initial load
//! does.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foundry_core::application::services::GameDataService;
use foundry_core::infrastructure::config::FoundryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foundry_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Foundry Core");

    let config = FoundryConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Base URL: {}", config.base_url);
    tracing::info!("  Actor database: {}", config.actors_db.display());

    // A failed startup load is fatal: no partial or degraded state is
    // offered, and that decision is made here rather than inside the
    // service.
    let service = match GameDataService::initialize(config).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("initial data load failed: {e:#}");
            std::process::exit(1);
        }
    };

    let actors = service.get_actors(false).await?;
    let player_characters = actors.values().filter(|a| a.is_player_character()).count();
    let skills: usize = actors.values().map(|a| a.skills().len()).sum();
    tracing::info!(
        actors = actors.len(),
        player_characters,
        skills,
        "game data ready"
    );

    Ok(())
}
