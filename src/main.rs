use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing::info;

use linkedcraft::cli::{handle_command, Cli, Command};
use linkedcraft::config::{AppConfig, LoggingConfig};
use linkedcraft::core::Database;
use linkedcraft::trends::{SqliteSnapshotStore, ThreadRandom, TrendPipeline};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "linkedcraft=info,rocket::server=off";

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(logging.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER))
    })?;

    match &logging.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
            }
            // Clear file on startup
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(file)
                        .with_current_span(false)
                        .with_span_list(false),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .init();
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)?;
    init_logging(&config.logging)?;
    config.ensure_directories().await?;

    info!("Environment: {}", config.environment);
    info!("Database: {}", config.database_path.display());
    info!("Skills API: {}", config.skills_api.base_url);
    info!("LLM: {} ({})", config.llm.base_url, config.llm.model);

    let database = Database::new(&config.database_path).await?;
    let store = Arc::new(SqliteSnapshotStore::new(database));
    let pipeline = TrendPipeline::from_app_config(&config, store, Arc::new(ThreadRandom))?;

    let command = cli.command.unwrap_or(Command::Serve);
    handle_command(command, &config, pipeline).await
}
