// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::AppConfig;
use crate::trends::TrendPipeline;
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "linkedcraft")]
#[command(about = "LinkedIn trend suggestions and topic ideas")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(long, global = true, default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP API (default)
    Serve,
    /// Run the trend pipeline once and print the response as JSON
    Refresh {
        /// Ignore a fresh cached snapshot
        #[arg(long)]
        force: bool,
    },
    /// List recently cached snapshots
    History {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Delete all but the most recent snapshots
    Prune {
        #[arg(long)]
        keep: u32,
    },
}

pub async fn handle_command(
    command: Command,
    config: &AppConfig,
    pipeline: TrendPipeline,
) -> Result<()> {
    match command {
        Command::Serve => start_web_server(&config.server, pipeline).await,
        Command::Refresh { force } => {
            let response = pipeline.fetch_trends(force).await?;
            info!(
                "Refresh produced {} trends from {}",
                response.trends.len(),
                response.source
            );
            let json = serde_json::to_string_pretty(&response)
                .context("Failed to serialize trends response")?;
            println!("{}", json);
            Ok(())
        }
        Command::History { limit } => {
            let snapshots = pipeline.store().history(limit).await?;
            if snapshots.is_empty() {
                println!("No cached snapshots");
            }
            for snapshot in snapshots {
                println!(
                    "#{:<6} {}  {} topics, {} hashtags",
                    snapshot.id,
                    snapshot.created_at.to_rfc3339(),
                    snapshot.topic_count,
                    snapshot.hashtag_count
                );
            }
            Ok(())
        }
        Command::Prune { keep } => {
            let removed = pipeline.store().prune(keep).await?;
            info!("Pruned {} snapshots, kept at most {}", removed, keep);
            println!("Removed {} snapshots", removed);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::try_parse_from(["linkedcraft"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
    }

    #[test]
    fn test_parses_subcommands() {
        let cli = Cli::try_parse_from(["linkedcraft", "refresh", "--force"]).unwrap();
        assert_eq!(cli.command, Some(Command::Refresh { force: true }));

        let cli = Cli::try_parse_from(["linkedcraft", "history", "--config", "prod.yaml"]).unwrap();
        assert_eq!(cli.command, Some(Command::History { limit: 10 }));
        assert_eq!(cli.config, PathBuf::from("prod.yaml"));

        assert!(Cli::try_parse_from(["linkedcraft", "prune"]).is_err());
    }
}
