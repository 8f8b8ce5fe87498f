//! Strategies command: list the registry, optionally syncing the catalog.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Args;
use newsblend_core::StaticNewsSource;
use newsblend_data::DatabaseClient;
use newsblend_signals::SentimentAggregator;
use newsblend_strategy::build_combined_strategies;

use super::load_config;

/// Arguments for the strategies command.
#[derive(Args, Debug, Clone)]
pub struct StrategiesArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Upsert every strategy into the database catalog
    #[arg(long)]
    pub sync: bool,

    /// Database connection URL (uses DATABASE_URL env var if not provided)
    #[arg(long, env = "DATABASE_URL")]
    pub db_url: Option<String>,
}

/// Runs the strategies command.
///
/// # Errors
/// Returns an error if configuration fails to load or the catalog sync fails.
pub async fn run_strategies(args: StrategiesArgs) -> Result<()> {
    let mut config = load_config(&args.config, None)?;

    let aggregator = SentimentAggregator::new(
        Arc::new(StaticNewsSource::new()),
        config.sentiment.clone(),
    );
    let registry =
        build_combined_strategies(&config.strategies, &config.fusion, Arc::new(aggregator));

    println!("{:<26} {:<40} {:>9}", "CODE", "NAME", "TIMEFRAME");
    for strategy in registry.iter() {
        println!(
            "{:<26} {:<40} {:>9}",
            strategy.code(),
            strategy.name(),
            strategy.timeframe()
        );
    }

    if !args.sync {
        return Ok(());
    }

    config.database.url = args
        .db_url
        .ok_or_else(|| anyhow!("DATABASE_URL must be set via --db-url or DATABASE_URL env var"))?;

    let db = DatabaseClient::connect(&config.database).await?;
    let catalog = db.repositories().strategies;

    for strategy in registry.iter() {
        let id = catalog
            .upsert(strategy.code(), strategy.name(), strategy.timeframe())
            .await?;
        tracing::info!(strategy = %strategy.code(), id = %id, "Synced strategy");
    }

    Ok(())
}
