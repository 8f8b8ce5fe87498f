//! Run command: one signal pass against the database.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use newsblend_core::{FixedClock, Timeframe};
use newsblend_data::DatabaseClient;

use super::{load_config, parse_as_of};
use crate::runner::SignalRunner;

/// Arguments for the run command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Config profile layered over config/Config.toml (e.g. "weekly")
    #[arg(long)]
    pub profile: Option<String>,

    /// Comma-separated symbols (default: runner.symbols from config)
    #[arg(long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Candle timeframe (default: runner.timeframe from config)
    #[arg(long)]
    pub timeframe: Option<Timeframe>,

    /// Pin the pass to this instant, RFC 3339 (default: now)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Apply bundled migrations before running
    #[arg(long)]
    pub migrate: bool,

    /// Database connection URL (uses DATABASE_URL env var if not provided)
    #[arg(long, env = "DATABASE_URL")]
    pub db_url: Option<String>,
}

/// Runs the run command.
///
/// # Errors
/// Returns an error if configuration, connection or migration fails, or if
/// every asset in the pass failed.
pub async fn run_signals(args: RunArgs) -> Result<()> {
    let mut config = load_config(&args.config, args.profile.as_deref())?;
    let as_of = args.as_of.as_deref().map(parse_as_of).transpose()?;
    if let Some(url) = args.db_url {
        config.database.url = url;
    }
    if let Some(timeframe) = args.timeframe {
        config.runner.timeframe = timeframe;
    }
    let symbols = if args.symbols.is_empty() {
        config.runner.symbols.clone()
    } else {
        args.symbols
    };

    let db = DatabaseClient::connect(&config.database).await?;
    tracing::info!("Connected to database");

    if args.migrate {
        db.migrate().await?;
        tracing::info!("Migrations applied");
    }

    tracing::info!(
        symbols = ?symbols,
        timeframe = %config.runner.timeframe,
        "Starting signal pass"
    );

    let mut runner = SignalRunner::new(db.repositories(), config);
    if let Some(as_of) = as_of {
        tracing::info!(as_of = %as_of, "Pinning pass clock");
        runner = runner.with_clock(Arc::new(FixedClock(as_of)));
    }
    let summary = runner.run_for_universe(&symbols).await;

    if !symbols.is_empty() && summary.assets_failed == symbols.len() {
        bail!("Signal pass failed for every symbol");
    }

    Ok(())
}
