//! Evaluate command: score CSV candles and news without a database.

use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Args;
use newsblend_core::{NewsSource, StaticNewsSource, Timeframe};
use newsblend_data::CsvStorage;

use super::{load_config, parse_as_of};
use crate::runner::{build_pass_registry, evaluate_strategies};

/// Arguments for the evaluate command.
#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Candle CSV (time,open,high,low,close,volume)
    #[arg(long)]
    pub candles: String,

    /// News CSV (symbol,published_at,sentiment_score,impact_score)
    #[arg(long)]
    pub news: Option<String>,

    /// Symbol the candles belong to
    #[arg(long, default_value = "AAPL")]
    pub symbol: String,

    /// Only evaluate strategies on this timeframe
    #[arg(long)]
    pub timeframe: Option<Timeframe>,

    /// Reference instant for the news window, RFC 3339 (default: now)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,
}

/// Runs the evaluate command, printing results as JSON.
///
/// # Errors
/// Returns an error if configuration or input files cannot be read.
pub fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let config = load_config(&args.config, None)?;

    let candles = CsvStorage::read_candles(&args.candles)?;
    if candles.is_empty() {
        bail!("No candles in {}", args.candles);
    }

    let news: Arc<dyn NewsSource> = match &args.news {
        Some(path) => Arc::new(CsvStorage::read_news(path)?),
        None => Arc::new(StaticNewsSource::new()),
    };

    let as_of = match &args.as_of {
        Some(raw) => parse_as_of(raw)?,
        None => Utc::now(),
    };

    tracing::info!(
        symbol = %args.symbol,
        candles = candles.len(),
        as_of = %as_of,
        "Evaluating strategies"
    );

    let registry = build_pass_registry(&config, news, as_of);
    let evaluations = evaluate_strategies(&registry, args.timeframe, &args.symbol, &candles);

    println!("{}", serde_json::to_string_pretty(&evaluations)?);
    Ok(())
}
