//! One signal-generation pass over a symbol universe.
//!
//! Each asset is handled in three steps:
//! 1. Load candles, resolve the asset and snapshot its news window (async I/O)
//! 2. Evaluate every strategy for the timeframe on that fixed input (sync)
//! 3. Persist one signal row per strategy
//!
//! The news window and "as of" instant are pinned per asset, so every
//! strategy in the pass sees the same sentiment.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use newsblend_core::{
    AppConfig, Candle, Clock, FixedClock, NewsItem, NewsSource, StrategyResult, SystemClock,
    Timeframe,
};
use newsblend_data::{CandleRecord, Repositories, SignalRecord};
use newsblend_signals::SentimentAggregator;
use newsblend_strategy::{build_combined_strategies, StrategyRegistry};
use serde::Serialize;

/// Result of one strategy on one window.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub code: String,
    pub name: String,
    pub timeframe: Timeframe,
    pub result: StrategyResult,
}

/// Counters for a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub signals_written: usize,
    pub assets_skipped: usize,
    pub strategies_skipped: usize,
    pub assets_failed: usize,
}

impl RunSummary {
    fn merge(&mut self, other: Self) {
        self.signals_written += other.signals_written;
        self.assets_skipped += other.assets_skipped;
        self.strategies_skipped += other.strategies_skipped;
        self.assets_failed += other.assets_failed;
    }

    fn skipped_asset() -> Self {
        Self {
            assets_skipped: 1,
            ..Self::default()
        }
    }
}

/// Stands in for a news store that could not be read, so the aggregator
/// reports `news_unavailable` instead of the pass failing.
struct UnavailableNews {
    cause: String,
}

impl NewsSource for UnavailableNews {
    fn fetch_recent_news(&self, _symbol: &str, _since: DateTime<Utc>) -> Result<Vec<NewsItem>> {
        Err(anyhow!("news snapshot unavailable: {}", self.cause))
    }
}

/// Builds the registry for one asset, pinned to `as_of`.
#[must_use]
pub fn build_pass_registry(
    config: &AppConfig,
    news: Arc<dyn NewsSource>,
    as_of: DateTime<Utc>,
) -> StrategyRegistry {
    let aggregator = SentimentAggregator::new(news, config.sentiment.clone())
        .with_clock(Arc::new(FixedClock(as_of)));
    build_combined_strategies(&config.strategies, &config.fusion, Arc::new(aggregator))
}

/// Evaluates every strategy registered for `timeframe` on one window.
#[must_use]
pub fn evaluate_strategies(
    registry: &StrategyRegistry,
    timeframe: Option<Timeframe>,
    symbol: &str,
    candles: &[Candle],
) -> Vec<Evaluation> {
    registry
        .iter()
        .filter(|s| timeframe.map_or(true, |tf| s.timeframe() == tf))
        .map(|strategy| Evaluation {
            code: strategy.code().to_string(),
            name: strategy.name().to_string(),
            timeframe: strategy.timeframe(),
            result: strategy.generate_signal(symbol, candles),
        })
        .collect()
}

/// Drives signal generation against the database.
pub struct SignalRunner {
    repos: Repositories,
    config: AppConfig,
    clock: Arc<dyn Clock>,
}

impl SignalRunner {
    #[must_use]
    pub fn new(repos: Repositories, config: AppConfig) -> Self {
        Self {
            repos,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Overrides the wall clock, e.g. to regenerate a past pass.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Runs every configured symbol on the configured timeframe.
    ///
    /// A failing asset is logged and counted; the pass continues.
    pub async fn run_for_universe(&self, symbols: &[String]) -> RunSummary {
        let timeframe = self.config.runner.timeframe;
        let mut summary = RunSummary::default();

        for symbol in symbols {
            match self.run_for_asset(symbol, timeframe).await {
                Ok(asset_summary) => summary.merge(asset_summary),
                Err(e) => {
                    tracing::error!(symbol = %symbol, error = %e, "Signal pass failed for asset");
                    summary.assets_failed += 1;
                }
            }
        }

        tracing::info!(
            symbols = symbols.len(),
            written = summary.signals_written,
            assets_skipped = summary.assets_skipped,
            strategies_skipped = summary.strategies_skipped,
            failed = summary.assets_failed,
            "Signal pass complete"
        );

        summary
    }

    /// Generates and stores one signal per strategy for `symbol`.
    ///
    /// # Errors
    /// Returns an error on database failures. Missing candles, assets or
    /// catalog entries are skipped with a warning instead.
    pub async fn run_for_asset(&self, symbol: &str, timeframe: Timeframe) -> Result<RunSummary> {
        let records = self
            .repos
            .candles
            .fetch_candles(symbol, timeframe, self.config.runner.candle_limit)
            .await?;

        let Some(last) = records.last() else {
            tracing::warn!(symbol = %symbol, timeframe = %timeframe, "No candles, skipping");
            return Ok(RunSummary::skipped_asset());
        };

        let asset_id = match self.repos.assets.resolve(symbol).await {
            Ok(id) => id,
            Err(e) if e.is_not_found() => {
                tracing::warn!(symbol = %symbol, "No asset id, skipping");
                return Ok(RunSummary::skipped_asset());
            }
            Err(e) => return Err(e.into()),
        };

        let as_of = self.clock.now();
        let news = self.news_snapshot(symbol, as_of).await;
        let registry = build_pass_registry(&self.config, news, as_of);
        let candles: Vec<Candle> = records.iter().map(CandleRecord::to_candle).collect();

        let mut summary = RunSummary::default();

        for strategy in registry.for_timeframe(timeframe) {
            let code = strategy.code();
            let strategy_id = match self.repos.strategies.resolve(code).await {
                Ok(id) => id,
                Err(e) if e.is_not_found() => {
                    tracing::warn!(strategy = %code, "No strategy id, skipping");
                    summary.strategies_skipped += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let result = strategy.generate_signal(symbol, &candles);
            let record = SignalRecord::from_result(
                asset_id,
                strategy_id,
                strategy.timeframe(),
                last.close,
                last.time,
                &result,
            );
            self.repos.signals.insert(&record).await?;
            summary.signals_written += 1;

            tracing::info!(
                symbol = %symbol,
                strategy = %code,
                signal = %record.signal_type,
                confidence = result.confidence,
                "[OK] {symbol} - {code} -> {} ({})",
                record.signal_type,
                result.confidence
            );
        }

        Ok(summary)
    }

    async fn news_snapshot(&self, symbol: &str, as_of: DateTime<Utc>) -> Arc<dyn NewsSource> {
        let Some(since) = self.config.sentiment.window_start(as_of) else {
            tracing::warn!(
                symbol = %symbol,
                lookback_hours = self.config.sentiment.lookback_hours,
                "News window out of range"
            );
            return Arc::new(UnavailableNews {
                cause: "news window out of range".to_string(),
            });
        };
        match self.repos.news.load_snapshot(symbol, since, as_of).await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Failed to load news snapshot");
                Arc::new(UnavailableNews {
                    cause: e.to_string(),
                })
            }
        }
    }
}
