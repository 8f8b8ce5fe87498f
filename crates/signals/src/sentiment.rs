//! News sentiment aggregation.
//!
//! Collapses the scored articles published in a trailing window into one
//! sentiment scalar. Each article is weighted by its impact score and by a
//! hyperbolic recency decay that never drops below a floor, so older items
//! fade without vanishing.
//!
//! ## Key Concepts
//!
//! - **Recency weight**: `max(floor, 1 / (1 + hours_ago / scale))`
//! - **Weight**: `impact * recency`
//! - **Average**: `Σ sentiment·weight / Σ weight`
//! - **Confidence**: `|average|`, clamped to [0, 1]
//!
//! Negative sentiment never becomes a directional signal here: a positive
//! average is BUY, everything else is HOLD.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use newsblend_core::{
    round_to, Candle, Clock, NewsItem, NewsSource, SentimentConfig, SignalType, Strategy,
    StrategyResult, SystemClock, Timeframe,
};

pub const NOT_ENOUGH_NEWS: &str = "not_enough_news";
pub const NEWS_UNAVAILABLE: &str = "news_unavailable";

/// Confidence reported when the aggregate could not be formed.
const DEGRADED_CONFIDENCE: f64 = 0.1;

// ============================================
// Weighting
// ============================================

/// Recency weight of an article published `hours_ago` hours before the
/// reference instant.
///
/// A non-positive `scale_hours` disables decay.
#[must_use]
pub fn recency_weight(hours_ago: f64, scale_hours: f64, floor: f64) -> f64 {
    if scale_hours <= 0.0 {
        return 1.0;
    }
    (1.0 / (1.0 + hours_ago / scale_hours)).max(floor)
}

/// Impact- and recency-weighted mean sentiment of `items` as of `as_of`.
///
/// Returns 0.0 when there are no items or the total weight is zero.
#[must_use]
pub fn weighted_sentiment(items: &[NewsItem], as_of: DateTime<Utc>, config: &SentimentConfig) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for item in items {
        let hours_ago = (as_of - item.published_at).num_milliseconds() as f64 / 3_600_000.0;
        let recency = recency_weight(hours_ago, config.recency_scale_hours, config.recency_floor);

        let weight = item.impact() * recency;
        weighted_sum += item.sentiment() * weight;
        weight_total += weight;
    }

    if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        0.0
    }
}

// ============================================
// Snapshot
// ============================================

/// Aggregated news view of one symbol at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSnapshot {
    pub signal_type: SignalType,
    /// Rounded to 3 places
    pub confidence: f64,
    /// Unrounded weighted average in [-1, 1]
    pub avg_sentiment: f64,
    pub articles_count: usize,
    /// Set when the aggregate could not be formed
    pub reason: Option<&'static str>,
}

impl SentimentSnapshot {
    fn degraded(reason: &'static str, articles_count: usize) -> Self {
        Self {
            signal_type: SignalType::Hold,
            confidence: DEGRADED_CONFIDENCE,
            avg_sentiment: 0.0,
            articles_count,
            reason: Some(reason),
        }
    }

    /// Average sentiment rounded the way it is reported in diagnostics.
    #[must_use]
    pub fn reported_sentiment(&self) -> f64 {
        round_to(self.avg_sentiment, 3)
    }

    /// Renders the snapshot as a strategy result.
    #[must_use]
    pub fn to_result(&self) -> StrategyResult {
        let mut result = StrategyResult::new(self.signal_type, self.confidence);
        if let Some(reason) = self.reason {
            result = result.with_extra("reason", reason);
        }
        result
            .with_extra("avg_sentiment", self.reported_sentiment())
            .with_extra("articles_count", self.articles_count as u64)
    }
}

// ============================================
// Aggregator
// ============================================

/// Reads recent news for a symbol and aggregates it into a [`SentimentSnapshot`].
///
/// Stateless between calls; one instance is shared by every combination
/// strategy.
pub struct SentimentAggregator {
    config: SentimentConfig,
    source: Arc<dyn NewsSource>,
    clock: Arc<dyn Clock>,
}

impl SentimentAggregator {
    pub const CODE: &'static str = "NEWS_SENTIMENT_MOMENTUM";
    pub const NAME: &'static str = "News Sentiment Momentum";

    /// Creates an aggregator reading from `source`, anchored on wall-clock time.
    #[must_use]
    pub fn new(source: Arc<dyn NewsSource>, config: SentimentConfig) -> Self {
        Self {
            config,
            source,
            clock: Arc::new(SystemClock),
        }
    }

    /// Sets the clock used as the default "as of" instant.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }

    /// Current reference instant from the configured clock.
    #[must_use]
    pub fn as_of(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns `(avg_sentiment, article_count)` for `symbol` as of `as_of`.
    ///
    /// The average is 0.0 when fewer than `min_articles` articles are found
    /// or the source cannot be read.
    #[must_use]
    pub fn aggregate(&self, symbol: &str, as_of: DateTime<Utc>) -> (f64, usize) {
        let snapshot = self.evaluate(symbol, as_of);
        (snapshot.avg_sentiment, snapshot.articles_count)
    }

    /// Aggregates the trailing news window ending at `as_of`.
    ///
    /// Never fails: an unreadable source degrades to a HOLD snapshot with
    /// reason `news_unavailable`.
    #[must_use]
    pub fn evaluate(&self, symbol: &str, as_of: DateTime<Utc>) -> SentimentSnapshot {
        let Some(since) = self.config.window_start(as_of) else {
            tracing::warn!(
                symbol = %symbol,
                lookback_hours = self.config.lookback_hours,
                "News window out of range, treating sentiment as neutral"
            );
            return SentimentSnapshot::degraded(NEWS_UNAVAILABLE, 0);
        };

        let articles: Vec<NewsItem> = match self.source.fetch_recent_news(symbol, since) {
            Ok(items) => items
                .into_iter()
                .filter(|item| item.published_at <= as_of)
                .collect(),
            Err(e) => {
                tracing::warn!(
                    symbol = %symbol,
                    error = %e,
                    "News source unavailable, treating sentiment as neutral"
                );
                return SentimentSnapshot::degraded(NEWS_UNAVAILABLE, 0);
            }
        };

        self.summarize(symbol, &articles, as_of)
    }

    /// Aggregates as of the configured clock.
    #[must_use]
    pub fn evaluate_now(&self, symbol: &str) -> SentimentSnapshot {
        self.evaluate(symbol, self.as_of())
    }

    fn summarize(&self, symbol: &str, articles: &[NewsItem], as_of: DateTime<Utc>) -> SentimentSnapshot {
        let count = articles.len();
        if count < self.config.min_articles {
            tracing::debug!(
                symbol = %symbol,
                articles = count,
                min_articles = self.config.min_articles,
                "Not enough news for sentiment"
            );
            return SentimentSnapshot::degraded(NOT_ENOUGH_NEWS, count);
        }

        let avg_sentiment = weighted_sentiment(articles, as_of, &self.config);
        let confidence = round_to(avg_sentiment.abs().clamp(0.0, 1.0), 3);

        let signal_type = if avg_sentiment > 0.0 {
            SignalType::Buy
        } else {
            SignalType::Hold
        };

        tracing::debug!(
            symbol = %symbol,
            articles = count,
            avg_sentiment,
            "Aggregated news sentiment"
        );

        SentimentSnapshot {
            signal_type,
            confidence,
            avg_sentiment,
            articles_count: count,
            reason: None,
        }
    }
}

impl Strategy for SentimentAggregator {
    fn code(&self) -> &str {
        Self::CODE
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn timeframe(&self) -> Timeframe {
        Timeframe::Day1
    }

    fn generate_signal(&self, symbol: &str, _candles: &[Candle]) -> StrategyResult {
        self.evaluate_now(symbol).to_result()
    }
}
