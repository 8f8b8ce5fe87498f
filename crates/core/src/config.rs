use crate::timeframe::Timeframe;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub runner: RunnerConfig,
    pub sentiment: SentimentConfig,
    pub fusion: FusionConfig,
    pub strategies: StrategiesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/newsblend".to_string(),
            max_connections: 5,
        }
    }
}

/// Symbol universe and candle window for one orchestration pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub symbols: Vec<String>,
    pub timeframe: Timeframe,
    /// Most recent candles loaded per symbol
    pub candle_limit: i64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["AAPL".to_string()],
            timeframe: Timeframe::Day1,
            candle_limit: 300,
        }
    }
}

/// News aggregation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Trailing news window
    pub lookback_hours: i64,
    /// Fewer articles than this yields a HOLD with reason `not_enough_news`
    pub min_articles: usize,
    /// Recency weight is `1 / (1 + hours_ago / recency_scale_hours)`
    pub recency_scale_hours: f64,
    /// Lower bound on the recency weight
    pub recency_floor: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            lookback_hours: 24,
            min_articles: 2,
            recency_scale_hours: 8.0,
            recency_floor: 0.1,
        }
    }
}

impl SentimentConfig {
    /// Start of the news window ending at `as_of`.
    ///
    /// `None` when `lookback_hours` does not fit a representable instant.
    #[must_use]
    pub fn window_start(&self, as_of: DateTime<Utc>) -> Option<DateTime<Utc>> {
        Duration::try_hours(self.lookback_hours).and_then(|lookback| as_of.checked_sub_signed(lookback))
    }
}

/// Weights and thresholds for merging a technical condition with sentiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub tech_weight: f64,
    pub news_weight: f64,
    /// Scales `tech_weight` when the technical condition fails
    pub tech_miss_factor: f64,
    /// Lower bound on the news confidence used for `news_weight`
    pub news_confidence_floor: f64,
    /// Minimum normalized score for a BUY
    pub buy_threshold: f64,
    /// Confidence reported on every fused HOLD
    pub hold_confidence: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            tech_weight: 0.7,
            news_weight: 0.3,
            tech_miss_factor: 0.5,
            news_confidence_floor: 0.2,
            buy_threshold: 0.35,
            hold_confidence: 0.2,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategiesConfig {
    pub mean_reversion: MeanReversionConfig,
    pub breakout: BreakoutConfig,
    pub trend_pullback: TrendPullbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeanReversionConfig {
    pub rsi_period: usize,
    pub oversold: f64,
    pub timeframe: Timeframe,
}

impl Default for MeanReversionConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            oversold: 30.0,
            timeframe: Timeframe::Day1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutConfig {
    pub lookback: usize,
    pub timeframe: Timeframe,
}

impl Default for BreakoutConfig {
    fn default() -> Self {
        Self {
            lookback: 20,
            timeframe: Timeframe::Day1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPullbackConfig {
    pub ma_period: usize,
    /// Maximum drop from the recent high; the minimum is half of this
    pub pullback_pct: f64,
    /// Closes scanned for the recent high
    pub high_window: usize,
    pub timeframe: Timeframe,
}

impl Default for TrendPullbackConfig {
    fn default() -> Self {
        Self {
            ma_period: 200,
            pullback_pct: 0.05,
            high_window: 20,
            timeframe: Timeframe::Day1,
        }
    }
}
