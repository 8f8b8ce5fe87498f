use std::sync::Arc;

use newsblend_core::{BreakoutConfig, Candle, FusionConfig, Strategy, StrategyResult, Timeframe};
use newsblend_signals::{highest_high, SentimentAggregator};

use crate::fusion::fuse;
use crate::NOT_ENOUGH_CANDLES;

/// News + breakout above the prior `lookback`-candle high.
///
/// The latest candle is excluded from the high it has to break.
pub struct BreakoutStrategy {
    config: BreakoutConfig,
    fusion: FusionConfig,
    sentiment: Arc<SentimentAggregator>,
}

impl BreakoutStrategy {
    pub const CODE: &'static str = "NEWS_BREAKOUT_COMBO";
    pub const NAME: &'static str = "News + Breakout High Momentum (20D)";

    #[must_use]
    pub fn new(
        config: BreakoutConfig,
        fusion: FusionConfig,
        sentiment: Arc<SentimentAggregator>,
    ) -> Self {
        Self {
            config,
            fusion,
            sentiment,
        }
    }

    #[must_use]
    pub fn min_history(&self) -> usize {
        self.config.lookback + 1
    }
}

impl Strategy for BreakoutStrategy {
    fn code(&self) -> &str {
        Self::CODE
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn timeframe(&self) -> Timeframe {
        self.config.timeframe
    }

    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> StrategyResult {
        let Some((last, prior)) = candles.split_last() else {
            return StrategyResult::insufficient(NOT_ENOUGH_CANDLES);
        };
        if candles.len() < self.min_history() {
            return StrategyResult::insufficient(NOT_ENOUGH_CANDLES);
        }

        let close = last.close;
        let prior_high = highest_high(prior, self.config.lookback);
        let tech_buy = close > prior_high;

        let news = self.sentiment.evaluate_now(symbol);
        let fusion = fuse(tech_buy, &news, &self.fusion);

        tracing::debug!(
            symbol = %symbol,
            strategy = Self::CODE,
            close,
            prior_high,
            tech_buy,
            "Evaluated breakout"
        );

        fusion
            .into_result(&news)
            .with_extra("close", close)
            .with_extra("highest_high_lookback", prior_high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use newsblend_core::{FixedClock, NewsItem, SentimentConfig, SignalType, StaticNewsSource};

    // ============================================
    // Helper Functions
    // ============================================

    fn sample_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 29, 18, 0, 0).unwrap()
    }

    fn candle(day: i64, close: f64, high: f64) -> Candle {
        Candle {
            time: sample_timestamp() - Duration::days(30 - day),
            open: close,
            high,
            low: close - 1.0,
            close,
            volume: 10_000.0,
        }
    }

    /// 20 candles topping out at 110, then `last_close`.
    fn series(last_close: f64) -> Vec<Candle> {
        let mut candles: Vec<Candle> = (0..20)
            .map(|day| candle(day, 100.0, if day == 5 { 110.0 } else { 102.0 }))
            .collect();
        candles.push(candle(20, last_close, last_close + 0.5));
        candles
    }

    fn strategy() -> BreakoutStrategy {
        let news = vec![
            NewsItem::new(sample_timestamp() - Duration::hours(3), 0.8, 0.9),
            NewsItem::new(sample_timestamp() - Duration::hours(5), 0.6, 0.7),
        ];
        let source = StaticNewsSource::new().with_items("NVDA", news);
        let aggregator = SentimentAggregator::new(Arc::new(source), SentimentConfig::default())
            .with_clock(Arc::new(FixedClock(sample_timestamp())));
        BreakoutStrategy::new(
            BreakoutConfig::default(),
            FusionConfig::default(),
            Arc::new(aggregator),
        )
    }

    // ============================================
    // Signal Tests
    // ============================================

    #[test]
    fn below_prior_high_holds() {
        let result = strategy().generate_signal("NVDA", &series(105.0));

        assert_eq!(result.signal_type, SignalType::Hold);
        assert!((result.confidence - 0.2).abs() < f64::EPSILON);
        assert_eq!(result.extra["highest_high_lookback"], 110.0);
        assert_eq!(result.extra["close"], 105.0);
    }

    #[test]
    fn close_above_prior_high_buys() {
        let result = strategy().generate_signal("NVDA", &series(111.0));

        assert_eq!(result.signal_type, SignalType::Buy);
        assert!(result.confidence >= 0.35);
        assert_eq!(result.extra["highest_high_lookback"], 110.0);
    }

    #[test]
    fn last_candle_high_is_not_its_own_barrier() {
        // The final candle's high (111.5) must not count against its close
        let result = strategy().generate_signal("NVDA", &series(111.0));
        assert!(result.is_buy());
    }

    #[test]
    fn short_history_holds() {
        let candles = series(111.0);
        let result = strategy().generate_signal("NVDA", &candles[..20]);

        assert_eq!(result.reason(), Some(NOT_ENOUGH_CANDLES));
        assert!(strategy().generate_signal("NVDA", &[]).reason().is_some());
    }
}
