use std::sync::Arc;

use newsblend_core::{
    closes, round_to, Candle, FusionConfig, Strategy, StrategyResult, Timeframe,
    TrendPullbackConfig,
};
use newsblend_signals::{drop_from_high, simple_moving_average, SentimentAggregator};

use crate::fusion::fuse;
use crate::NOT_ENOUGH_CANDLES;

/// News + pullback inside a long-term uptrend.
///
/// Technical trigger: close above its `ma_period` SMA while sitting between
/// half of and the full `pullback_pct` below the recent closing high.
pub struct TrendPullbackStrategy {
    config: TrendPullbackConfig,
    fusion: FusionConfig,
    sentiment: Arc<SentimentAggregator>,
}

impl TrendPullbackStrategy {
    pub const CODE: &'static str = "NEWS_TREND_MA200_COMBO";
    pub const NAME: &'static str = "News + Trend MA200 Pullback";

    #[must_use]
    pub fn new(
        config: TrendPullbackConfig,
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
        self.config.ma_period + self.config.high_window
    }

    fn in_pullback_band(&self, drop: f64) -> bool {
        let pct = self.config.pullback_pct;
        (pct * 0.5..=pct).contains(&drop)
    }
}

impl Strategy for TrendPullbackStrategy {
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
        let Some(last) = candles.last() else {
            return StrategyResult::insufficient(NOT_ENOUGH_CANDLES);
        };
        if candles.len() < self.min_history() {
            return StrategyResult::insufficient(NOT_ENOUGH_CANDLES);
        }

        let closes = closes(candles);
        let close = last.close;
        let ma = simple_moving_average(&closes, self.config.ma_period);
        let (recent_high, drop) = drop_from_high(&closes, self.config.high_window);

        let uptrend = close > ma;
        let tech_buy = uptrend && self.in_pullback_band(drop);

        let news = self.sentiment.evaluate_now(symbol);
        let fusion = fuse(tech_buy, &news, &self.fusion);

        tracing::debug!(
            symbol = %symbol,
            strategy = Self::CODE,
            ma,
            drop,
            uptrend,
            tech_buy,
            "Evaluated trend pullback"
        );

        fusion
            .into_result(&news)
            .with_extra("ma200", round_to(ma, 2))
            .with_extra("close", close)
            .with_extra("recent_high", recent_high)
            .with_extra("drop_from_high", round_to(drop, 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use newsblend_core::{FixedClock, SentimentConfig, SignalType, StaticNewsSource};

    // ============================================
    // Helper Functions
    // ============================================

    fn sample_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 29, 18, 0, 0).unwrap()
    }

    fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        let start = sample_timestamp() - Duration::days(closes.len() as i64);
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::flat(start + Duration::days(i as i64), c))
            .collect()
    }

    /// Slow climb from 50 to ~110 over 219 days, then `last_close`.
    fn uptrend_then(last_close: f64) -> Vec<f64> {
        let mut closes: Vec<f64> = (0..219).map(|i| 50.0 + f64::from(i) * 0.25).collect();
        closes.push(last_close);
        closes
    }

    fn strategy() -> TrendPullbackStrategy {
        let aggregator =
            SentimentAggregator::new(Arc::new(StaticNewsSource::new()), SentimentConfig::default())
                .with_clock(Arc::new(FixedClock(sample_timestamp())));
        TrendPullbackStrategy::new(
            TrendPullbackConfig::default(),
            FusionConfig::default(),
            Arc::new(aggregator),
        )
    }

    // ============================================
    // Signal Tests
    // ============================================

    #[test]
    fn pullback_within_band_buys() {
        // recent high = 104.5, close 3% below
        let close = 104.5 * 0.97;
        let result = strategy().generate_signal("MSFT", &candles_from_closes(&uptrend_then(close)));

        assert_eq!(result.signal_type, SignalType::Buy);
        assert_eq!(result.extra["recent_high"], 104.5);
        assert_eq!(result.extra["drop_from_high"], 0.03);
    }

    #[test]
    fn shallow_pullback_holds() {
        let close = 104.5 * 0.99;
        let result = strategy().generate_signal("MSFT", &candles_from_closes(&uptrend_then(close)));

        assert_eq!(result.signal_type, SignalType::Hold);
        assert!((result.confidence - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn deep_pullback_holds() {
        let close = 104.5 * 0.90;
        let result = strategy().generate_signal("MSFT", &candles_from_closes(&uptrend_then(close)));

        assert_eq!(result.signal_type, SignalType::Hold);
    }

    #[test]
    fn below_moving_average_holds() {
        let mut closes: Vec<f64> = (0..219).map(|i| 200.0 - f64::from(i) * 0.5).collect();
        let recent_high = closes[closes.len() - 19..]
            .iter()
            .copied()
            .fold(f64::MIN, f64::max);
        closes.push(recent_high * 0.97);

        let result = strategy().generate_signal("MSFT", &candles_from_closes(&closes));
        assert_eq!(result.signal_type, SignalType::Hold);
    }

    #[test]
    fn needs_ma_period_plus_window() {
        let closes = uptrend_then(101.0);
        let result = strategy().generate_signal("MSFT", &candles_from_closes(&closes[1..]));

        assert_eq!(result.reason(), Some(NOT_ENOUGH_CANDLES));
        assert_eq!(strategy().min_history(), 220);
    }
}
