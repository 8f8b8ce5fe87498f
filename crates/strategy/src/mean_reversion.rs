use std::sync::Arc;

use newsblend_core::{
    closes, round_to, Candle, FusionConfig, MeanReversionConfig, Strategy, StrategyResult,
    Timeframe,
};
use newsblend_signals::{rsi, SentimentAggregator};

use crate::fusion::fuse;
use crate::NOT_ENOUGH_CANDLES;

/// News + RSI mean reversion.
///
/// Technical trigger: RSI of the closes below the oversold level.
pub struct MeanReversionStrategy {
    config: MeanReversionConfig,
    fusion: FusionConfig,
    sentiment: Arc<SentimentAggregator>,
}

impl MeanReversionStrategy {
    pub const CODE: &'static str = "NEWS_RSI_COMBO";
    pub const NAME: &'static str = "News + RSI Mean Reversion";

    #[must_use]
    pub fn new(
        config: MeanReversionConfig,
        fusion: FusionConfig,
        sentiment: Arc<SentimentAggregator>,
    ) -> Self {
        Self {
            config,
            fusion,
            sentiment,
        }
    }

    /// Candles needed before the strategy will query news.
    #[must_use]
    pub fn min_history(&self) -> usize {
        self.config.rsi_period + 1
    }
}

impl Strategy for MeanReversionStrategy {
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
        if candles.len() < self.min_history() {
            return StrategyResult::insufficient(NOT_ENOUGH_CANDLES);
        }

        let rsi = rsi(&closes(candles), self.config.rsi_period);
        let tech_buy = rsi < self.config.oversold;

        let news = self.sentiment.evaluate_now(symbol);
        let fusion = fuse(tech_buy, &news, &self.fusion);

        tracing::debug!(
            symbol = %symbol,
            strategy = Self::CODE,
            rsi,
            tech_buy,
            normalized = fusion.normalized_score,
            "Evaluated mean reversion"
        );

        fusion.into_result(&news).with_extra("rsi", round_to(rsi, 2))
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

    fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        let start = sample_timestamp() - Duration::days(closes.len() as i64);
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::flat(start + Duration::days(i as i64), c))
            .collect()
    }

    fn strategy_with_news(items: Vec<NewsItem>) -> MeanReversionStrategy {
        let source = StaticNewsSource::new().with_items("AAPL", items);
        let aggregator = SentimentAggregator::new(Arc::new(source), SentimentConfig::default())
            .with_clock(Arc::new(FixedClock(sample_timestamp())));
        MeanReversionStrategy::new(
            MeanReversionConfig::default(),
            FusionConfig::default(),
            Arc::new(aggregator),
        )
    }

    fn bullish_news() -> Vec<NewsItem> {
        vec![
            NewsItem::new(sample_timestamp() - Duration::hours(1), 0.5, 0.5),
            NewsItem::new(sample_timestamp() - Duration::hours(2), 0.5, 0.5),
        ]
    }

    // ============================================
    // Signal Tests
    // ============================================

    #[test]
    fn short_history_holds() {
        let strategy = strategy_with_news(bullish_news());
        let candles = candles_from_closes(&[100.0; 14]);

        let result = strategy.generate_signal("AAPL", &candles);
        assert_eq!(result.signal_type, SignalType::Hold);
        assert!((result.confidence - 0.1).abs() < f64::EPSILON);
        assert_eq!(result.reason(), Some(NOT_ENOUGH_CANDLES));
    }

    #[test]
    fn oversold_with_bullish_news_buys() {
        let strategy = strategy_with_news(bullish_news());
        let closes: Vec<f64> = (0..15).map(|i| 100.0 - f64::from(i)).collect();

        let result = strategy.generate_signal("AAPL", &candles_from_closes(&closes));
        assert_eq!(result.signal_type, SignalType::Buy);
        assert!((result.confidence - 0.912).abs() < 1e-12);
        assert_eq!(result.extra["rsi"], 0.0);
        assert_eq!(result.extra["news"]["extra"]["avg_sentiment"], 0.5);
    }

    #[test]
    fn rising_market_holds_even_with_news() {
        let strategy = strategy_with_news(bullish_news());
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();

        let result = strategy.generate_signal("AAPL", &candles_from_closes(&closes));
        assert_eq!(result.signal_type, SignalType::Hold);
        assert!((result.confidence - 0.2).abs() < f64::EPSILON);
        assert_eq!(result.extra["rsi"], 100.0);
    }

    #[test]
    fn metadata_follows_config() {
        let strategy = strategy_with_news(vec![]);

        assert_eq!(strategy.code(), "NEWS_RSI_COMBO");
        assert_eq!(strategy.name(), "News + RSI Mean Reversion");
        assert_eq!(strategy.timeframe(), Timeframe::Day1);
        assert_eq!(strategy.min_history(), 15);
    }
}
