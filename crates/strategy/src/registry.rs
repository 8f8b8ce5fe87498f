//! Strategy registry for the combination strategies.
//!
//! Keeps registration order so every pass evaluates strategies in the same
//! sequence.

use std::sync::Arc;

use newsblend_core::{FusionConfig, StrategiesConfig, Strategy, Timeframe};
use newsblend_signals::SentimentAggregator;

use crate::{BreakoutStrategy, MeanReversionStrategy, TrendPullbackStrategy};

/// Ordered collection of strategies addressed by code.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a strategy.
    ///
    /// A strategy with the same code replaces the existing one in place.
    pub fn register(&mut self, strategy: Box<dyn Strategy>) {
        match self.strategies.iter().position(|s| s.code() == strategy.code()) {
            Some(index) => {
                tracing::warn!(strategy = %strategy.code(), "Replacing registered strategy");
                self.strategies[index] = strategy;
            }
            None => self.strategies.push(strategy),
        }
    }

    /// Builder method to register a strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Box<dyn Strategy>) -> Self {
        self.register(strategy);
        self
    }

    /// Returns a strategy by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&dyn Strategy> {
        self.strategies
            .iter()
            .find(|s| s.code() == code)
            .map(|s| &**s)
    }

    /// Returns true if a strategy with the given code is registered.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Iterates strategies in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Strategy> {
        self.strategies.iter().map(|s| &**s)
    }

    /// Strategies that run on `timeframe`, in registration order.
    pub fn for_timeframe(&self, timeframe: Timeframe) -> impl Iterator<Item = &dyn Strategy> {
        self.iter().filter(move |s| s.timeframe() == timeframe)
    }

    /// Returns the codes of all registered strategies.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.code()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// Builds the three combination strategies around one shared aggregator.
///
/// Order: mean reversion, breakout, trend pullback.
#[must_use]
pub fn build_combined_strategies(
    config: &StrategiesConfig,
    fusion: &FusionConfig,
    sentiment: Arc<SentimentAggregator>,
) -> StrategyRegistry {
    StrategyRegistry::new()
        .with_strategy(Box::new(MeanReversionStrategy::new(
            config.mean_reversion.clone(),
            fusion.clone(),
            Arc::clone(&sentiment),
        )))
        .with_strategy(Box::new(BreakoutStrategy::new(
            config.breakout.clone(),
            fusion.clone(),
            Arc::clone(&sentiment),
        )))
        .with_strategy(Box::new(TrendPullbackStrategy::new(
            config.trend_pullback.clone(),
            fusion.clone(),
            sentiment,
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsblend_core::{BreakoutConfig, SentimentConfig, StaticNewsSource};

    fn aggregator() -> Arc<SentimentAggregator> {
        Arc::new(SentimentAggregator::new(
            Arc::new(StaticNewsSource::new()),
            SentimentConfig::default(),
        ))
    }

    #[test]
    fn builds_three_strategies_in_order() {
        let registry =
            build_combined_strategies(&StrategiesConfig::default(), &FusionConfig::default(), aggregator());

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.codes(),
            vec!["NEWS_RSI_COMBO", "NEWS_BREAKOUT_COMBO", "NEWS_TREND_MA200_COMBO"]
        );
    }

    #[test]
    fn strategies_share_one_aggregator() {
        let sentiment = aggregator();
        let _registry = build_combined_strategies(
            &StrategiesConfig::default(),
            &FusionConfig::default(),
            Arc::clone(&sentiment),
        );

        // local handle + three strategies
        assert_eq!(Arc::strong_count(&sentiment), 4);
    }

    #[test]
    fn lookup_by_code() {
        let registry =
            build_combined_strategies(&StrategiesConfig::default(), &FusionConfig::default(), aggregator());

        let breakout = registry.get("NEWS_BREAKOUT_COMBO").unwrap();
        assert_eq!(breakout.name(), "News + Breakout High Momentum (20D)");
        assert!(registry.get("NEWS_SENTIMENT_MOMENTUM").is_none());
        assert!(!registry.contains("SMA_CROSS"));
    }

    #[test]
    fn filters_by_timeframe() {
        let mut config = StrategiesConfig::default();
        config.breakout = BreakoutConfig {
            timeframe: Timeframe::Week1,
            ..BreakoutConfig::default()
        };
        let registry = build_combined_strategies(&config, &FusionConfig::default(), aggregator());

        let daily: Vec<&str> = registry.for_timeframe(Timeframe::Day1).map(|s| s.code()).collect();
        assert_eq!(daily, vec!["NEWS_RSI_COMBO", "NEWS_TREND_MA200_COMBO"]);

        let weekly: Vec<&str> = registry.for_timeframe(Timeframe::Week1).map(|s| s.code()).collect();
        assert_eq!(weekly, vec!["NEWS_BREAKOUT_COMBO"]);
        assert_eq!(registry.for_timeframe(Timeframe::Hour1).count(), 0);
    }

    #[test]
    fn register_replaces_same_code() {
        let sentiment = aggregator();
        let mut registry = StrategyRegistry::new();
        registry.register(Box::new(BreakoutStrategy::new(
            BreakoutConfig::default(),
            FusionConfig::default(),
            Arc::clone(&sentiment),
        )));
        registry.register(Box::new(BreakoutStrategy::new(
            BreakoutConfig {
                timeframe: Timeframe::Hour4,
                ..BreakoutConfig::default()
            },
            FusionConfig::default(),
            sentiment,
        )));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().next().unwrap().timeframe(), Timeframe::Hour4);
    }
}
