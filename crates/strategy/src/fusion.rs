//! Blends a boolean technical trigger with a news sentiment snapshot.
//!
//! ```text
//! tech_score  = tech_buy ? 1 : 0
//! news_score  = max(0, avg_sentiment)
//! tech_weight = tech_weight * (tech_buy ? 1 : tech_miss_factor)
//! news_weight = news_weight * max(news_confidence_floor, news_confidence)
//! normalized  = Σ weight·score / Σ weight
//! ```
//!
//! BUY requires both the technical trigger and `normalized >= buy_threshold`.

use newsblend_core::{round_to, FusionConfig, SignalType, StrategyResult};
use newsblend_signals::SentimentSnapshot;

/// Outcome of one fusion step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fusion {
    pub signal_type: SignalType,
    /// Rounded to 3 places
    pub confidence: f64,
    /// Unrounded blended score in [0, 1]
    pub normalized_score: f64,
}

impl Fusion {
    /// Renders the fusion as a strategy result carrying `normalized_score`
    /// and the nested news result. Callers append their own diagnostics.
    #[must_use]
    pub fn into_result(self, news: &SentimentSnapshot) -> StrategyResult {
        StrategyResult::new(self.signal_type, self.confidence)
            .with_extra("normalized_score", round_to(self.normalized_score, 3))
            .with_extra("news", news.to_result())
    }
}

/// Combines the technical trigger with the news snapshot.
///
/// The snapshot is consumed as reported: rounded sentiment and confidence.
#[must_use]
pub fn fuse(tech_buy: bool, news: &SentimentSnapshot, config: &FusionConfig) -> Fusion {
    let tech_score = if tech_buy { 1.0 } else { 0.0 };
    let news_score = news.reported_sentiment().max(0.0);

    let tech_weight = config.tech_weight * if tech_buy { 1.0 } else { config.tech_miss_factor };
    let news_weight = config.news_weight * news.confidence.max(config.news_confidence_floor);

    let total = tech_weight + news_weight;
    let normalized_score = if total > 0.0 {
        (tech_weight * tech_score + news_weight * news_score) / total
    } else {
        0.0
    };

    let signal_type = if tech_buy && normalized_score >= config.buy_threshold {
        SignalType::Buy
    } else {
        SignalType::Hold
    };

    let confidence = match signal_type {
        SignalType::Buy => normalized_score,
        SignalType::Hold => config.hold_confidence,
    };

    Fusion {
        signal_type,
        confidence: round_to(confidence, 3),
        normalized_score,
    }
}
