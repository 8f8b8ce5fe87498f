//! News items and the source trait the sentiment aggregator reads from.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Impact assumed for an article that carries no usable impact score.
pub const DEFAULT_IMPACT: f64 = 0.5;

/// A scored news article about one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Timestamp when the article was published
    pub published_at: DateTime<Utc>,
    /// Sentiment from -1.0 (bearish) to 1.0 (bullish)
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    /// Expected market impact from 0.0 to 1.0
    #[serde(default)]
    pub impact_score: Option<f64>,
}

impl NewsItem {
    #[must_use]
    pub fn new(published_at: DateTime<Utc>, sentiment: f64, impact: f64) -> Self {
        Self {
            published_at,
            sentiment_score: Some(sentiment),
            impact_score: Some(impact),
        }
    }

    /// Sentiment coerced into [-1.0, 1.0]; missing or non-finite reads as 0.0.
    #[must_use]
    pub fn sentiment(&self) -> f64 {
        match self.sentiment_score {
            Some(s) if s.is_finite() => s.clamp(-1.0, 1.0),
            _ => 0.0,
        }
    }

    /// Impact coerced into (0.0, 1.0]; missing, zero, negative or
    /// non-finite reads as 0.5.
    #[must_use]
    pub fn impact(&self) -> f64 {
        match self.impact_score {
            Some(i) if i.is_finite() && i > 0.0 => i.min(1.0),
            _ => DEFAULT_IMPACT,
        }
    }
}

/// Read access to recent news for a symbol.
///
/// Implementations return articles published at or after `since`, newest
/// first. Retries are the caller's concern.
pub trait NewsSource: Send + Sync {
    /// # Errors
    /// Returns an error if the underlying store cannot be read.
    fn fetch_recent_news(&self, symbol: &str, since: DateTime<Utc>) -> Result<Vec<NewsItem>>;
}

/// In-memory news keyed by symbol.
///
/// Used as the per-pass snapshot during orchestration and as a fixture in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticNewsSource {
    items: HashMap<String, Vec<NewsItem>>,
}

impl StaticNewsSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to attach articles to a symbol.
    #[must_use]
    pub fn with_items(mut self, symbol: impl Into<String>, items: Vec<NewsItem>) -> Self {
        self.insert(symbol, items);
        self
    }

    /// Appends articles for a symbol.
    pub fn insert(&mut self, symbol: impl Into<String>, items: Vec<NewsItem>) {
        self.items.entry(symbol.into()).or_default().extend(items);
    }

    /// Number of symbols with at least one article.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.items.len()
    }
}

impl NewsSource for StaticNewsSource {
    fn fetch_recent_news(&self, symbol: &str, since: DateTime<Utc>) -> Result<Vec<NewsItem>> {
        let mut items: Vec<NewsItem> = self
            .items
            .get(symbol)
            .map(|all| {
                all.iter()
                    .filter(|item| item.published_at >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(items)
    }
}
