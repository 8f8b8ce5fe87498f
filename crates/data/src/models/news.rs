//! News article row model.

use chrono::{DateTime, Utc};
use newsblend_core::NewsItem;
use serde::{Deserialize, Serialize};

/// Scored article from the `news_articles` table.
///
/// Scores are nullable; coercion into valid ranges happens in [`NewsItem`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NewsArticleRecord {
    pub symbol: String,
    pub published_at: DateTime<Utc>,
    /// Sentiment from -1.0 (bearish) to 1.0 (bullish)
    pub sentiment_score: Option<f64>,
    /// Market impact from 0.0 to 1.0
    pub impact_score: Option<f64>,
}

impl From<NewsArticleRecord> for NewsItem {
    fn from(record: NewsArticleRecord) -> Self {
        Self {
            published_at: record.published_at,
            sentiment_score: record.sentiment_score,
            impact_score: record.impact_score,
        }
    }
}
