//! News article repository.
//!
//! Reads scored articles and turns them into an in-memory snapshot the
//! synchronous sentiment aggregator can query.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use newsblend_core::{NewsItem, StaticNewsSource};
use sqlx::PgPool;

use crate::models::NewsArticleRecord;

/// Repository for news article operations.
#[derive(Debug, Clone)]
pub struct NewsRepository {
    pool: PgPool,
}

impl NewsRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Articles for `symbol` published at or after `since`, newest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn fetch_recent_news(
        &self,
        symbol: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<NewsArticleRecord>> {
        let records = sqlx::query_as::<_, NewsArticleRecord>(
            r#"
            SELECT symbol, published_at, sentiment_score, impact_score
            FROM news_articles
            WHERE symbol = $1 AND published_at >= $2
            ORDER BY published_at DESC
            "#,
        )
        .bind(symbol)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to fetch news for {symbol}"))?;

        Ok(records)
    }

    /// Loads the news window `[since, until]` for `symbol` into a snapshot.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn load_snapshot(
        &self,
        symbol: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<StaticNewsSource> {
        let items: Vec<NewsItem> = self
            .fetch_recent_news(symbol, since)
            .await?
            .into_iter()
            .filter(|record| record.published_at <= until)
            .map(NewsItem::from)
            .collect();

        tracing::debug!(symbol = %symbol, articles = items.len(), "Loaded news snapshot");

        Ok(StaticNewsSource::new().with_items(symbol, items))
    }

    /// Inserts one scored article.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: &NewsArticleRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO news_articles (symbol, published_at, sentiment_score, impact_score)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&record.symbol)
        .bind(record.published_at)
        .bind(record.sentiment_score)
        .bind(record.impact_score)
        .execute(&self.pool)
        .await
        .context("Failed to insert news article")?;

        Ok(())
    }
}
