//! Candle repository.
//!
//! Reads the most recent window of candles for a symbol and timeframe.

use anyhow::{Context, Result};
use newsblend_core::Timeframe;
use sqlx::PgPool;

use crate::models::CandleRecord;

/// Repository for candle reads.
#[derive(Debug, Clone)]
pub struct CandleRepository {
    pool: PgPool,
}

impl CandleRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches up to `limit` of the newest candles, returned oldest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: i64,
    ) -> Result<Vec<CandleRecord>> {
        let mut records = sqlx::query_as::<_, CandleRecord>(
            r#"
            SELECT time, open, high, low, close, volume
            FROM candles
            WHERE symbol = $1 AND timeframe = $2
            ORDER BY time DESC
            LIMIT $3
            "#,
        )
        .bind(symbol)
        .bind(timeframe.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to fetch {timeframe} candles for {symbol}"))?;

        records.reverse();
        Ok(records)
    }
}
