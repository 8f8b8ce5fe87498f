//! Signal repository.
//!
//! Append-only store for generated signals.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::SignalRecord;

/// Repository for signal writes.
#[derive(Debug, Clone)]
pub struct SignalRepository {
    pool: PgPool,
}

impl SignalRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a single signal and returns its id.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: &SignalRecord) -> Result<Uuid> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO signals
                (asset_id, strategy_id, signal_type, price, timeframe, generated_at, meta)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(record.asset_id)
        .bind(record.strategy_id)
        .bind(&record.signal_type)
        .bind(record.price)
        .bind(&record.timeframe)
        .bind(record.generated_at)
        .bind(&record.meta)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert signal")?;

        Ok(id)
    }
}
