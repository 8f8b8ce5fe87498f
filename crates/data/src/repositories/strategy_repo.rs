use newsblend_core::Timeframe;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{DataError, DataResult};

/// Catalog of strategies known to the database, keyed by slug.
///
/// A strategy's slug is its code.
#[derive(Debug, Clone)]
pub struct StrategyCatalogRepository {
    pool: PgPool,
}

impl StrategyCatalogRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn find_id(&self, slug: &str) -> DataResult<Option<Uuid>> {
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM strategies WHERE slug = $1 LIMIT 1")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id,)| id))
    }

    /// # Errors
    /// Returns [`DataError::StrategyNotFound`] when no row matches.
    pub async fn resolve(&self, slug: &str) -> DataResult<Uuid> {
        self.find_id(slug)
            .await?
            .ok_or_else(|| DataError::StrategyNotFound(slug.to_string()))
    }

    /// Inserts or renames a catalog entry and returns its id.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn upsert(&self, slug: &str, name: &str, timeframe: Timeframe) -> DataResult<Uuid> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO strategies (slug, name, timeframe)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO UPDATE
            SET name = EXCLUDED.name,
                timeframe = EXCLUDED.timeframe
            RETURNING id
            "#,
        )
        .bind(slug)
        .bind(name)
        .bind(timeframe.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
