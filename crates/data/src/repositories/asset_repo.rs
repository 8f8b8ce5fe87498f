use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{DataError, DataResult};

/// Resolves ticker symbols to asset ids.
#[derive(Debug, Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn find_id(&self, symbol: &str) -> DataResult<Option<Uuid>> {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM assets WHERE symbol = $1 LIMIT 1")
            .bind(symbol)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(id,)| id))
    }

    /// Like [`find_id`](Self::find_id), but a missing asset is an error.
    ///
    /// # Errors
    /// Returns [`DataError::AssetNotFound`] when no row matches.
    pub async fn resolve(&self, symbol: &str) -> DataResult<Uuid> {
        self.find_id(symbol)
            .await?
            .ok_or_else(|| DataError::AssetNotFound(symbol.to_string()))
    }
}
