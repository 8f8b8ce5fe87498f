//! Database repositories for the signal engine.
//!
//! Each repository wraps one table and shares the same connection pool.

pub mod asset_repo;
pub mod candle_repo;
pub mod news_repo;
pub mod signal_repo;
pub mod strategy_repo;

pub use asset_repo::AssetRepository;
pub use candle_repo::CandleRepository;
pub use news_repo::NewsRepository;
pub use signal_repo::SignalRepository;
pub use strategy_repo::StrategyCatalogRepository;

use sqlx::PgPool;

/// Creates all repositories from a single database pool.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub candles: CandleRepository,
    pub news: NewsRepository,
    pub assets: AssetRepository,
    pub strategies: StrategyCatalogRepository,
    pub signals: SignalRepository,
}

impl Repositories {
    /// Creates a new set of repositories from a database pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            candles: CandleRepository::new(pool.clone()),
            news: NewsRepository::new(pool.clone()),
            assets: AssetRepository::new(pool.clone()),
            strategies: StrategyCatalogRepository::new(pool.clone()),
            signals: SignalRepository::new(pool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use chrono::{Duration, Utc};
    use sqlx::postgres::PgPoolOptions;

    // ============================================
    // Helper Functions
    // ============================================

    /// Pool pointed at a port nothing listens on; every query fails.
    fn unreachable_pool() -> PgPool {
        PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(2))
            .connect_lazy("postgresql://newsblend@127.0.0.1:1/newsblend")
            .unwrap()
    }

    // ============================================
    // Failure Propagation Tests
    // ============================================

    #[tokio::test]
    async fn unreachable_database_is_not_a_missing_asset() {
        let repos = Repositories::new(unreachable_pool());
        let err = repos.assets.resolve("AAPL").await.unwrap_err();

        assert!(!err.is_not_found());
        assert!(matches!(err, DataError::Database(_)));
    }

    #[tokio::test]
    async fn unreachable_database_fails_news_snapshot() {
        let repos = Repositories::new(unreachable_pool());
        let now = Utc::now();

        let snapshot = repos
            .news
            .load_snapshot("AAPL", now - Duration::hours(24), now)
            .await;
        assert!(snapshot.is_err());
    }

    // Round-trip tests need a live database:
    //
    // #[tokio::test]
    // async fn insert_and_load_snapshot() {
    //     let db = DatabaseClient::connect(&DatabaseConfig::default()).await.unwrap();
    //     db.migrate().await.unwrap();
    //     let repos = db.repositories();
    //     ...
    // }
}
