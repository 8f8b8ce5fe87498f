//! Persistence for the news-blended signal engine.
//!
//! This crate provides:
//! - Database client for `PostgreSQL` with bundled migrations
//! - Row models for candles, news articles and signals
//! - Repositories for typed database access
//! - CSV loaders for offline evaluation

pub mod csv_storage;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;

pub use csv_storage::CsvStorage;
pub use database::DatabaseClient;
pub use error::{DataError, DataResult};

pub use models::{CandleRecord, NewsArticleRecord, SignalRecord};

pub use repositories::{
    AssetRepository, CandleRepository, NewsRepository, Repositories, SignalRepository,
    StrategyCatalogRepository,
};
