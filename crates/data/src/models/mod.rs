//! Row models for the signal engine's tables.
//!
//! Prices use `rust_decimal::Decimal`; scores are plain floats.
//! Models derive `sqlx::FromRow` for database compatibility.

pub mod candle;
pub mod news;
pub mod signal;

pub use candle::CandleRecord;
pub use news::NewsArticleRecord;
pub use signal::SignalRecord;
