//! Signal inputs for the combination strategies.
//!
//! - [`indicators`]: pure price-series functions (RSI, SMA, rolling high)
//! - [`sentiment`]: recency- and impact-weighted news sentiment

pub mod indicators;
pub mod sentiment;

pub use indicators::{drop_from_high, highest_high, rsi, simple_moving_average};
pub use sentiment::{recency_weight, weighted_sentiment, SentimentAggregator, SentimentSnapshot};
