//! OHLCV candle type consumed by the indicator library.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar for a single timeframe bucket.
///
/// Candle windows handed to strategies are ordered by `time`, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket open time
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Creates a candle where every price field equals `close`.
    #[must_use]
    pub fn flat(time: DateTime<Utc>, close: f64) -> Self {
        Self {
            time,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }
}

/// Extracts the close series from a candle window.
#[must_use]
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
