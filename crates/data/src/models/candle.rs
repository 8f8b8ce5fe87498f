//! Candle row model.

use chrono::{DateTime, Utc};
use newsblend_core::Candle;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the `candles` table.
///
/// Prices stay `Decimal` until they cross into the scoring core.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CandleRecord {
    pub time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl CandleRecord {
    /// Converts to the floating-point candle consumed by the indicators.
    #[must_use]
    pub fn to_candle(&self) -> Candle {
        Candle {
            time: self.time,
            open: to_f64(self.open),
            high: to_f64(self.high),
            low: to_f64(self.low),
            close: to_f64(self.close),
            volume: to_f64(self.volume),
        }
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
