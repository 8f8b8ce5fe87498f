//! Persisted signal model.

use chrono::{DateTime, Utc};
use newsblend_core::{SignalType, StrategyResult, Timeframe};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// One row of the `signals` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SignalRecord {
    pub asset_id: Uuid,
    pub strategy_id: Uuid,
    /// Always "BUY" or "HOLD"
    pub signal_type: String,
    /// Close of the last candle in the evaluated window
    pub price: Decimal,
    pub timeframe: String,
    /// Time of the last candle in the evaluated window
    pub generated_at: DateTime<Utc>,
    /// Strategy diagnostics
    pub meta: JsonValue,
}

impl SignalRecord {
    /// Builds the record for one strategy result.
    ///
    /// The signal label is normalized again on the way out, so nothing but
    /// BUY or HOLD is ever written.
    #[must_use]
    pub fn from_result(
        asset_id: Uuid,
        strategy_id: Uuid,
        timeframe: Timeframe,
        price: Decimal,
        generated_at: DateTime<Utc>,
        result: &StrategyResult,
    ) -> Self {
        let signal_type = SignalType::normalize(result.signal_type.as_str());
        Self {
            asset_id,
            strategy_id,
            signal_type: signal_type.as_str().to_string(),
            price,
            timeframe: timeframe.as_str().to_string(),
            generated_at,
            meta: JsonValue::Object(result.extra.clone()),
        }
    }
}
