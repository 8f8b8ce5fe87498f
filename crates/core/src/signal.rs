//! Signal result types shared by every strategy.
//!
//! A strategy only ever says `BUY` or `HOLD`. There is deliberately no sell
//! variant, so a sell signal cannot be constructed, serialized, or persisted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Categorical decision of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
}

impl SignalType {
    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
        }
    }

    /// Maps an arbitrary label onto the two allowed signals.
    ///
    /// Only an exact `"BUY"` stays a buy; everything else, `"SELL"` included,
    /// becomes `HOLD`.
    #[must_use]
    pub fn normalize(label: &str) -> Self {
        if label == "BUY" {
            Self::Buy
        } else {
            Self::Hold
        }
    }

    #[must_use]
    pub const fn is_buy(self) -> bool {
        matches!(self, Self::Buy)
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one `generate_signal` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub signal_type: SignalType,
    /// Confidence in [0.0, 1.0]
    pub confidence: f64,
    /// Rounded diagnostics and reason codes
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl StrategyResult {
    /// Creates a result, clamping confidence into [0.0, 1.0].
    ///
    /// A non-finite confidence collapses to 0.0.
    #[must_use]
    pub fn new(signal_type: SignalType, confidence: f64) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            signal_type,
            confidence,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn hold(confidence: f64) -> Self {
        Self::new(SignalType::Hold, confidence)
    }

    /// Degraded HOLD used whenever input data is too thin to decide.
    #[must_use]
    pub fn insufficient(reason: &str) -> Self {
        Self::hold(0.1).with_extra("reason", reason)
    }

    /// Adds one diagnostic entry.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Returns the `reason` code, if the result carries one.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.extra.get("reason").and_then(Value::as_str)
    }

    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.signal_type.is_buy()
    }
}

/// Nests a result inside another result's diagnostics.
impl From<StrategyResult> for Value {
    fn from(result: StrategyResult) -> Self {
        let mut map = Map::new();
        map.insert("signal_type".into(), Value::from(result.signal_type.as_str()));
        map.insert("confidence".into(), Value::from(result.confidence));
        map.insert("extra".into(), Value::Object(result.extra));
        Value::Object(map)
    }
}

/// Rounds half away from zero to `decimals` places.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_never_yields_anything_but_buy_or_hold() {
        assert_eq!(SignalType::normalize("BUY"), SignalType::Buy);
        assert_eq!(SignalType::normalize("HOLD"), SignalType::Hold);
        assert_eq!(SignalType::normalize("SELL"), SignalType::Hold);
        assert_eq!(SignalType::normalize("buy"), SignalType::Hold);
        assert_eq!(SignalType::normalize(""), SignalType::Hold);
    }

    #[test]
    fn serializes_uppercase_labels() {
        assert_eq!(serde_json::to_string(&SignalType::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&SignalType::Hold).unwrap(), "\"HOLD\"");
        assert!(serde_json::from_str::<SignalType>("\"SELL\"").is_err());
    }

    #[test]
    fn new_clamps_confidence() {
        assert!((StrategyResult::new(SignalType::Buy, 1.7).confidence - 1.0).abs() < f64::EPSILON);
        assert!(StrategyResult::new(SignalType::Buy, -0.3).confidence.abs() < f64::EPSILON);
        assert!(StrategyResult::hold(f64::NAN).confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn insufficient_carries_reason() {
        let result = StrategyResult::insufficient("not_enough_candles");

        assert_eq!(result.signal_type, SignalType::Hold);
        assert!((result.confidence - 0.1).abs() < f64::EPSILON);
        assert_eq!(result.reason(), Some("not_enough_candles"));
    }

    #[test]
    fn nested_value_matches_serde_shape() {
        let result = StrategyResult::new(SignalType::Buy, 0.75).with_extra("articles_count", 3);

        let nested = Value::from(result.clone());
        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(nested, serialized);
    }

    #[test]
    fn round_to_places() {
        assert!((round_to(0.123_456, 3) - 0.123).abs() < 1e-12);
        assert!((round_to(27.456, 2) - 27.46).abs() < 1e-12);
        assert!((round_to(-0.1234, 2) - (-0.12)).abs() < 1e-12);
    }
}
