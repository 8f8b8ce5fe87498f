use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle bucket size a strategy runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[default]
    #[serde(rename = "1D")]
    Day1,
    #[serde(rename = "1W")]
    Week1,
}

impl Timeframe {
    /// Returns the label stored alongside candles and signals.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute1 => "1m",
            Self::Minute5 => "5m",
            Self::Minute15 => "15m",
            Self::Hour1 => "1h",
            Self::Hour4 => "4h",
            Self::Day1 => "1D",
            Self::Week1 => "1W",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Self::Minute1),
            "5m" => Ok(Self::Minute5),
            "15m" => Ok(Self::Minute15),
            "1h" | "1H" => Ok(Self::Hour1),
            "4h" | "4H" => Ok(Self::Hour4),
            "1d" | "1D" => Ok(Self::Day1),
            "1w" | "1W" => Ok(Self::Week1),
            other => anyhow::bail!("unknown timeframe '{other}'"),
        }
    }
}
