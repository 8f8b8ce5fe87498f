//! CLI commands for the signal engine.

pub mod evaluate;
pub mod run;
pub mod strategies;

pub use evaluate::{run_evaluate, EvaluateArgs};
pub use run::{run_signals, RunArgs};
pub use strategies::{run_strategies, StrategiesArgs};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use newsblend_core::{AppConfig, ConfigLoader};

/// Loads configuration from `path`, or from the named profile when given.
pub(crate) fn load_config(path: &str, profile: Option<&str>) -> Result<AppConfig> {
    let config = match profile {
        Some(profile) => ConfigLoader::load_with_profile(profile)?,
        None => ConfigLoader::load_from(path)?,
    };
    Ok(config)
}

/// Parses an RFC 3339 `--as-of` value into UTC.
pub(crate) fn parse_as_of(raw: &str) -> Result<DateTime<Utc>> {
    let as_of = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid --as-of timestamp: {raw}"))?
        .with_timezone(&Utc);
    Ok(as_of)
}
