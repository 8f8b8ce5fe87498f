use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

const BASE_FILE: &str = "config/Config.toml";
const JSON_FILE: &str = "config/Config.json";

/// Layers built-in defaults, TOML files, `APP_`-prefixed environment
/// variables and an optional JSON file into an [`AppConfig`].
///
/// Nested keys in the environment are separated by `__`, e.g.
/// `APP_SENTIMENT__MIN_ARTICLES=3`.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from `config/Config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(BASE_FILE)
    }

    /// Loads configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        Self::extract(&[path.as_ref().to_path_buf()])
    }

    /// Loads `config/Config.toml` with `config/Config.{profile}.toml` on top.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        Self::extract(&[
            PathBuf::from(BASE_FILE),
            PathBuf::from(format!("config/Config.{profile}.toml")),
        ])
    }

    fn extract(files: &[PathBuf]) -> Result<AppConfig> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        for file in files {
            figment = figment.merge(Toml::file(file));
        }

        let config: AppConfig = figment
            .merge(Env::prefixed("APP_").split("__"))
            .join(Json::file(JSON_FILE))
            .extract()?;

        tracing::debug!(
            files = ?files,
            symbols = config.runner.symbols.len(),
            timeframe = %config.runner.timeframe,
            "Loaded configuration"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeframe::Timeframe;
    use figment::Jail;

    #[test]
    fn defaults_without_files() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load().map_err(|e| e.to_string())?;

            assert_eq!(config.runner.candle_limit, 300);
            assert_eq!(config.runner.timeframe, Timeframe::Day1);
            assert_eq!(config.sentiment.lookback_hours, 24);
            assert_eq!(config.sentiment.min_articles, 2);
            assert_eq!(config.strategies.mean_reversion.rsi_period, 14);
            assert_eq!(config.strategies.trend_pullback.ma_period, 200);
            Ok(())
        });
    }

    #[test]
    fn toml_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                r#"
                [runner]
                symbols = ["AAPL", "MSFT"]

                [strategies.breakout]
                lookback = 55
                "#,
            )?;

            let config = ConfigLoader::load().map_err(|e| e.to_string())?;

            assert_eq!(config.runner.symbols, vec!["AAPL", "MSFT"]);
            assert_eq!(config.strategies.breakout.lookback, 55);
            assert_eq!(config.strategies.mean_reversion.rsi_period, 14);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                r#"
                [runner]
                candle_limit = 120
                "#,
            )?;
            jail.set_env("APP_RUNNER__CANDLE_LIMIT", "250");
            jail.set_env("APP_SENTIMENT__MIN_ARTICLES", "3");

            let config = ConfigLoader::load().map_err(|e| e.to_string())?;

            assert_eq!(config.runner.candle_limit, 250);
            assert_eq!(config.sentiment.min_articles, 3);
            Ok(())
        });
    }

    #[test]
    fn profile_file_layers_on_top() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                r#"
                [fusion]
                buy_threshold = 0.4
                "#,
            )?;
            jail.create_file(
                "config/Config.weekly.toml",
                r#"
                [runner]
                timeframe = "1W"
                "#,
            )?;

            let config = ConfigLoader::load_with_profile("weekly").map_err(|e| e.to_string())?;

            assert_eq!(config.runner.timeframe, Timeframe::Week1);
            assert!((config.fusion.buy_threshold - 0.4).abs() < f64::EPSILON);
            Ok(())
        });
    }
}
