//! CSV loaders for offline evaluation.
//!
//! Candle files: `time,open,high,low,close,volume`.
//! News files: `symbol,published_at,sentiment_score,impact_score`, where
//! either score may be left empty.
//! Timestamps are RFC 3339.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::Reader;
use newsblend_core::{Candle, NewsItem, StaticNewsSource};
use serde::Deserialize;

pub struct CsvStorage;

#[derive(Debug, Deserialize)]
struct NewsRow {
    symbol: String,
    published_at: DateTime<Utc>,
    sentiment_score: Option<f64>,
    impact_score: Option<f64>,
}

impl CsvStorage {
    /// Reads a candle file, sorted oldest first.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or a row fails to parse.
    pub fn read_candles(path: impl AsRef<Path>) -> Result<Vec<Candle>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open candle file: {}", path.display()))?;
        Self::read_candles_from(file)
            .with_context(|| format!("Failed to read candle file: {}", path.display()))
    }

    /// # Errors
    /// Returns error if a row fails to parse.
    pub fn read_candles_from<R: Read>(reader: R) -> Result<Vec<Candle>> {
        let mut candles = Reader::from_reader(reader)
            .deserialize()
            .collect::<Result<Vec<Candle>, _>>()?;
        candles.sort_by_key(|c| c.time);
        Ok(candles)
    }

    /// Reads a news file into an in-memory source keyed by symbol.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or a row fails to parse.
    pub fn read_news(path: impl AsRef<Path>) -> Result<StaticNewsSource> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open news file: {}", path.display()))?;
        Self::read_news_from(file)
            .with_context(|| format!("Failed to read news file: {}", path.display()))
    }

    /// # Errors
    /// Returns error if a row fails to parse.
    pub fn read_news_from<R: Read>(reader: R) -> Result<StaticNewsSource> {
        let mut source = StaticNewsSource::new();
        for row in Reader::from_reader(reader).deserialize() {
            let row: NewsRow = row?;
            let item = NewsItem {
                published_at: row.published_at,
                sentiment_score: row.sentiment_score,
                impact_score: row.impact_score,
            };
            source.insert(row.symbol, vec![item]);
        }
        Ok(source)
    }
}
