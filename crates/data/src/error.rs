use thiserror::Error;

/// Lookup and storage failures surfaced by the repositories.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no asset found for symbol '{0}'")]
    AssetNotFound(String),

    #[error("no strategy found for slug '{0}'")]
    StrategyNotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DataError {
    /// True for lookups that miss, as opposed to infrastructure failures.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AssetNotFound(_) | Self::StrategyNotFound(_))
    }
}

pub type DataResult<T> = Result<T, DataError>;
