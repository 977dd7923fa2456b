//! Crate-wide error types.

use thiserror::Error;

pub type StatsResult<T> = Result<T, StatsError>;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("sample error: {0}")]
    Sample(String),

    #[error("no colorizer configured: timers cannot be created without a color source")]
    MissingColorizer,
}
