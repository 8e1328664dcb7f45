use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// A test result reached summarization without a weight
    #[error("Missing weight! Test: {0}")]
    MissingWeight(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Invalid event: {0}")]
    EventError(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for ReportError {
    fn from(err: anyhow::Error) -> Self {
        ReportError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::ConfigError(err.to_string())
    }
}

/// Result type for rureport crate
pub type Result<T> = std::result::Result<T, ReportError>;
