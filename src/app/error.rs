use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Timed out after {secs}s waiting for {what}")]
    Timeout { what: String, secs: u64 },

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<chromiumoxide::error::CdpError> for HarvestError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        HarvestError::Browser(err.to_string())
    }
}

impl HarvestError {
    pub fn timeout(what: impl Into<String>, limit: std::time::Duration) -> Self {
        HarvestError::Timeout {
            what: what.into(),
            secs: limit.as_secs(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
