//! Error types for the campaign registry

use campaign_core::CampaignId;
use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Registry errors
#[derive(Error, Debug)]
pub enum Error {
    /// Campaign operation error
    #[error("Campaign error: {0}")]
    Campaign(#[from] campaign_core::Error),

    /// Unknown campaign identifier
    #[error("Campaign not found: {0}")]
    CampaignNotFound(CampaignId),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Manifest (de)serialization error
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
