//! Errors raised by the shell around the pure core.
//!
//! Detectors, scorer, fusion, router and composer never fail; these cover
//! config loading, provider access and CLI input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttuneError {
    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("config value {field} out of range: {value}")]
    ConfigRange { field: &'static str, value: String },

    #[error("biometric provider failed for user {user_id}: {reason}")]
    Provider { user_id: String, reason: String },

    #[error("failed to read biometric reading: {0}")]
    ReadingIo(#[from] std::io::Error),

    #[error("invalid biometric reading: {0}")]
    ReadingParse(#[from] serde_json::Error),
}
