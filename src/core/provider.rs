//! Biometric provider seam
//!
//! The wearable integration lives outside the crate. The engine only sees this
//! trait, so the pure core never performs a fetch.

use std::path::Path;
use serde::Deserialize;

use crate::error::AttuneError;
use crate::types::BiometricReading;

/// Source of wearable readings for a user
pub trait BiometricProvider: Send + Sync {
    /// Latest reading, or `None` when the user has no device data
    fn fetch_reading(&self, user_id: &str) -> Result<Option<BiometricReading>, AttuneError>;

    /// Earlier readings, oldest first. Used for the HRV trend.
    fn fetch_history(&self, _user_id: &str) -> Result<Vec<BiometricReading>, AttuneError> {
        Ok(Vec::new())
    }
}

/// Provider for users without a connected wearable
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBiometrics;

impl BiometricProvider for NoBiometrics {
    fn fetch_reading(&self, _user_id: &str) -> Result<Option<BiometricReading>, AttuneError> {
        Ok(None)
    }
}

/// Provider serving one fixed reading and history to every user
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    reading: Option<BiometricReading>,
    history: Vec<BiometricReading>,
}

/// File shape accepted by `StaticProvider::from_json_file`: either a bare
/// reading or `{ "reading": ..., "history": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum ReadingFile {
    WithHistory {
        reading: BiometricReading,
        #[serde(default)]
        history: Vec<BiometricReading>,
    },
    Single(BiometricReading),
}

impl StaticProvider {
    pub fn new(reading: BiometricReading, history: Vec<BiometricReading>) -> Self {
        Self {
            reading: Some(reading),
            history,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, AttuneError> {
        let parsed: ReadingFile = serde_json::from_str(raw)?;
        Ok(match parsed {
            ReadingFile::WithHistory { reading, history } => Self::new(reading, history),
            ReadingFile::Single(reading) => Self::new(reading, Vec::new()),
        })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AttuneError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

impl BiometricProvider for StaticProvider {
    fn fetch_reading(&self, _user_id: &str) -> Result<Option<BiometricReading>, AttuneError> {
        Ok(self.reading.clone())
    }

    fn fetch_history(&self, _user_id: &str) -> Result<Vec<BiometricReading>, AttuneError> {
        Ok(self.history.clone())
    }
}
