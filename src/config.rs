//! Engine configuration: calibration thresholds for fusion and blending.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | ATTUNE_PRIMARY_THRESHOLD | 70 | Confidence above which one modality wins outright. |
//! | ATTUNE_BLEND_THRESHOLD | 20 | Minimum intensity for a secondary state in a blend. |
//! | ATTUNE_TREND_DELTA | 5.0 | HRV change (ms) against the recent mean that counts as a trend. |
//!
//! The crisis threshold is a crate constant and cannot be configured.

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AttuneError;
use crate::{DEFAULT_BLEND_THRESHOLD, DEFAULT_PRIMARY_THRESHOLD, DEFAULT_TREND_DELTA, MAX_SCORE};

fn default_primary_threshold() -> u8 {
    DEFAULT_PRIMARY_THRESHOLD
}

fn default_blend_threshold() -> u8 {
    DEFAULT_BLEND_THRESHOLD
}

fn default_trend_delta() -> f64 {
    DEFAULT_TREND_DELTA
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Confidence strictly above which biometric, then text, dominates
    #[serde(default = "default_primary_threshold")]
    pub primary_threshold: u8,
    /// Secondary states below this intensity are dropped from blends
    #[serde(default = "default_blend_threshold")]
    pub blend_threshold: u8,
    /// HRV delta for improving/declining
    #[serde(default = "default_trend_delta")]
    pub trend_delta: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            primary_threshold: DEFAULT_PRIMARY_THRESHOLD,
            blend_threshold: DEFAULT_BLEND_THRESHOLD,
            trend_delta: DEFAULT_TREND_DELTA,
        }
    }
}

impl EngineConfig {
    /// Defaults, then the optional TOML file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, AttuneError> {
        let base = match path {
            Some(p) => Self::load_from_path(p)?,
            None => Self::default(),
        };
        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. Missing keys fall back to defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, AttuneError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| AttuneError::ConfigIo {
            path: display.clone(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| AttuneError::ConfigParse {
            path: display,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply ATTUNE_* variables. Unset values keep the current value; unparseable
    /// ones do too, with a warning.
    pub fn with_env_overrides(self) -> Self {
        Self {
            primary_threshold: env_or("ATTUNE_PRIMARY_THRESHOLD", self.primary_threshold),
            blend_threshold: env_or("ATTUNE_BLEND_THRESHOLD", self.blend_threshold),
            trend_delta: env_or("ATTUNE_TREND_DELTA", self.trend_delta),
        }
    }

    pub fn validate(&self) -> Result<(), AttuneError> {
        if self.primary_threshold > MAX_SCORE {
            return Err(AttuneError::ConfigRange {
                field: "primary_threshold",
                value: self.primary_threshold.to_string(),
            });
        }
        if self.blend_threshold > MAX_SCORE {
            return Err(AttuneError::ConfigRange {
                field: "blend_threshold",
                value: self.blend_threshold.to_string(),
            });
        }
        if !self.trend_delta.is_finite() || self.trend_delta < 0.0 {
            return Err(AttuneError::ConfigRange {
                field: "trend_delta",
                value: self.trend_delta.to_string(),
            });
        }
        Ok(())
    }
}

/// Parse an env override. Malformed values are logged and ignored.
fn env_or<T>(name: &str, current: T) -> T
where
    T: FromStr + Display + Copy,
{
    let Ok(raw) = std::env::var(name) else {
        return current;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(var = name, value = %raw, keeping = %current, "malformed config override ignored");
            current
        }
    }
}
