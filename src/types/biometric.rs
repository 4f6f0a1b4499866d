//! Physiological readings and their classification

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::NervousState;

/// One wearable sample. Every field except the timestamp is optional;
/// a missing field contributes nothing to scoring. Field names also
/// accept their camelCase spelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiometricReading {
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Beats per minute
    #[serde(default, alias = "heartRate", skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Heart-rate variability, RMSSD in ms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hrv: Option<f64>,
    /// Breaths per minute
    #[serde(default, alias = "respirationRate", skip_serializing_if = "Option::is_none")]
    pub respiration_rate: Option<f64>,
    /// Degrees Celsius
    #[serde(default, alias = "skinTemperature", skip_serializing_if = "Option::is_none")]
    pub skin_temperature: Option<f64>,
    /// Percent
    #[serde(default, alias = "oxygenSaturation", skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<f64>,
    /// Vendor stress score, 0..100
    #[serde(default, alias = "stressLevel", skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<f64>,
}

impl BiometricReading {
    /// Empty reading stamped now
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            ..Default::default()
        }
    }

    pub fn with_heart_rate(mut self, bpm: f64) -> Self {
        self.heart_rate = Some(bpm);
        self
    }

    pub fn with_hrv(mut self, ms: f64) -> Self {
        self.hrv = Some(ms);
        self
    }

    pub fn with_respiration_rate(mut self, per_min: f64) -> Self {
        self.respiration_rate = Some(per_min);
        self
    }

    pub fn with_skin_temperature(mut self, celsius: f64) -> Self {
        self.skin_temperature = Some(celsius);
        self
    }
}

/// Direction of HRV relative to recent readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

/// Scorer output for one reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricState {
    pub state: NervousState,
    /// 0..100; zero means "no signal" and is ignored by fusion
    pub confidence: u8,
    pub indicators: Vec<String>,
    pub trend: Trend,
}

impl BiometricState {
    /// Indicator carried by the no-signal result
    pub const NO_DATA: &'static str = "no data";

    /// The "no signal" sentinel
    pub fn no_data() -> Self {
        Self {
            state: NervousState::Calm,
            confidence: 0,
            indicators: vec![Self::NO_DATA.to_string()],
            trend: Trend::Stable,
        }
    }

    /// Is this the no-signal sentinel?
    pub fn is_no_data(&self) -> bool {
        self.confidence == 0
    }
}
