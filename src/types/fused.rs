//! Fused (text + biometric) classification

use serde::{Deserialize, Serialize};
use crate::types::{BlendedState, NervousState};

/// Which arbitration rule produced the fused state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionMethod {
    /// Biometric confidence above the primary threshold
    BiometricPrimary,
    /// Text confidence above the primary threshold
    TextPrimary,
    /// Both weak, both agree
    Consensus,
    /// Both weak, disagree, biometric more confident
    BiometricOverride,
    /// Both weak, disagree, text at least as confident
    TextOverride,
    /// No biometric signal
    TextOnly,
}

impl FusionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BiometricPrimary => "biometric_primary",
            Self::TextPrimary => "text_primary",
            Self::Consensus => "consensus",
            Self::BiometricOverride => "biometric_override",
            Self::TextOverride => "text_override",
            Self::TextOnly => "text_only",
        }
    }
}

impl std::fmt::Display for FusionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of arbitration between modalities.
///
/// `blended_states` holds only secondary contributors and never `state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedState {
    pub state: NervousState,
    /// 0..100
    pub confidence: f64,
    pub blended_states: Vec<BlendedState>,
    pub method: FusionMethod,
}
