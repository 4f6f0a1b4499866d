//! Crisis detection result

use serde::{Deserialize, Serialize};
use crate::CRISIS_THRESHOLD;

/// Kind of safety-critical language found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisType {
    Suicidal,
    SelfHarm,
    HarmOthers,
    ImmediateDanger,
}

impl CrisisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suicidal => "suicidal",
            Self::SelfHarm => "self_harm",
            Self::HarmOthers => "harm_others",
            Self::ImmediateDanger => "immediate_danger",
        }
    }
}

/// Output of the crisis detector. `is_crisis` is true iff
/// `confidence >= CRISIS_THRESHOLD`, and once true nothing downstream
/// may clear it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisResult {
    pub is_crisis: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_type: Option<CrisisType>,
    /// 0..100
    pub confidence: u8,
    pub trigger_phrases: Vec<String>,
}

impl CrisisResult {
    /// Nothing matched
    pub fn none() -> Self {
        Self {
            is_crisis: false,
            crisis_type: None,
            confidence: 0,
            trigger_phrases: Vec::new(),
        }
    }

    /// Build from the strongest match; derives `is_crisis` from confidence
    pub fn matched(crisis_type: CrisisType, confidence: u8, trigger_phrases: Vec<String>) -> Self {
        Self {
            is_crisis: confidence >= CRISIS_THRESHOLD,
            crisis_type: Some(crisis_type),
            confidence,
            trigger_phrases,
        }
    }
}
