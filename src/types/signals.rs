//! Pattern lexicon records and detector output

use serde::{Deserialize, Serialize};
use crate::types::NervousState;

/// Family a pattern category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryClass {
    SurvivalResponse,
    AttachmentWound,
    ShameCore,
    ActivationState,
}

/// One named adaptive-signal pattern. Immutable, lives in the static lexicon.
#[derive(Debug, Clone, Serialize)]
pub struct PatternCategory {
    /// Unique internal label, never shown to the end user
    pub name: &'static str,
    pub class: CategoryClass,
    /// State this pattern pulls the text blend toward
    pub state: NervousState,
    /// Trigger phrases, lower-case
    pub keywords: &'static [&'static str],
    /// Body-sensation phrases, lower-case
    pub body_phrases: &'static [&'static str],
}

/// A lexicon category that matched one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedSignal {
    /// Category name
    pub category: String,
    /// 0..100
    pub intensity: u8,
    /// Body phrases found in the text, in lexicon order
    pub body_signals: Vec<String>,
}

/// One state's weight inside a blend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendedState {
    pub state: NervousState,
    /// 0..100
    pub intensity: u8,
}

/// Text-only classification derived from detected signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlend {
    pub state: NervousState,
    /// 0..100, zero when nothing matched
    pub confidence: u8,
    /// Capped intensity for every state, in declaration order
    pub intensities: Vec<BlendedState>,
}

impl TextBlend {
    /// Blend for text with no detected signals
    pub fn empty() -> Self {
        Self {
            state: NervousState::Calm,
            confidence: 0,
            intensities: NervousState::ALL
                .iter()
                .map(|s| BlendedState { state: *s, intensity: 0 })
                .collect(),
        }
    }
}
