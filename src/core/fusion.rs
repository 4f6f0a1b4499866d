//! State Fusion Engine
//!
//! Two steps:
//! 1. Blend detected text signals into one text state + confidence.
//! 2. Arbitrate that against the biometric state. First matching rule wins:
//!    biometric > threshold → biometric_primary
//!    text > threshold      → text_primary
//!    same state            → consensus (mean confidence)
//!    biometric more sure   → biometric_override
//!    otherwise             → text_override
//!    A zero-confidence biometric result skips all of that → text_only.

use crate::config::EngineConfig;
use crate::core::lexicon::Lexicon;
use crate::types::{
    strongest_state, BiometricState, BlendedState, DetectedSignal, FusedState, FusionMethod,
    NervousState, TextBlend,
};
use crate::{DEFAULT_BLEND_THRESHOLD, DEFAULT_PRIMARY_THRESHOLD, MAX_SCORE};

#[derive(Debug, Clone, Copy)]
pub struct FusionEngine {
    primary_threshold: u8,
    blend_threshold: u8,
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FusionEngine {
    pub fn new() -> Self {
        Self {
            primary_threshold: DEFAULT_PRIMARY_THRESHOLD,
            blend_threshold: DEFAULT_BLEND_THRESHOLD,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            primary_threshold: config.primary_threshold,
            blend_threshold: config.blend_threshold,
        }
    }

    /// Sum signal intensities per state affinity, cap each at 100, pick the
    /// strongest. Unknown category names are skipped.
    pub fn blend_text(&self, signals: &[DetectedSignal]) -> TextBlend {
        let lexicon = Lexicon::global();
        let mut sums = [0u32; 3];
        for signal in signals {
            if let Some(category) = lexicon.get(&signal.category) {
                sums[category.state.index()] += signal.intensity as u32;
            }
        }

        let capped = sums.map(|s| s.min(MAX_SCORE as u32) as u8);
        if capped.iter().all(|&s| s == 0) {
            return TextBlend::empty();
        }

        let (state, confidence) = strongest_state(&capped);
        TextBlend {
            state,
            confidence,
            intensities: NervousState::ALL
                .iter()
                .map(|s| BlendedState {
                    state: *s,
                    intensity: capped[s.index()],
                })
                .collect(),
        }
    }

    /// Arbitrate a biometric result against a single text classification
    pub fn fuse(
        &self,
        biometric: &BiometricState,
        text_state: NervousState,
        text_confidence: u8,
    ) -> FusedState {
        let blend = TextBlend {
            state: text_state,
            confidence: text_confidence,
            intensities: vec![BlendedState {
                state: text_state,
                intensity: text_confidence,
            }],
        };
        self.fuse_blend(biometric, &blend)
    }

    /// Arbitrate a biometric result against a full text blend; secondary
    /// text states feed `blended_states`
    pub fn fuse_blend(&self, biometric: &BiometricState, text: &TextBlend) -> FusedState {
        let (state, confidence, method) = self.arbitrate(biometric, text.state, text.confidence);

        FusedState {
            state,
            confidence,
            blended_states: self.secondary_states(state, biometric, text),
            method,
        }
    }

    fn arbitrate(
        &self,
        biometric: &BiometricState,
        text_state: NervousState,
        text_confidence: u8,
    ) -> (NervousState, f64, FusionMethod) {
        let bio_conf = biometric.confidence;

        if biometric.is_no_data() {
            return (text_state, text_confidence as f64, FusionMethod::TextOnly);
        }
        if bio_conf > self.primary_threshold {
            return (biometric.state, bio_conf as f64, FusionMethod::BiometricPrimary);
        }
        if text_confidence > self.primary_threshold {
            return (text_state, text_confidence as f64, FusionMethod::TextPrimary);
        }
        if biometric.state == text_state {
            let mean = (bio_conf as f64 + text_confidence as f64) / 2.0;
            return (biometric.state, mean, FusionMethod::Consensus);
        }
        if bio_conf > text_confidence {
            (biometric.state, bio_conf as f64, FusionMethod::BiometricOverride)
        } else {
            (text_state, text_confidence as f64, FusionMethod::TextOverride)
        }
    }

    /// Every contributor other than the winner, strongest first
    fn secondary_states(
        &self,
        winner: NervousState,
        biometric: &BiometricState,
        text: &TextBlend,
    ) -> Vec<BlendedState> {
        let mut best = [0u8; 3];
        for entry in &text.intensities {
            let slot = &mut best[entry.state.index()];
            *slot = (*slot).max(entry.intensity);
        }
        if !biometric.is_no_data() {
            let slot = &mut best[biometric.state.index()];
            *slot = (*slot).max(biometric.confidence);
        }

        let mut secondary: Vec<BlendedState> = NervousState::ALL
            .iter()
            .filter(|s| **s != winner)
            .map(|s| BlendedState {
                state: *s,
                intensity: best[s.index()],
            })
            .filter(|b| b.intensity > 0 && b.intensity >= self.blend_threshold)
            .collect();
        secondary.sort_by(|a, b| b.intensity.cmp(&a.intensity));
        secondary
    }
}

// =============================================================================
// TESTS
// =============================================================================
