//! Crisis Detector: safety lexicon scan, always run first
//!
//! Independent of every other component. Immediate-danger phrases score 100,
//! all other crisis types 90. The strongest type wins; the first type scanned
//! wins a tie.

use crate::{CRISIS_CONFIDENCE_DEFAULT, CRISIS_CONFIDENCE_IMMEDIATE};
use crate::core::lexicon::{contains_phrase, match_form, CRISIS_PHRASES};
use crate::types::{CrisisResult, CrisisType};

#[derive(Debug, Default, Clone, Copy)]
pub struct CrisisDetector;

impl CrisisDetector {
    pub fn new() -> Self {
        Self
    }

    /// Scan text for crisis language
    pub fn detect(&self, text: &str) -> CrisisResult {
        let lowered = match_form(text);
        if lowered.trim().is_empty() {
            return CrisisResult::none();
        }

        let mut trigger_phrases = Vec::new();
        let mut best: Option<(CrisisType, u8)> = None;

        for (crisis_type, phrases) in CRISIS_PHRASES {
            let before = trigger_phrases.len();
            trigger_phrases.extend(
                phrases
                    .iter()
                    .filter(|p| contains_phrase(&lowered, p))
                    .map(|p| p.to_string()),
            );
            if trigger_phrases.len() == before {
                continue;
            }

            let confidence = type_confidence(*crisis_type);
            match best {
                Some((_, current)) if current >= confidence => {}
                _ => best = Some((*crisis_type, confidence)),
            }
        }

        match best {
            Some((crisis_type, confidence)) => {
                CrisisResult::matched(crisis_type, confidence, trigger_phrases)
            }
            None => CrisisResult::none(),
        }
    }
}

fn type_confidence(crisis_type: CrisisType) -> u8 {
    match crisis_type {
        CrisisType::ImmediateDanger => CRISIS_CONFIDENCE_IMMEDIATE,
        CrisisType::Suicidal | CrisisType::SelfHarm | CrisisType::HarmOthers => {
            CRISIS_CONFIDENCE_DEFAULT
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
