//! Adaptive-Signal Detector: weighted lexicon matches per category
//!
//! matchCount = 1 per keyword found + 0.5 per body phrase found.
//! intensity  = round(min(100, matchCount / |keywords| * 100)).
//! Matching ignores case and apostrophe style.
//! Output is sorted by intensity, strongest first, stable over lexicon order.

use crate::{BODY_PHRASE_MATCH_WEIGHT, KEYWORD_MATCH_WEIGHT, MAX_SCORE};
use crate::core::lexicon::{contains_phrase, match_form, Lexicon};
use crate::types::{DetectedSignal, PatternCategory};

/// Detector over the static Pattern Lexicon
#[derive(Debug, Clone, Copy)]
pub struct SignalDetector {
    lexicon: &'static Lexicon,
}

impl Default for SignalDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalDetector {
    /// Create detector over the global lexicon
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::global(),
        }
    }

    /// Scan text and return every category with at least one hit
    pub fn detect(&self, text: &str) -> Vec<DetectedSignal> {
        let lowered = match_form(text);
        if lowered.trim().is_empty() {
            return Vec::new();
        }

        let mut signals: Vec<DetectedSignal> = self
            .lexicon
            .categories()
            .iter()
            .filter_map(|category| score_category(category, &lowered))
            .collect();

        // sort_by is stable, so equal intensities keep lexicon order
        signals.sort_by(|a, b| b.intensity.cmp(&a.intensity));
        signals
    }
}

/// Score one category against text already in match form
fn score_category(category: &PatternCategory, lowered: &str) -> Option<DetectedSignal> {
    let keyword_hits = category
        .keywords
        .iter()
        .filter(|k| contains_phrase(lowered, k))
        .count();

    let body_signals: Vec<String> = category
        .body_phrases
        .iter()
        .filter(|p| contains_phrase(lowered, p))
        .map(|p| p.to_string())
        .collect();

    let match_count =
        keyword_hits as f64 * KEYWORD_MATCH_WEIGHT + body_signals.len() as f64 * BODY_PHRASE_MATCH_WEIGHT;
    if match_count <= 0.0 {
        return None;
    }

    let ratio = match_count / category.keywords.len() as f64 * 100.0;
    let intensity = ratio.min(MAX_SCORE as f64).round() as u8;

    Some(DetectedSignal {
        category: category.name.to_string(),
        intensity,
        body_signals,
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let detector = SignalDetector::new();
        assert!(detector.detect("").is_empty());
        assert!(detector.detect("   ").is_empty());
    }

    #[test]
    fn test_no_matches() {
        let detector = SignalDetector::new();
        let signals = detector.detect("The quarterly report lists rainfall totals for Tuesday.");
        assert!(signals.is_empty(), "unexpected signals: {:?}", signals);
    }

    #[test]
    fn test_single_keyword_intensity() {
        let detector = SignalDetector::new();
        // FLIGHT has 10 keywords: one hit → 10
        let signals = detector.detect("I am so anxious");
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].category, "FLIGHT");
        assert_eq!(signals[0].intensity, 10);
        assert!(signals[0].body_signals.is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let detector = SignalDetector::new();
        let lower = detector.detect("i feel numb");
        let upper = detector.detect("I FEEL NUMB");
        assert_eq!(lower, upper);
        assert_eq!(lower[0].category, "DISSOCIATION");
    }

    #[test]
    fn test_body_phrase_counts_half() {
        let detector = SignalDetector::new();
        // FLIGHT: 1 keyword + 1 body phrase = 1.5 / 10 → 15
        let signals = detector.detect("anxious, racing heart");
        assert_eq!(signals[0].category, "FLIGHT");
        assert_eq!(signals[0].intensity, 15);
        assert_eq!(signals[0].body_signals, vec!["racing heart".to_string()]);
    }

    #[test]
    fn test_body_phrase_alone_emits_signal() {
        let detector = SignalDetector::new();
        // DISSOCIATION: 0.5 / 10 → 5
        let signals = detector.detect("there is a tingling in my hands");
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].category, "DISSOCIATION");
        assert_eq!(signals[0].intensity, 5);
    }

    #[test]
    fn test_intensity_capped_at_100() {
        let detector = SignalDetector::new();
        let text = "furious so angry enraged pissed off want to scream lash out snapped at \
                    fed up can't stand ready to fight clenched jaw hot face";
        let signals = detector.detect(text);
        let fight = signals.iter().find(|s| s.category == "FIGHT").unwrap();
        assert_eq!(fight.intensity, 100);
    }

    #[test]
    fn test_sorted_descending() {
        let detector = SignalDetector::new();
        let signals = detector.detect("I'm anxious and worried and nervous, and I feel numb");
        assert!(signals.len() >= 2);
        for pair in signals.windows(2) {
            assert!(pair[0].intensity >= pair[1].intensity);
        }
        assert_eq!(signals[0].category, "FLIGHT");
    }

    #[test]
    fn test_ties_keep_lexicon_order() {
        let detector = SignalDetector::new();
        // FIGHT and FLIGHT both 10 keywords, one hit each → tie at 10
        let signals = detector.detect("I'm furious and anxious");
        assert_eq!(signals[0].intensity, signals[1].intensity);
        assert_eq!(signals[0].category, "FIGHT");
        assert_eq!(signals[1].category, "FLIGHT");
    }

    #[test]
    fn test_curly_and_missing_apostrophes_match() {
        let detector = SignalDetector::new();
        let straight = detector.detect("I can't cope with this");
        assert_eq!(straight[0].category, "OVERWHELM");
        assert_eq!(detector.detect("I can’t cope with this"), straight);
        assert_eq!(detector.detect("I cant cope with this"), straight);
    }

    #[test]
    fn test_perfectly_fine_is_not_perfectionism() {
        let detector = SignalDetector::new();
        assert!(detector.detect("Honestly it went perfectly fine").is_empty());
        let signals = detector.detect("Everything has to be perfect or I panic");
        assert!(signals.iter().any(|s| s.category == "PERFECTIONISM"));
    }

    #[test]
    fn test_determinism() {
        let detector = SignalDetector::new();
        let text = "I feel so ashamed and stuck, there's a pit in my stomach";
        assert_eq!(detector.detect(text), detector.detect(text));
    }
}
