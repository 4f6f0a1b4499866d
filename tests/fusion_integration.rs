//! Integration tests for biometric scoring + state fusion
//!
//! Covers the arbitration table end to end with real readings and real text.

use std::sync::Arc;

use attune::core::{BiometricScorer, Engine, EvaluationRequest, FusionEngine, StaticProvider};
use attune::types::{BiometricReading, BiometricState, FusionMethod, NervousState, Trend};
use attune::EngineConfig;
use pretty_assertions::assert_eq;

fn activated_reading() -> BiometricReading {
    BiometricReading::new()
        .with_heart_rate(110.0)
        .with_hrv(20.0)
        .with_respiration_rate(24.0)
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_activated_reading_overrides_calm_text() {
    let biometric = BiometricScorer::new().score(&activated_reading(), &[]);
    assert_eq!(biometric.state, NervousState::Activated);
    assert_eq!(biometric.confidence, 85);

    let fused = FusionEngine::new().fuse(&biometric, NervousState::Calm, 40);
    assert_eq!(fused.method, FusionMethod::BiometricPrimary);
    assert_eq!(fused.state, NervousState::Activated);
}

#[test]
fn test_empty_reading_falls_back_to_text_only() {
    let biometric = BiometricScorer::new().score(&BiometricReading::new(), &[]);
    assert_eq!(biometric.state, NervousState::Calm);
    assert_eq!(biometric.confidence, 0);
    assert_eq!(biometric.indicators, vec!["no data".to_string()]);
    assert_eq!(biometric.trend, Trend::Stable);

    let fused = FusionEngine::new().fuse(&biometric, NervousState::Shutdown, 25);
    assert_eq!(fused.method, FusionMethod::TextOnly);
    assert_eq!(fused.state, NervousState::Shutdown);
}

#[test]
fn test_engine_reading_beats_text() {
    let reading = activated_reading();
    let evaluation = Engine::default().evaluate(
        EvaluationRequest::new("I feel calm, peaceful and relaxed").with_biometric(&reading, &[]),
    );
    assert_eq!(evaluation.biometric.confidence, 85);
    assert_eq!(evaluation.fused.method, FusionMethod::BiometricPrimary);
    assert_eq!(evaluation.fused.state, NervousState::Activated);
    // the calm text survives as a secondary contributor (3 of 10 keywords)
    assert_eq!(evaluation.fused.blended_states.len(), 1);
    assert_eq!(evaluation.fused.blended_states[0].state, NervousState::Calm);
    assert_eq!(evaluation.fused.blended_states[0].intensity, 30);
}

#[test]
fn test_engine_consensus() {
    // hr 95 (+30 activated) + hrv 45 (+10 activated) → activated 40
    let reading = BiometricReading::new().with_heart_rate(95.0).with_hrv(45.0);
    let evaluation = Engine::default().evaluate(
        EvaluationRequest::new("so anxious, so worried, so nervous").with_biometric(&reading, &[]),
    );
    assert_eq!(evaluation.biometric.confidence, 40);
    assert_eq!(evaluation.fused.method, FusionMethod::Consensus);
    assert_eq!(evaluation.fused.state, NervousState::Activated);
    assert_eq!(evaluation.fused.confidence, (40.0 + 30.0) / 2.0);
}

#[test]
fn test_engine_biometric_override() {
    // hr 50 (+25 shutdown) + resp 8 (+20 shutdown) → shutdown 45
    let reading = BiometricReading::new().with_heart_rate(50.0).with_respiration_rate(8.0);
    let evaluation = Engine::default().evaluate(
        EvaluationRequest::new("honestly I'm just anxious").with_biometric(&reading, &[]),
    );
    assert_eq!(evaluation.fused.method, FusionMethod::BiometricOverride);
    assert_eq!(evaluation.fused.state, NervousState::Shutdown);
    assert!(evaluation
        .fused
        .blended_states
        .iter()
        .all(|b| b.state != NervousState::Shutdown));
}

#[test]
fn test_engine_text_override() {
    // resp 14 (+15 calm) → calm 15
    let reading = BiometricReading::new().with_respiration_rate(14.0);
    let evaluation = Engine::default().evaluate(
        EvaluationRequest::new("I'm ashamed and humiliated, I want to hide").with_biometric(&reading, &[]),
    );
    assert_eq!(evaluation.fused.method, FusionMethod::TextOverride);
    assert_eq!(evaluation.fused.state, NervousState::Shutdown);
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[test]
fn test_strong_biometric_always_primary() {
    let engine = FusionEngine::new();
    let biometric = BiometricState {
        state: NervousState::Shutdown,
        confidence: 95,
        indicators: vec![],
        trend: Trend::Stable,
    };
    for text_state in NervousState::ALL {
        for text_confidence in 0..=100u8 {
            let fused = engine.fuse(&biometric, text_state, text_confidence);
            assert_eq!(fused.method, FusionMethod::BiometricPrimary);
            assert_eq!(fused.state, NervousState::Shutdown);
        }
    }
}

#[test]
fn test_consensus_confidence_exact() {
    let engine = FusionEngine::new();
    for b in (1..=70u8).step_by(7) {
        for t in (0..=70u8).step_by(5) {
            let biometric = BiometricState {
                state: NervousState::Activated,
                confidence: b,
                indicators: vec![],
                trend: Trend::Stable,
            };
            let fused = engine.fuse(&biometric, NervousState::Activated, t);
            assert_eq!(fused.method, FusionMethod::Consensus);
            assert_eq!(fused.confidence, (b as f64 + t as f64) / 2.0);
        }
    }
}

#[test]
fn test_fused_never_lists_itself() {
    let engine = Engine::default();
    let reading = BiometricReading::new().with_heart_rate(50.0);
    let texts = [
        "I'm furious and anxious and I feel numb",
        "calm but stuck and drained",
        "",
        "I'm overwhelmed, ashamed, and empty inside",
    ];
    for text in texts {
        for with_reading in [false, true] {
            let mut request = EvaluationRequest::new(text);
            if with_reading {
                request = request.with_biometric(&reading, &[]);
            }
            let evaluation = engine.evaluate(request);
            assert!(
                evaluation.fused.blended_states.iter().all(|b| b.state != evaluation.fused.state),
                "{}",
                text
            );
        }
    }
}

// =============================================================================
// TREND + PROVIDER
// =============================================================================

#[test]
fn test_trend_through_provider() {
    let history = vec![
        BiometricReading::new().with_hrv(30.0),
        BiometricReading::new().with_hrv(32.0),
        BiometricReading::new().with_hrv(34.0),
    ];
    let current = BiometricReading::new().with_hrv(45.0).with_heart_rate(72.0);
    let provider = Arc::new(StaticProvider::new(current, history));
    let engine = Engine::with_provider(EngineConfig::default(), provider);

    let evaluation = engine.evaluate_for_user("user-1", "checking in", &[], None);
    assert_eq!(evaluation.biometric.trend, Trend::Improving);
}

#[test]
fn test_configured_threshold_changes_arbitration() {
    let config = EngineConfig {
        primary_threshold: 90,
        ..Default::default()
    };
    let reading = activated_reading();
    let evaluation = Engine::new(config).evaluate(
        EvaluationRequest::new("I feel calm").with_biometric(&reading, &[]),
    );
    // 85 no longer clears the bar; disagreement → more confident side
    assert_eq!(evaluation.fused.method, FusionMethod::BiometricOverride);
}
