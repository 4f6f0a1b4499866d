//! Engine: the orchestrating shell around the pure components
//!
//! Runs crisis detection first, then the text and biometric paths, fusion,
//! routing and composition. This is the only layer that logs or talks to the
//! biometric provider.

use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::core::{
    BiometricProvider, BiometricScorer, CrisisDetector, FusionEngine, InstructionComposer,
    ModeRouter, NoBiometrics, SignalDetector,
};
use crate::error::AttuneError;
use crate::types::{
    BiometricReading, BiometricState, CommunicationStyle, Evaluation, HistoryTurn, Routing,
    ResponseMode,
};

/// Inputs for one inbound message
#[derive(Debug, Clone, Default)]
pub struct EvaluationRequest<'a> {
    pub text: &'a str,
    pub history: &'a [HistoryTurn],
    pub biometric: Option<&'a BiometricReading>,
    /// Earlier readings, oldest first
    pub biometric_history: &'a [BiometricReading],
    pub style: Option<CommunicationStyle>,
}

impl<'a> EvaluationRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            ..Default::default()
        }
    }

    pub fn with_history(mut self, history: &'a [HistoryTurn]) -> Self {
        self.history = history;
        self
    }

    pub fn with_biometric(mut self, reading: &'a BiometricReading, history: &'a [BiometricReading]) -> Self {
        self.biometric = Some(reading);
        self.biometric_history = history;
        self
    }

    pub fn with_style(mut self, style: Option<CommunicationStyle>) -> Self {
        self.style = style;
        self
    }
}

/// Signal-fusion and safety-routing engine. Cheap to clone; safe to share
/// across requests.
#[derive(Clone)]
pub struct Engine {
    config: EngineConfig,
    detector: SignalDetector,
    crisis: CrisisDetector,
    scorer: BiometricScorer,
    fusion: FusionEngine,
    router: ModeRouter,
    composer: InstructionComposer,
    provider: Arc<dyn BiometricProvider>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").field("config", &self.config).finish()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Engine without a wearable provider
    pub fn new(config: EngineConfig) -> Self {
        Self::with_provider(config, Arc::new(NoBiometrics))
    }

    pub fn with_provider(config: EngineConfig, provider: Arc<dyn BiometricProvider>) -> Self {
        Self {
            detector: SignalDetector::new(),
            crisis: CrisisDetector::new(),
            scorer: BiometricScorer::with_trend_delta(config.trend_delta),
            fusion: FusionEngine::from_config(&config),
            router: ModeRouter::new(),
            composer: InstructionComposer::new(),
            provider,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one message with an explicitly supplied reading (if any)
    pub fn evaluate(&self, request: EvaluationRequest<'_>) -> Evaluation {
        // Crisis first, every turn, never cached
        let crisis = self.crisis.detect(request.text);

        let signals = self.detector.detect(request.text);
        let biometric = match request.biometric {
            Some(reading) => self.scorer.score(reading, request.biometric_history),
            None => BiometricState::no_data(),
        };

        let text_blend = self.fusion.blend_text(&signals);
        let fused = self.fusion.fuse_blend(&biometric, &text_blend);
        let routing = self.router.route(request.text, &crisis);

        let instruction = match routing {
            Routing::Crisis => {
                warn!(
                    crisis_type = crisis.crisis_type.map(|t| t.as_str()).unwrap_or("unknown"),
                    confidence = crisis.confidence,
                    triggers = crisis.trigger_phrases.len(),
                    "crisis detected, routing to crisis resources"
                );
                // mode is irrelevant on this path; the composer ignores it
                self.composer.compose(
                    ResponseMode::Therapeutic,
                    &fused,
                    &crisis,
                    request.history,
                    request.text,
                    request.style,
                )
            }
            Routing::Mode(mode) => {
                debug!(
                    mode = mode.as_str(),
                    state = fused.state.as_str(),
                    method = fused.method.as_str(),
                    confidence = fused.confidence,
                    signals = signals.len(),
                    "message evaluated"
                );
                self.composer.compose(
                    mode,
                    &fused,
                    &crisis,
                    request.history,
                    request.text,
                    request.style,
                )
            }
        };

        Evaluation {
            timestamp: Utc::now(),
            mode: routing.as_str().to_string(),
            crisis,
            fused,
            instruction,
            signals,
            biometric,
        }
    }

    /// Evaluate using the injected provider for `user_id`. Provider errors
    /// degrade to "no reading".
    pub fn evaluate_for_user(
        &self,
        user_id: &str,
        text: &str,
        history: &[HistoryTurn],
        style: Option<CommunicationStyle>,
    ) -> Evaluation {
        let (reading, readings_history) = match self.fetch(user_id) {
            Ok(found) => found,
            Err(e) => {
                warn!(user_id, error = %e, "biometric provider failed, continuing without reading");
                (None, Vec::new())
            }
        };

        let mut request = EvaluationRequest::new(text)
            .with_history(history)
            .with_style(style);
        if let Some(reading) = reading.as_ref() {
            request = request.with_biometric(reading, &readings_history);
        }
        self.evaluate(request)
    }

    fn fetch(&self, user_id: &str) -> Result<(Option<BiometricReading>, Vec<BiometricReading>), AttuneError> {
        let reading = self.provider.fetch_reading(user_id)?;
        let history = match reading {
            Some(_) => self.provider.fetch_history(user_id)?,
            None => Vec::new(),
        };
        Ok((reading, history))
    }
}

// =============================================================================
// TESTS
// =============================================================================
