//! Evaluation output handed back to the caller

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{BiometricState, CrisisResult, DetectedSignal, FusedState, NervousState};

/// Everything `Engine::evaluate` produces for one inbound message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub timestamp: DateTime<Utc>,
    pub crisis: CrisisResult,
    pub fused: FusedState,
    /// therapeutic | real_talk | decode | crisis
    pub mode: String,
    /// Instruction block for the text-generation call
    pub instruction: String,
    /// Detector output, strongest first
    pub signals: Vec<DetectedSignal>,
    pub biometric: BiometricState,
}

impl Evaluation {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        if self.crisis.is_crisis {
            return format!(
                "\x1b[31m🚨 CRISIS | type={} | confidence={}{}",
                self.crisis_type_str(),
                self.crisis.confidence,
                NervousState::color_reset()
            );
        }
        let color = self.fused.state.color_code();
        let reset = NervousState::color_reset();
        let emoji = self.fused.state.emoji();

        format!(
            "{}{} state={} ({:.0}%) | method={} | mode={} | signals={}{}",
            color,
            emoji,
            self.fused.state,
            self.fused.confidence,
            self.fused.method,
            self.mode,
            self.signals.len(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "crisis={} | type={} | state={} | confidence={:.1} | method={} | mode={}",
            self.crisis.is_crisis,
            self.crisis_type_str(),
            self.fused.state,
            self.fused.confidence,
            self.fused.method,
            self.mode
        )
    }

    fn crisis_type_str(&self) -> &'static str {
        self.crisis
            .crisis_type
            .map(|t| t.as_str())
            .unwrap_or("none")
    }
}
