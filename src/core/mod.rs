//! Core modules for Attune

pub mod lexicon;
pub mod signal_detector;
pub mod crisis_detector;
pub mod biometric_scorer;
pub mod fusion;
pub mod mode_router;
pub mod composer;
pub mod provider;
pub mod engine;
pub mod api;

pub use lexicon::Lexicon;
pub use signal_detector::SignalDetector;
pub use crisis_detector::CrisisDetector;
pub use biometric_scorer::BiometricScorer;
pub use fusion::FusionEngine;
pub use mode_router::ModeRouter;
pub use composer::{InstructionComposer, CRISIS_INSTRUCTION};
pub use provider::{BiometricProvider, NoBiometrics, StaticProvider};
pub use engine::{Engine, EvaluationRequest};
pub use api::{create_router, run_server};
