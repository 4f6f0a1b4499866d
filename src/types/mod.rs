//! Core types for Attune

mod state;
mod signals;
mod biometric;
mod fused;
mod crisis;
mod mode;
mod turn;
mod output;

pub use state::{NervousState, strongest_state};
pub use signals::{CategoryClass, PatternCategory, DetectedSignal, BlendedState, TextBlend};
pub use biometric::{BiometricReading, BiometricState, Trend};
pub use fused::{FusedState, FusionMethod};
pub use crisis::{CrisisResult, CrisisType};
pub use mode::{ResponseMode, Routing, CommunicationStyle};
pub use turn::{HistoryTurn, Role};
pub use output::Evaluation;
