//! Attune: signal fusion and safety routing for a conversational companion
//!
//! Pipeline: text (+ optional biometric reading) → crisis detector,
//! adaptive-signal detector, biometric scorer → state fusion → mode router
//! → instruction composer. Everything under `core` except `engine`,
//! `provider` and `api` is a pure function of its inputs.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::AttuneError;

// =============================================================================
// SIGNAL DETECTION [C]
// =============================================================================

/// Weight of a keyword hit in a pattern category
pub const KEYWORD_MATCH_WEIGHT: f64 = 1.0;

/// Weight of a body-phrase hit in a pattern category
pub const BODY_PHRASE_MATCH_WEIGHT: f64 = 0.5;

/// Maximum intensity / confidence on the 0..100 scale
pub const MAX_SCORE: u8 = 100;

// =============================================================================
// CRISIS DETECTION [C] - safety-reviewed, not configurable
// =============================================================================

/// Confidence at or above which a message is a crisis
pub const CRISIS_THRESHOLD: u8 = 80;

/// Confidence for an immediate-danger phrase
pub const CRISIS_CONFIDENCE_IMMEDIATE: u8 = 100;

/// Confidence for suicidal, self-harm and harm-to-others phrases
pub const CRISIS_CONFIDENCE_DEFAULT: u8 = 90;

// =============================================================================
// BIOMETRIC SCORING [C] - hand-tuned, pending calibration
// =============================================================================

/// Heart rate (bpm) above which the reading counts as activated
pub const HR_ACTIVATED_ABOVE: f64 = 90.0;
/// Heart rate (bpm) below which the reading counts as shutdown
pub const HR_SHUTDOWN_BELOW: f64 = 55.0;
pub const HR_ACTIVATED_POINTS: u32 = 30;
pub const HR_SHUTDOWN_POINTS: u32 = 25;
pub const HR_CALM_POINTS: u32 = 20;

/// HRV (ms) below which the reading counts as activated
pub const HRV_LOW_BELOW: f64 = 30.0;
/// HRV (ms) above which the reading counts as calm
pub const HRV_HIGH_ABOVE: f64 = 60.0;
pub const HRV_LOW_POINTS: u32 = 35;
pub const HRV_HIGH_POINTS: u32 = 30;
/// Mid-range HRV still leans activated
pub const HRV_MID_POINTS: u32 = 10;

/// Respiration (breaths/min) above which the reading counts as activated
pub const RESP_ACTIVATED_ABOVE: f64 = 20.0;
/// Respiration (breaths/min) below which the reading counts as shutdown
pub const RESP_SHUTDOWN_BELOW: f64 = 10.0;
pub const RESP_ACTIVATED_POINTS: u32 = 20;
pub const RESP_SHUTDOWN_POINTS: u32 = 20;
pub const RESP_CALM_POINTS: u32 = 15;

/// Skin temperature (°C) below which the reading counts as activated.
/// Only the activated bucket is scored for this field.
pub const SKIN_TEMP_COLD_BELOW: f64 = 32.0;
pub const SKIN_TEMP_COLD_POINTS: u32 = 15;

/// Readings needed for a trend (current + 3 prior)
pub const TREND_MIN_READINGS: usize = 4;

/// Prior readings averaged for the trend baseline
pub const TREND_WINDOW: usize = 3;

// =============================================================================
// FUSION [C] - defaults for EngineConfig
// =============================================================================

/// Confidence above which one modality dominates outright
pub const DEFAULT_PRIMARY_THRESHOLD: u8 = 70;

/// Minimum intensity for a secondary state to be kept in a blend
pub const DEFAULT_BLEND_THRESHOLD: u8 = 20;

/// HRV change (ms) against the baseline that counts as a trend
pub const DEFAULT_TREND_DELTA: f64 = 5.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.4.0";
