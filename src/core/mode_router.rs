//! Mode Router: picks therapeutic / real_talk / decode
//!
//! Order:
//! 1. Crisis → `Routing::Crisis`, nothing else is looked at.
//! 2. Explicit switch phrases ("real talk", "decode this").
//! 3. Indicator keywords. Any therapeutic hit wins; real_talk only when it
//!    is the sole match. No match at all → therapeutic.

use lazy_static::lazy_static;
use regex::Regex;
use crate::core::lexicon::normalize_text;
use crate::types::{CrisisResult, ResponseMode, Routing};

lazy_static! {
    // =========================================================================
    // Explicit switch requests
    // =========================================================================
    static ref RE_SWITCH_REAL_TALK: Regex = Regex::new(
        r"(?i)\b(real talk|keep it real|be real with me|be straight with me|be blunt|be direct|no fluff|cut the crap|talk (to me )?normal(ly)?|casual mode|just be honest)\b"
    ).unwrap();

    static ref RE_SWITCH_DECODE: Regex = Regex::new(
        r"(?i)\b(decode|decoding|what does this sensation mean|analy[sz]e (this|the|my) (sensation|feeling|pattern)s?|what is my body (telling|saying)|why do i feel this in my|break (it|this) down)\b"
    ).unwrap();

    // =========================================================================
    // Indicators
    // =========================================================================
    static ref RE_THERAPEUTIC: Regex = Regex::new(
        r"(?i)\b(feel|feeling|felt|hurt|hurts|scared|afraid|anxious|sad|lonely|overwhelmed|can'?t cope|panic|grief|grieving|trauma|triggered|cry|crying|heartbroken|ashamed|numb)\b"
    ).unwrap();

    static ref RE_REAL_TALK: Regex = Regex::new(
        r"(?i)\b(lol|lmao|honestly|bro|dude|whatever|tbh|idk|just tell me|quick question|advice|what should i do|gimme)\b"
    ).unwrap();
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ModeRouter;

impl ModeRouter {
    pub fn new() -> Self {
        Self
    }

    /// Route one message. A crisis result short-circuits everything.
    pub fn route(&self, text: &str, crisis: &CrisisResult) -> Routing {
        if crisis.is_crisis {
            return Routing::Crisis;
        }
        Routing::Mode(self.classify(text))
    }

    /// Mode from text alone
    pub fn classify(&self, text: &str) -> ResponseMode {
        let text = normalize_text(text);
        if let Some(mode) = explicit_switch(&text) {
            return mode;
        }

        let therapeutic = RE_THERAPEUTIC.is_match(&text);
        let real_talk = RE_REAL_TALK.is_match(&text);
        match (therapeutic, real_talk) {
            (false, true) => ResponseMode::RealTalk,
            _ => ResponseMode::Therapeutic,
        }
    }
}

/// An unambiguous switch request, if any. Both at once is ambiguous.
fn explicit_switch(text: &str) -> Option<ResponseMode> {
    let real_talk = RE_SWITCH_REAL_TALK.is_match(text);
    let decode = RE_SWITCH_DECODE.is_match(text);
    match (real_talk, decode) {
        (true, false) => Some(ResponseMode::RealTalk),
        (false, true) => Some(ResponseMode::Decode),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CrisisDetector;

    fn route(text: &str) -> Routing {
        let crisis = CrisisDetector::new().detect(text);
        ModeRouter::new().route(text, &crisis)
    }

    #[test]
    fn test_no_keywords_defaults_to_therapeutic() {
        assert_eq!(route("The meeting moved to Thursday."), Routing::Mode(ResponseMode::Therapeutic));
        assert_eq!(route(""), Routing::Mode(ResponseMode::Therapeutic));
    }

    #[test]
    fn test_real_talk_indicator() {
        assert_eq!(route("lol ok quick question about my boss"), Routing::Mode(ResponseMode::RealTalk));
    }

    #[test]
    fn test_therapeutic_wins_simultaneous_match() {
        assert_eq!(
            route("honestly I feel so lonely lately"),
            Routing::Mode(ResponseMode::Therapeutic)
        );
    }

    #[test]
    fn test_explicit_real_talk_switch() {
        assert_eq!(
            route("can we do real talk, I feel like you're too soft"),
            Routing::Mode(ResponseMode::RealTalk)
        );
    }

    #[test]
    fn test_explicit_decode_switch() {
        assert_eq!(
            route("decode this tightness in my chest"),
            Routing::Mode(ResponseMode::Decode)
        );
        assert_eq!(
            route("What is my body telling me right now?"),
            Routing::Mode(ResponseMode::Decode)
        );
    }

    #[test]
    fn test_conflicting_switches_fall_back_to_keywords() {
        assert_eq!(
            route("real talk, decode this feeling"),
            Routing::Mode(ResponseMode::Therapeutic)
        );
    }

    #[test]
    fn test_crisis_bypasses_routing() {
        assert_eq!(route("I want to kill myself"), Routing::Crisis);
        // switch phrases do not get around it
        assert_eq!(route("real talk lol, I want to end my life"), Routing::Crisis);
        assert_eq!(route("decode this: I took pills"), Routing::Crisis);
    }

    #[test]
    fn test_word_boundaries() {
        // "brother" must not hit "bro"
        assert_eq!(route("my brother called"), Routing::Mode(ResponseMode::Therapeutic));
        assert_eq!(ModeRouter::new().classify("my brother lol"), ResponseMode::RealTalk);
    }

    #[test]
    fn test_cant_cope_in_any_apostrophe_style() {
        let router = ModeRouter::new();
        for text in ["lol I can't cope", "lol I can’t cope", "lol I cant cope"] {
            assert_eq!(router.classify(text), ResponseMode::Therapeutic, "{}", text);
        }
    }

    #[test]
    fn test_non_crisis_result_never_routes_to_crisis() {
        let router = ModeRouter::new();
        for text in ["", "lol", "decode", "I feel sad"] {
            assert!(!router.route(text, &CrisisResult::none()).is_crisis());
        }
    }
}
