//! Pattern Lexicon and crisis phrase tables
//!
//! Pure data. Categories are declared once in a static table and looked up by
//! name through an index built on first use. Declaration order matters: it is
//! the tie-break order for equally intense signals.
//!
//! All phrases are lower-case and matched as substrings of the input's match
//! form (see [`match_form`]), so entries avoid short stems that hide inside
//! unrelated words. Apostrophes are optional on both sides: "don't", "don’t"
//! and "dont" are the same phrase.

use std::collections::HashMap;
use lazy_static::lazy_static;
use crate::types::{CategoryClass, CrisisType, NervousState, PatternCategory};

use CategoryClass::*;
use NervousState::*;

// =============================================================================
// ADAPTIVE-SIGNAL CATEGORIES
// =============================================================================

static PATTERN_CATEGORIES: &[PatternCategory] = &[
    // -------------------------------------------------------------------------
    // Survival responses
    // -------------------------------------------------------------------------
    PatternCategory {
        name: "FIGHT",
        class: SurvivalResponse,
        state: Activated,
        keywords: &[
            "furious", "so angry", "enraged", "pissed off", "want to scream",
            "lash out", "snapped at", "fed up", "can't stand", "ready to fight",
        ],
        body_phrases: &["clenched jaw", "clenched fists", "hot face", "heat rising", "tight shoulders"],
    },
    PatternCategory {
        name: "FLIGHT",
        class: SurvivalResponse,
        state: Activated,
        keywords: &[
            "anxious", "panic", "can't sit still", "need to escape", "want to run",
            "restless", "racing thoughts", "on edge", "worried", "nervous",
        ],
        body_phrases: &["racing heart", "heart pounding", "shallow breath", "sweaty palms", "butterflies"],
    },
    PatternCategory {
        name: "FREEZE",
        class: SurvivalResponse,
        state: Shutdown,
        keywords: &[
            "frozen", "stuck", "can't move", "paralyzed", "can't think",
            "went blank", "mind blank", "can't decide",
        ],
        body_phrases: &["heavy limbs", "holding my breath", "stiff body", "can't speak"],
    },
    PatternCategory {
        name: "FAWN",
        class: SurvivalResponse,
        state: Activated,
        keywords: &[
            "people pleasing", "people-pleasing", "can't say no", "keep apologizing",
            "don't want to upset", "whatever they want", "keep the peace", "make everyone happy",
        ],
        body_phrases: &["tight throat", "forced smile", "knot in my stomach"],
    },
    PatternCategory {
        name: "DISSOCIATION",
        class: SurvivalResponse,
        state: Shutdown,
        keywords: &[
            "feel numb", "so numb", "numbness", "floating", "not real", "detached",
            "spaced out", "zoned out", "watching myself", "on autopilot",
        ],
        body_phrases: &["tingling", "can't feel my body", "fuzzy vision", "foggy head"],
    },
    // -------------------------------------------------------------------------
    // Attachment wounds
    // -------------------------------------------------------------------------
    PatternCategory {
        name: "ABANDONMENT",
        class: AttachmentWound,
        state: Activated,
        keywords: &[
            "left me", "abandoned", "all alone", "nobody cares", "no one cares",
            "going to leave", "they'll leave", "ghosted", "ignored me", "don't text back",
        ],
        body_phrases: &["ache in my chest", "hollow", "pit in my stomach"],
    },
    PatternCategory {
        name: "ENGULFMENT",
        class: AttachmentWound,
        state: Activated,
        keywords: &[
            "smothered", "suffocating", "too clingy", "need space", "trapped in",
            "controlling", "can't breathe around",
        ],
        body_phrases: &["chest tightens", "closing in"],
    },
    PatternCategory {
        name: "REJECTION_SENSITIVITY",
        class: AttachmentWound,
        state: Activated,
        keywords: &[
            "rejected", "they hate me", "don't like me", "left out", "excluded",
            "not wanted", "unwanted", "not good enough for them",
        ],
        body_phrases: &["stomach drops", "face burning"],
    },
    // -------------------------------------------------------------------------
    // Shame core
    // -------------------------------------------------------------------------
    PatternCategory {
        name: "SHAME",
        class: ShameCore,
        state: Shutdown,
        keywords: &[
            "ashamed", "humiliated", "embarrassed", "disgusting",
            "something wrong with me", "i'm broken", "want to hide",
        ],
        body_phrases: &["want to disappear", "shrinking", "hot cheeks", "head down"],
    },
    PatternCategory {
        name: "PERFECTIONISM",
        class: ShameCore,
        state: Activated,
        keywords: &[
            "has to be perfect", "not good enough", "failure", "should have", "never enough",
            "mistake", "screwed up", "messed up",
        ],
        body_phrases: &["tension headache", "tight neck"],
    },
    PatternCategory {
        name: "WORTHLESSNESS",
        class: ShameCore,
        state: Shutdown,
        keywords: &[
            "worthless", "useless", "pointless", "a burden", "don't matter",
            "hopeless", "waste of space",
        ],
        body_phrases: &["heavy chest", "sinking feeling"],
    },
    // -------------------------------------------------------------------------
    // Activation states
    // -------------------------------------------------------------------------
    PatternCategory {
        name: "HYPERVIGILANCE",
        class: ActivationState,
        state: Activated,
        keywords: &[
            "on guard", "scanning the room", "can't relax", "jumpy", "startle",
            "something bad will happen", "other shoe", "can't sleep",
        ],
        body_phrases: &["tense muscles", "wide eyes", "jaw tight"],
    },
    PatternCategory {
        name: "OVERWHELM",
        class: ActivationState,
        state: Activated,
        keywords: &[
            "overwhelmed", "too much", "can't cope", "drowning", "falling apart",
            "breaking down", "can't handle",
        ],
        body_phrases: &["chest tight", "tight chest", "dizzy", "head spinning"],
    },
    PatternCategory {
        name: "COLLAPSE",
        class: ActivationState,
        state: Shutdown,
        keywords: &[
            "shut down", "shutting down", "no energy", "can't get out of bed",
            "gave up", "giving up", "empty inside", "drained", "burnt out", "burned out",
        ],
        body_phrases: &["heavy body", "slumped", "bone tired", "exhausted"],
    },
    PatternCategory {
        name: "GROUNDED",
        class: ActivationState,
        state: Calm,
        keywords: &[
            "calm", "grounded", "peaceful", "relaxed", "at ease", "settled",
            "feel safe", "feel present", "centered", "breathing easier",
        ],
        body_phrases: &["slow breath", "deep breath", "loose shoulders", "soft belly", "steady heartbeat"],
    },
];

// =============================================================================
// CRISIS PHRASES
//
// Disjoint from the pattern lexicon and tuned for recall. Scan order is the
// tie-break order for equally confident types.
// =============================================================================

static SUICIDAL_PHRASES: &[&str] = &[
    "kill myself", "killing myself", "end my life", "ending my life", "want to die",
    "wanna die", "suicide", "suicidal", "take my own life", "better off dead",
    "no reason to live", "don't want to be alive", "don't want to live", "end it all", "not worth living",
];

static SELF_HARM_PHRASES: &[&str] = &[
    "hurt myself", "hurting myself", "cut myself", "cutting myself", "self harm",
    "self-harm", "burn myself", "harm myself", "punish my body", "starve myself",
];

static HARM_OTHERS_PHRASES: &[&str] = &[
    "kill him", "kill her", "kill them", "kill someone", "kill somebody",
    "hurt someone", "hurt somebody", "murder", "strangle", "stab him", "stab her",
    "make them bleed",
];

static IMMEDIATE_DANGER_PHRASES: &[&str] = &[
    "took pills", "taken pills", "swallowed pills", "overdose", "overdosed",
    "gun to my head", "gun in my hand", "loaded gun", "on the ledge",
    "going to jump", "about to jump", "rope around my neck", "can't stop bleeding",
    "in danger right now", "he's going to hurt me",
    "someone is hurting me",
];

/// Crisis phrase sets in scan order
pub static CRISIS_PHRASES: &[(CrisisType, &[&str])] = &[
    (CrisisType::Suicidal, SUICIDAL_PHRASES),
    (CrisisType::SelfHarm, SELF_HARM_PHRASES),
    (CrisisType::HarmOthers, HARM_OTHERS_PHRASES),
    (CrisisType::ImmediateDanger, IMMEDIATE_DANGER_PHRASES),
];

// =============================================================================
// MATCHING
// =============================================================================

/// Lower-case and fold typographic single quotes (U+2018, U+2019) to `'`
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase().replace(['\u{2018}', '\u{2019}'], "'")
}

/// Normalized text with apostrophes removed. Phrase scans run against this.
pub fn match_form(text: &str) -> String {
    normalize_text(text).replace('\'', "")
}

/// Does `haystack` (already in match form) contain `phrase`?
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    if phrase.contains('\'') {
        haystack.contains(&phrase.replace('\'', ""))
    } else {
        haystack.contains(phrase)
    }
}

// =============================================================================
// ARENA
// =============================================================================

/// Immutable arena of pattern categories with name lookup
#[derive(Debug)]
pub struct Lexicon {
    categories: &'static [PatternCategory],
    by_name: HashMap<&'static str, usize>,
}

lazy_static! {
    static ref LEXICON: Lexicon = Lexicon::build(PATTERN_CATEGORIES);
}

impl Lexicon {
    fn build(categories: &'static [PatternCategory]) -> Self {
        let by_name = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name, i))
            .collect();
        Self { categories, by_name }
    }

    /// The process-wide lexicon
    pub fn global() -> &'static Lexicon {
        &LEXICON
    }

    /// Categories in declaration order
    pub fn categories(&self) -> &'static [PatternCategory] {
        self.categories
    }

    /// Look up a category by its name
    pub fn get(&self, name: &str) -> Option<&'static PatternCategory> {
        self.by_name.get(name).map(|&i| &self.categories[i])
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_category_names_unique() {
        let names: HashSet<_> = PATTERN_CATEGORIES.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), PATTERN_CATEGORIES.len());
    }

    #[test]
    fn test_every_category_has_keywords() {
        for category in Lexicon::global().categories() {
            assert!(!category.keywords.is_empty(), "{} has no keywords", category.name);
        }
    }

    #[test]
    fn test_phrases_are_lowercase() {
        for category in PATTERN_CATEGORIES {
            for phrase in category.keywords.iter().chain(category.body_phrases) {
                assert_eq!(*phrase, phrase.to_lowercase(), "{} in {}", phrase, category.name);
            }
        }
        for (_, phrases) in CRISIS_PHRASES {
            for phrase in *phrases {
                assert_eq!(*phrase, phrase.to_lowercase());
            }
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let lexicon = Lexicon::global();
        let dissociation = lexicon.get("DISSOCIATION").unwrap();
        assert_eq!(dissociation.class, CategoryClass::SurvivalResponse);
        assert_eq!(dissociation.state, NervousState::Shutdown);
        assert!(lexicon.get("NOT_A_CATEGORY").is_none());
    }

    #[test]
    fn test_every_class_represented() {
        let classes: Vec<_> = PATTERN_CATEGORIES.iter().map(|c| c.class).collect();
        for class in [SurvivalResponse, AttachmentWound, ShameCore, ActivationState] {
            assert!(classes.contains(&class));
        }
    }

    #[test]
    fn test_crisis_lexicon_disjoint_from_patterns() {
        let pattern_phrases: HashSet<String> = PATTERN_CATEGORIES
            .iter()
            .flat_map(|c| c.keywords.iter().chain(c.body_phrases))
            .map(|p| match_form(p))
            .collect();
        for (_, phrases) in CRISIS_PHRASES {
            for phrase in *phrases {
                assert!(!pattern_phrases.contains(&match_form(phrase)), "{} in both lexicons", phrase);
            }
        }
    }

    #[test]
    fn test_crisis_phrases_unique_after_folding() {
        let mut seen = HashSet::new();
        for (_, phrases) in CRISIS_PHRASES {
            for phrase in *phrases {
                assert!(seen.insert(match_form(phrase)), "{} listed twice", phrase);
            }
        }
    }

    #[test]
    fn test_apostrophe_spellings_match() {
        for text in ["I don't care", "I don’t care", "I don‘t care", "I dont care"] {
            assert!(contains_phrase(&match_form(text), "don't care"), "{}", text);
        }
        assert!(contains_phrase(&match_form("DON’T"), "dont"));
        assert!(!contains_phrase(&match_form("do not care"), "don't care"));
    }

    #[test]
    fn test_normalize_keeps_straight_apostrophe() {
        assert_eq!(normalize_text("Can’t Cope"), "can't cope");
    }
}
