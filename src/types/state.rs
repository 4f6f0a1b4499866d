//! Nervous-system state definitions

use serde::{Deserialize, Serialize};

/// The three classified nervous-system states.
///
/// Declaration order is also the tie-break order: calm > activated > shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NervousState {
    /// Settled, regulated
    Calm,
    /// Mobilized: fight/flight, anxious, revved up
    Activated,
    /// Immobilized: numb, collapsed, withdrawn
    Shutdown,
}

impl NervousState {
    /// All states in tie-break order
    pub const ALL: [NervousState; 3] = [
        NervousState::Calm,
        NervousState::Activated,
        NervousState::Shutdown,
    ];

    /// Position in tie-break order (lower wins)
    pub fn index(&self) -> usize {
        match self {
            NervousState::Calm => 0,
            NervousState::Activated => 1,
            NervousState::Shutdown => 2,
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            NervousState::Calm => "calm",
            NervousState::Activated => "activated",
            NervousState::Shutdown => "shutdown",
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            NervousState::Calm => "\x1b[32m",      // Green
            NervousState::Activated => "\x1b[33m", // Yellow
            NervousState::Shutdown => "\x1b[34m",  // Blue
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            NervousState::Calm => "🌿",
            NervousState::Activated => "⚡",
            NervousState::Shutdown => "🌑",
        }
    }
}

impl std::fmt::Display for NervousState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pick the state with the strictly highest score, ties resolved by
/// declaration order. Scores are indexed by `NervousState::index`.
pub fn strongest_state<T: PartialOrd + Copy>(scores: &[T; 3]) -> (NervousState, T) {
    let mut best = NervousState::Calm;
    let mut best_score = scores[0];
    for state in &NervousState::ALL[1..] {
        let score = scores[state.index()];
        if score > best_score {
            best = *state;
            best_score = score;
        }
    }
    (best, best_score)
}
