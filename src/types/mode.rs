//! Response modes and routing outcome

use serde::{Deserialize, Serialize};

/// Response style for the downstream model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// Supportive default
    Therapeutic,
    /// Casual, direct
    RealTalk,
    /// Deep analysis of sensations and patterns
    Decode,
}

impl ResponseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Therapeutic => "therapeutic",
            Self::RealTalk => "real_talk",
            Self::Decode => "decode",
        }
    }
}

impl std::fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of routing. `Crisis` is terminal and is not a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    Crisis,
    Mode(ResponseMode),
}

impl Routing {
    /// Wire name: the mode name, or "crisis"
    pub fn as_str(&self) -> &'static str {
        match self {
            Routing::Crisis => "crisis",
            Routing::Mode(mode) => mode.as_str(),
        }
    }

    pub fn is_crisis(&self) -> bool {
        matches!(self, Routing::Crisis)
    }
}

impl std::fmt::Display for Routing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User's preferred register, stored by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStyle {
    Gentle,
    Balanced,
    Direct,
}

impl std::str::FromStr for CommunicationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gentle" => Ok(Self::Gentle),
            "balanced" => Ok(Self::Balanced),
            "direct" => Ok(Self::Direct),
            other => Err(format!("unknown communication style '{}'", other)),
        }
    }
}
