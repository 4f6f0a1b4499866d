//! Instruction Composer: assembles the block sent to the text-generation call
//!
//! Crisis short-circuits to the fixed resource instruction. Otherwise:
//! mode framing, tone guidance derived from the fused state (plain language,
//! no internal labels), optional style line, history verbatim, current message.

use crate::types::{
    BlendedState, CommunicationStyle, CrisisResult, FusedState, HistoryTurn, NervousState,
    ResponseMode,
};

/// Fixed crisis instruction. Safety-reviewed text; change only through review.
pub const CRISIS_INSTRUCTION: &str = "\
The person may be in immediate danger or thinking about ending their life or hurting someone. \
Set aside any other style or task. Respond with calm, direct warmth in a few short sentences:
- Tell them you are really glad they told you and that they deserve support right now.
- Ask whether they are safe at this moment.
- Urge them to contact emergency services (911 in the US, or their local emergency number) \
if they are in immediate danger.
- Share crisis resources: call or text 988 (Suicide & Crisis Lifeline, US), text HOME to 741741 \
(Crisis Text Line), or find a local line at https://findahelpline.com.
- Encourage them to reach out to someone they trust and not stay alone.
Do not analyze, diagnose, debate, or give instructions for anything else. Do not end the conversation.";

const FRAMING_THERAPEUTIC: &str = "\
You are a warm, steady companion for emotional support. Lead with validation and gentle curiosity. \
Reflect what you hear before offering anything. Offer at most one small, concrete next step, \
and only if it fits. Never diagnose.";

const FRAMING_REAL_TALK: &str = "\
Talk like a trusted friend who tells it straight: casual, honest, and direct. Skip clinical \
language and long disclaimers. Be kind underneath the bluntness, and keep replies short.";

const FRAMING_DECODE: &str = "\
Help the person decode what their body and reactions may be signalling. Be curious and specific: \
connect the sensations they describe to possible protective responses, in plain language. \
Offer interpretations as possibilities, never as facts or diagnoses.";

const TONE_RULE: &str = "\
Use the state notes below only to shape pacing and tone. Never mention them, never name \
internal categories or classifications, and never tell the person what state they are in.";

#[derive(Debug, Default, Clone, Copy)]
pub struct InstructionComposer;

impl InstructionComposer {
    pub fn new() -> Self {
        Self
    }

    /// Build the instruction block for one turn
    pub fn compose(
        &self,
        mode: ResponseMode,
        fused: &FusedState,
        crisis: &CrisisResult,
        history: &[HistoryTurn],
        text: &str,
        style: Option<CommunicationStyle>,
    ) -> String {
        if crisis.is_crisis {
            return CRISIS_INSTRUCTION.to_string();
        }

        let mut out = String::new();
        out.push_str(framing(mode));
        out.push_str("\n\n");
        out.push_str(TONE_RULE);
        out.push_str("\n\nState notes:\n");
        out.push_str(&state_notes(fused));

        if let Some(style) = style {
            out.push_str("\n\nPreferred register: ");
            out.push_str(style_line(style));
        }

        out.push_str("\n\nConversation so far:\n");
        if history.is_empty() {
            out.push_str("(no earlier messages)\n");
        }
        for turn in history {
            out.push_str(turn.role.label());
            out.push_str(": ");
            out.push_str(&turn.content);
            out.push('\n');
        }

        out.push_str("\nCurrent message:\nUser: ");
        out.push_str(text);
        out
    }
}

fn framing(mode: ResponseMode) -> &'static str {
    match mode {
        ResponseMode::Therapeutic => FRAMING_THERAPEUTIC,
        ResponseMode::RealTalk => FRAMING_REAL_TALK,
        ResponseMode::Decode => FRAMING_DECODE,
    }
}

fn style_line(style: CommunicationStyle) -> &'static str {
    match style {
        CommunicationStyle::Gentle => "soft and unhurried; cushion anything difficult.",
        CommunicationStyle::Balanced => "warm but clear; mix reflection with practical suggestions.",
        CommunicationStyle::Direct => "plain and to the point; skip preamble.",
    }
}

/// Plain-language tone guidance for a state
fn describe(state: NervousState) -> &'static str {
    match state {
        NervousState::Calm => {
            "They seem fairly settled. There is room for reflection and longer thoughts."
        }
        NervousState::Activated => {
            "They seem stirred up and on high alert. Slow the pace, keep sentences short, \
             and offer steadiness before insight."
        }
        NervousState::Shutdown => {
            "They seem low on energy and possibly withdrawn. Be gentle and patient, ask little, \
             and invite small signs of connection."
        }
    }
}

fn undertone(state: NervousState) -> &'static str {
    match state {
        NervousState::Calm => "some steadiness underneath",
        NervousState::Activated => "some restlessness or tension underneath",
        NervousState::Shutdown => "some heaviness or withdrawal underneath",
    }
}

fn certainty(confidence: f64) -> &'static str {
    if confidence >= 70.0 {
        "The read on this is fairly clear."
    } else if confidence >= 30.0 {
        "The read on this is tentative; stay responsive to what they say."
    } else {
        "There is very little to go on; follow their lead."
    }
}

fn state_notes(fused: &FusedState) -> String {
    let mut notes = format!("- {}\n- {}", describe(fused.state), certainty(fused.confidence));
    let secondary: Vec<&'static str> = fused
        .blended_states
        .iter()
        .map(|BlendedState { state, .. }| undertone(*state))
        .collect();
    if !secondary.is_empty() {
        notes.push_str("\n- There may also be ");
        notes.push_str(&secondary.join(" and "));
        notes.push('.');
    }
    notes
}

// =============================================================================
// TESTS
// =============================================================================
