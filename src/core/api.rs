//! HTTP + WebSocket API for Attune
//!
//! Endpoints:
//! - POST /evaluate - Evaluate one message
//! - GET /lexicon - Pattern categories (names, classes, state affinities)
//! - WS /ws - Live evaluation; the connection keeps its own history
//! - GET /health - Health check
//!
//! Entitlement checks and persistence sit in front of / behind this service;
//! nothing here stores messages.

use axum::{
    extract::{State, WebSocketUpgrade, ws::{Message, WebSocket}},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::{Engine, EvaluationRequest, Lexicon};
use crate::TREND_WINDOW;
use crate::types::{
    BiometricReading, CategoryClass, CommunicationStyle, Evaluation, HistoryTurn, NervousState,
};

/// App state
pub struct AppState {
    pub engine: Engine,
}

/// Evaluate request body
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub text: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    #[serde(default)]
    pub biometric: Option<BiometricReading>,
    #[serde(default)]
    pub biometric_history: Vec<BiometricReading>,
    #[serde(default)]
    pub style: Option<CommunicationStyle>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// One lexicon entry as exposed over HTTP. Keywords stay server-side.
#[derive(Debug, Serialize)]
pub struct LexiconEntry {
    pub name: &'static str,
    pub class: CategoryClass,
    pub state: NervousState,
    pub keyword_count: usize,
    pub body_phrase_count: usize,
}

/// WebSocket frame from the client: plain text, or JSON with an optional
/// reading attached
#[derive(Debug, Deserialize)]
struct WsMessage {
    text: String,
    #[serde(default)]
    biometric: Option<BiometricReading>,
}

/// Create the API router
pub fn create_router(engine: Engine) -> Router {
    let state = Arc::new(AppState { engine });

    Router::new()
        .route("/health", get(health))
        .route("/evaluate", post(evaluate))
        .route("/lexicon", get(lexicon))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// Evaluate one message
async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EvaluateRequest>,
) -> Json<Evaluation> {
    let mut request = EvaluationRequest::new(&req.text)
        .with_history(&req.history)
        .with_style(req.style);
    if let Some(reading) = req.biometric.as_ref() {
        request = request.with_biometric(reading, &req.biometric_history);
    }
    Json(state.engine.evaluate(request))
}

/// List pattern categories
async fn lexicon() -> Json<Vec<LexiconEntry>> {
    let entries = Lexicon::global()
        .categories()
        .iter()
        .map(|c| LexiconEntry {
            name: c.name,
            class: c.class,
            state: c.state,
            keyword_count: c.keywords.len(),
            body_phrase_count: c.body_phrases.len(),
        })
        .collect();
    Json(entries)
}

/// WebSocket handler for live evaluation
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Per-connection state: earlier messages and the most recent readings
#[derive(Debug, Default)]
struct WsSession {
    history: Vec<HistoryTurn>,
    readings: Vec<BiometricReading>,
}

impl WsSession {
    /// Evaluate one frame against this connection's history, then record it
    fn handle_frame(&mut self, engine: &Engine, raw: String) -> Evaluation {
        let frame = match serde_json::from_str::<WsMessage>(&raw) {
            Ok(frame) => frame,
            Err(_) => WsMessage {
                text: raw,
                biometric: None,
            },
        };

        let mut request = EvaluationRequest::new(&frame.text).with_history(&self.history);
        if let Some(reading) = frame.biometric.as_ref() {
            request = request.with_biometric(reading, &self.readings);
        }
        let evaluation = engine.evaluate(request);
        debug!(
            mode = %evaluation.mode,
            turns = self.history.len(),
            readings = self.readings.len(),
            "ws message evaluated"
        );

        self.history.push(HistoryTurn::user(frame.text));
        if let Some(reading) = frame.biometric {
            self.readings.push(reading);
            // the trend only looks at the last few prior readings
            if self.readings.len() > TREND_WINDOW {
                self.readings.remove(0);
            }
        }
        evaluation
    }
}

/// Handle WebSocket connection
async fn handle_websocket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut session = WsSession::default();

    while let Some(Ok(message)) = receiver.next().await {
        let raw = match message {
            Message::Text(raw) => raw,
            Message::Close(_) => break,
            _ => continue,
        };

        let evaluation = session.handle_frame(&state.engine, raw);
        let json = serde_json::to_string(&evaluation).unwrap_or_default();
        if sender.send(Message::Text(json)).await.is_err() {
            break;
        }
    }
}

/// Run the API server
pub async fn run_server(addr: &str, engine: Engine) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(engine);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Attune API listening");
    println!("🌿 Attune API running on {}", addr);
    println!("  POST /evaluate  - Evaluate a message");
    println!("  GET  /lexicon   - Pattern categories");
    println!("  WS   /ws        - Live evaluation");
    println!("  GET  /health    - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trend;

    #[test]
    fn test_ws_session_carries_history() {
        let engine = Engine::default();
        let mut session = WsSession::default();

        let first = session.handle_frame(&engine, "my sister never called back".to_string());
        assert!(first.instruction.contains("(no earlier messages)"));

        let second = session.handle_frame(&engine, r#"{"text": "I feel so abandoned"}"#.to_string());
        assert!(second.instruction.contains("User: my sister never called back"));
        assert!(second.instruction.ends_with("User: I feel so abandoned"));
        assert_eq!(session.history.len(), 2);
    }

    #[test]
    fn test_ws_session_builds_trend_from_readings() {
        let engine = Engine::default();
        let mut session = WsSession::default();

        for hrv in [30, 31, 32, 33] {
            let frame = format!(r#"{{"text": "checking in", "biometric": {{"hrv": {}}}}}"#, hrv);
            let evaluation = session.handle_frame(&engine, frame);
            assert_eq!(evaluation.biometric.trend, Trend::Stable);
        }
        assert_eq!(session.readings.len(), TREND_WINDOW);

        let evaluation = session.handle_frame(
            &engine,
            r#"{"text": "checking in", "biometric": {"hrv": 50}}"#.to_string(),
        );
        assert_eq!(evaluation.biometric.trend, Trend::Improving);
    }

    #[test]
    fn test_ws_plain_text_frame_has_no_reading() {
        let engine = Engine::default();
        let mut session = WsSession::default();
        let evaluation = session.handle_frame(&engine, "{not json but still a message".to_string());
        assert!(evaluation.biometric.is_no_data());
        assert!(session.readings.is_empty());
        assert_eq!(session.history[0].content, "{not json but still a message");
    }
}
