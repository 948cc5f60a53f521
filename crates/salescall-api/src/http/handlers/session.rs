//! Session and turn JSON handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions                - Create a session
//! - GET    /api/v1/sessions/{id}/messages  - Transcript in order
//! - POST   /api/v1/sessions/{id}/turns     - Submit one turn
//! - POST   /api/v1/sessions/{id}/clear     - Clear messages but keep session
//! - DELETE /api/v1/sessions/{id}           - Delete a session

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salescall_core::chat::service::TurnOutcome;
use salescall_types::chat::Message;
use salescall_types::llm::Usage;
use salescall_types::selection::Selection;

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;
use crate::turn;

/// Body of `POST /sessions/{id}/turns`.
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    /// Omitted: the catalog's first option for every field.
    #[serde(default)]
    pub selection: Option<Selection>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    /// `"replied"` or `"ignored"` (blank message).
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_ms: Option<u64>,
    pub message_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub message_count: usize,
}

fn request_id() -> String {
    Uuid::now_v7().to_string()
}

/// POST /api/v1/sessions - Create an empty session.
pub async fn create_session(State(state): State<AppState>) -> Json<ApiResponse<SessionSummary>> {
    let start = Instant::now();
    let id = state.sessions.create();
    let resp = ApiResponse::success(
        SessionSummary {
            id,
            message_count: 0,
        },
        request_id(),
        start.elapsed().as_millis() as u64,
    )
    .with_link("self", &format!("/api/v1/sessions/{id}/messages"))
    .with_link("page", &format!("/sessions/{id}"));
    Json(resp)
}

/// GET /api/v1/sessions/{id}/messages - Transcript in arrival order.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Message>>>, AppError> {
    let start = Instant::now();
    let sid = parse_uuid(&session_id)?;
    let handle = state.sessions.get(&sid)?;
    let messages = handle.lock().await.transcript.messages().to_vec();

    let resp = ApiResponse::success(messages, request_id(), start.elapsed().as_millis() as u64)
        .with_link("self", &format!("/api/v1/sessions/{sid}/messages"));
    Ok(Json(resp))
}

/// POST /api/v1/sessions/{id}/turns - Submit one turn.
///
/// A failed completion answers `502 LLM_ERROR`; the user message stays in
/// the transcript.
pub async fn submit_turn(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<TurnRequest>,
) -> Result<Json<ApiResponse<TurnResponse>>, AppError> {
    let start = Instant::now();
    let sid = parse_uuid(&session_id)?;
    let handle = state.sessions.get(&sid)?;

    let selection = match body.selection {
        Some(selection) => selection,
        None => state
            .conversation
            .catalog()
            .default_selection()
            .ok_or_else(|| AppError::Internal("option catalog is incomplete".to_string()))?,
    };

    let mut session = handle.lock().await;
    let outcome = turn::run_turn(&state, &mut session, selection, &body.message).await?;

    let data = match outcome {
        TurnOutcome::Ignored => TurnResponse {
            outcome: "ignored",
            reply: None,
            usage: None,
            response_ms: None,
            message_count: session.transcript.len(),
        },
        TurnOutcome::Replied { usage, response_ms } => TurnResponse {
            outcome: "replied",
            reply: session.transcript.last_assistant().map(|m| m.text().to_string()),
            usage: Some(usage),
            response_ms: Some(response_ms),
            message_count: session.transcript.len(),
        },
    };

    let resp = ApiResponse::success(data, request_id(), start.elapsed().as_millis() as u64)
        .with_link("messages", &format!("/api/v1/sessions/{sid}/messages"));
    Ok(Json(resp))
}

/// POST /api/v1/sessions/{id}/clear - Clear messages but keep the session.
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionSummary>>, AppError> {
    let start = Instant::now();
    let sid = parse_uuid(&session_id)?;
    let handle = state.sessions.get(&sid)?;
    handle.lock().await.transcript.clear();

    let resp = ApiResponse::success(
        SessionSummary {
            id: sid,
            message_count: 0,
        },
        request_id(),
        start.elapsed().as_millis() as u64,
    );
    Ok(Json(resp))
}

/// DELETE /api/v1/sessions/{id} - Forget a session entirely.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let sid = parse_uuid(&session_id)?;
    state.sessions.remove(&sid)?;
    tracing::info!(session_id = %sid, "session deleted");

    let resp = ApiResponse::success(
        serde_json::json!({ "deleted": true, "id": sid }),
        request_id(),
        start.elapsed().as_millis() as u64,
    );
    Ok(Json(resp))
}
