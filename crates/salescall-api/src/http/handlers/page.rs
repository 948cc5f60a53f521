//! Handlers behind the HTML form.
//!
//! Endpoints:
//! - GET  /                       - Create a session and redirect to it
//! - GET  /sessions/{id}          - Render the page
//! - POST /sessions/{id}/turn     - Submit the form (multipart)
//! - POST /sessions/{id}/clear    - Clear the transcript
//! - GET  /sessions/{id}/export   - Last reply as a Word document
//! - GET  /sessions/{id}/speech   - Last reply as synthesized audio
//!
//! Every action is a single state transition on one session, followed by a
//! redirect back to the page. A failed submission re-renders the page with
//! the error inline instead.

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use uuid::Uuid;

use salescall_core::chat::service::TurnOutcome;
use salescall_types::chat::ChatSession;
use salescall_types::error::{ExportError, SessionError, SpeechError};

use crate::http::error::AppError;
use crate::http::form::TurnForm;
use crate::http::handlers::parse_uuid;
use crate::http::page::render_page;
use crate::state::AppState;
use crate::turn::{self, EXPORT_TITLE};

fn page_url(id: Uuid) -> String {
    format!("/sessions/{id}")
}

/// GET / - Start a new session.
pub async fn index(State(state): State<AppState>) -> Redirect {
    let id = state.sessions.create();
    Redirect::to(&page_url(id))
}

/// GET /sessions/{id} - Render the page; unknown sessions start over.
pub async fn show(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError> {
    let sid = parse_uuid(&session_id)?;
    let handle = match state.sessions.get(&sid) {
        Ok(handle) => handle,
        Err(SessionError::NotFound(_)) => return Ok(Redirect::to("/").into_response()),
    };
    let session = handle.lock().await;
    Ok(render_page(&state, &session, None).await?.into_response())
}

/// POST /sessions/{id}/turn - Submit the form.
pub async fn submit(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let sid = parse_uuid(&session_id)?;
    let handle = state.sessions.get(&sid)?;
    let form = TurnForm::from_multipart(multipart, state.config.server.max_upload_bytes).await;

    let mut session = handle.lock().await;
    let result = match form {
        Ok(form) => apply_form(&state, &mut session, form).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(outcome) => {
            if let TurnOutcome::Replied { response_ms, .. } = outcome {
                tracing::info!(session_id = %sid, response_ms, messages = session.transcript.len(), "turn completed");
            }
            Ok(Redirect::to(&page_url(sid)).into_response())
        }
        Err(err) => {
            tracing::warn!(session_id = %sid, error = %err, "turn failed");
            let page = render_page(&state, &session, Some(&err.to_string())).await?;
            Ok((err.status(), page).into_response())
        }
    }
}

/// Document first (so it can inform this turn), then voice, then the turn.
async fn apply_form(
    state: &AppState,
    session: &mut ChatSession,
    form: TurnForm,
) -> Result<TurnOutcome, AppError> {
    let selection = form.selection(state.conversation.catalog())?;

    if let Some(upload) = form.document {
        session.reference = Some(turn::read_document(state, upload).await?);
    }

    let text = match form.audio {
        Some(audio) if form.message.trim().is_empty() => turn::transcribe(state, audio).await?,
        _ => form.message,
    };

    Ok(turn::run_turn(state, session, selection, &text).await?)
}

/// POST /sessions/{id}/clear - Drop every message, keep the session.
pub async fn clear(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Redirect, AppError> {
    let sid = parse_uuid(&session_id)?;
    let handle = state.sessions.get(&sid)?;
    handle.lock().await.transcript.clear();
    tracing::info!(session_id = %sid, "transcript cleared");
    Ok(Redirect::to(&page_url(sid)))
}

/// GET /sessions/{id}/export - Download the last reply as .docx.
pub async fn export(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError> {
    let sid = parse_uuid(&session_id)?;
    let handle = state.sessions.get(&sid)?;
    let reply = {
        let session = handle.lock().await;
        session
            .transcript
            .last_assistant()
            .map(|m| m.text().to_string())
            .ok_or(ExportError::NothingToExport)?
    };

    let exporter = state.exporter.clone();
    let bytes = tokio::task::spawn_blocking(move || exporter.export(EXPORT_TITLE, &reply))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let disposition = format!("attachment; filename=\"{}\"", state.exporter.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, state.exporter.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// GET /sessions/{id}/speech - Read the last reply aloud.
pub async fn speech(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError> {
    let sid = parse_uuid(&session_id)?;
    let speech = state.speech.clone().ok_or(SpeechError::Disabled)?;
    let handle = state.sessions.get(&sid)?;
    let reply = {
        let session = handle.lock().await;
        session
            .transcript
            .last_assistant()
            .map(|m| m.text().to_string())
            .ok_or(SpeechError::NothingToSpeak)?
    };

    let audio = speech.synthesize(&reply).await?;
    Ok(([(header::CONTENT_TYPE, audio.content_type)], audio.bytes).into_response())
}
