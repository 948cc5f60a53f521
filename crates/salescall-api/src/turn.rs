//! Turn plumbing shared by the web form, the JSON API and `salescall ask`.
//!
//! Resolves the reference excerpt (uploaded document first, then the
//! brand's configured reference file), reads uploads off the async runtime,
//! and records the selection on the session once it has been accepted.

use std::sync::Arc;

use salescall_core::chat::service::{TurnInput, TurnOutcome};
use salescall_types::chat::{ChatSession, ReferenceDocument};
use salescall_types::error::{DocumentError, SpeechError, TurnError};
use salescall_types::selection::Selection;

use crate::state::AppState;

/// Heading placed above the reply in the Word export.
pub const EXPORT_TITLE: &str = "AI Sales Call Response";

/// A file received from the form or the command line.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Submit one turn against `session`.
pub async fn run_turn(
    state: &AppState,
    session: &mut ChatSession,
    selection: Selection,
    user_text: &str,
) -> Result<TurnOutcome, TurnError> {
    let brand_reference = match session.reference {
        Some(_) => None,
        None => {
            state
                .brands
                .load(state.conversation.catalog(), &selection.brand)
                .await
        }
    };
    let reference = session.reference.as_ref().or(brand_reference.as_deref());

    let outcome = state
        .conversation
        .submit_turn(
            &mut session.transcript,
            TurnInput {
                selection: &selection,
                user_text,
                reference,
            },
        )
        .await;

    if !matches!(outcome, Err(TurnError::Selection(_))) {
        session.last_selection = Some(selection);
    }
    outcome
}

/// Extract text from an uploaded document on a blocking thread.
pub async fn read_document(state: &AppState, upload: Upload) -> Result<ReferenceDocument, DocumentError> {
    let reader = Arc::clone(&state.reader);
    tokio::task::spawn_blocking(move || reader.read(&upload.file_name, &upload.bytes))
        .await
        .map_err(|e| DocumentError::Io(e.to_string()))?
}

/// Turn a recorded clip into text, failing when speech is disabled.
pub async fn transcribe(state: &AppState, upload: Upload) -> Result<String, SpeechError> {
    let speech = state.speech.as_ref().ok_or(SpeechError::Disabled)?;
    speech.transcribe(upload.bytes, &upload.file_name).await
}
