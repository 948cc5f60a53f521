//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use salescall_types::error::{
    DocumentError, ExportError, SelectionError, SessionError, SpeechError, TurnError,
};
use salescall_types::llm::LlmError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Session(SessionError),
    Selection(SelectionError),
    Llm(LlmError),
    Document(DocumentError),
    Export(ExportError),
    Speech(SpeechError),
    /// Malformed request input.
    Validation(String),
    /// Request body over the configured upload limit.
    PayloadTooLarge(String),
    Internal(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl From<SelectionError> for AppError {
    fn from(e: SelectionError) -> Self {
        AppError::Selection(e)
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e)
    }
}

impl From<DocumentError> for AppError {
    fn from(e: DocumentError) -> Self {
        AppError::Document(e)
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Export(e)
    }
}

impl From<SpeechError> for AppError {
    fn from(e: SpeechError) -> Self {
        AppError::Speech(e)
    }
}

impl From<TurnError> for AppError {
    fn from(e: TurnError) -> Self {
        match e {
            TurnError::Selection(e) => AppError::Selection(e),
            TurnError::Llm(e) => AppError::Llm(e),
        }
    }
}

impl From<minijinja::Error> for AppError {
    fn from(e: minijinja::Error) -> Self {
        AppError::Internal(format!("template error: {e}"))
    }
}

impl AppError {
    /// Status, machine-readable code, and message for this error.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Session(e @ SessionError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", e.to_string())
            }
            AppError::Selection(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::Llm(e) => (StatusCode::BAD_GATEWAY, "LLM_ERROR", e.to_string()),
            AppError::Document(e @ DocumentError::Unsupported(_)) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_DOCUMENT", e.to_string())
            }
            AppError::Document(e) => (StatusCode::UNPROCESSABLE_ENTITY, "DOCUMENT_ERROR", e.to_string()),
            AppError::Export(e @ ExportError::NothingToExport) => {
                (StatusCode::NOT_FOUND, "NOTHING_TO_EXPORT", e.to_string())
            }
            AppError::Export(e) => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR", e.to_string()),
            AppError::Speech(e @ SpeechError::Disabled) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SPEECH_DISABLED", e.to_string())
            }
            AppError::Speech(e @ SpeechError::NothingToSpeak) => {
                (StatusCode::NOT_FOUND, "NOTHING_TO_SPEAK", e.to_string())
            }
            AppError::Speech(e) => (StatusCode::BAD_GATEWAY, "SPEECH_ERROR", e.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.parts().2)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::warn!(code, %message, "request failed");
        }

        let body = ApiResponse::error(code, &message, Uuid::now_v7().to_string(), 0);
        (status, Json(body)).into_response()
    }
}
