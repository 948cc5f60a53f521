use thiserror::Error;
use uuid::Uuid;

use crate::llm::LlmError;
use crate::selection::SelectionField;

/// Errors raised while loading configuration or credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing credential: environment variable '{0}' is not set")]
    MissingCredential(String),

    #[error("failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("invalid config file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("invalid option catalog: {0}")]
    Catalog(#[from] SelectionError),

    #[error("invalid value for server.{field}: must be greater than zero")]
    ZeroLimit { field: &'static str },
}

/// A selection that does not come from the fixed option lists.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("'{value}' is not an allowed value for {field}")]
    NotInCatalog { field: SelectionField, value: String },

    #[error("option list for {0} is empty")]
    EmptyOptionList(SelectionField),
}

/// Errors from extracting text out of an uploaded document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported file type: '{0}'")]
    Unsupported(String),

    #[error("document '{0}' is empty")]
    Empty(String),

    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("failed to read document: {0}")]
    Io(String),
}

/// Errors from producing the Word export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no assistant reply to export")]
    NothingToExport,

    #[error("failed to write document: {0}")]
    Write(String),
}

/// Errors from the speech-to-text / text-to-speech collaborator.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech features are disabled")]
    Disabled,

    #[error("speech request failed: {0}")]
    Request(String),

    #[error("speech service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse speech response: {0}")]
    Deserialization(String),

    #[error("nothing to speak")]
    NothingToSpeak,
}

/// Session lookup errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(Uuid),
}

/// Errors from submitting one conversation turn.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}
