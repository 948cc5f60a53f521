//! Shared domain types for the sales call assistant.
//!
//! Transcript messages, the form selection set and its option catalog,
//! LLM request/response shapes, configuration, and the error enums used
//! across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod selection;
