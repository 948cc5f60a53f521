//! Infrastructure layer for the sales call assistant.
//!
//! Implementations of the ports defined in `salescall-core`: the
//! OpenAI-compatible completion and speech clients, PDF/PPTX/text readers,
//! the DOCX writer, brand reference loading, and config/credential loading.

pub mod brand;
pub mod config;
pub mod document;
pub mod export;
pub mod llm;
pub mod speech;
