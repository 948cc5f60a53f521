//! Conversation assembly and collaborator ports for the sales call assistant.
//!
//! This crate defines the "ports" (provider and collaborator traits) that the
//! infrastructure layer implements, plus the pure pieces: instruction
//! template, turn appending, transcript rendering and the session store.
//! It depends only on `salescall-types` -- never on `salescall-infra`.

pub mod chat;
pub mod document;
pub mod llm;
pub mod prompt;
pub mod speech;
