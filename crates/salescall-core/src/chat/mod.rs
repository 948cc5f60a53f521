//! Conversation turns, session storage and transcript rendering.

pub mod render;
pub mod service;
pub mod store;
