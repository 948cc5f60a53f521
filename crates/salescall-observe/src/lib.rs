//! Logging and trace export setup for the sales call assistant.

pub mod tracing_setup;
