//! CLI command definitions for the `salescall` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod check;
pub mod options;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Pharma sales call assistant: coaching replies for HCP conversations.
#[derive(Parser)]
#[command(name = "salescall", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config.toml (overrides SALESCALL_CONFIG and the data dir).
    #[arg(long, global = true, env = "SALESCALL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web form and JSON API.
    Serve {
        /// Port to listen on (defaults to server.port from config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to server.host from config).
        #[arg(long)]
        host: Option<String>,
    },

    /// Run a single turn and print the reply.
    Ask(AskArgs),

    /// List the allowed values for every form field.
    Options,

    /// Verify the API key and endpoint with a minimal completion.
    Check,
}

/// Form choices for `salescall ask`. Omitted fields take the first option.
#[derive(Args)]
pub struct AskArgs {
    /// What the representative says or asks.
    pub message: String,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub brand: Option<String>,

    /// RACE segment (Reach, Act, Convert, Engage).
    #[arg(long)]
    pub segment: Option<String>,

    /// Objection barrier; repeat for several.
    #[arg(long = "barrier")]
    pub barriers: Vec<String>,

    #[arg(long)]
    pub objective: Option<String>,

    #[arg(long)]
    pub specialty: Option<String>,

    #[arg(long)]
    pub persona: Option<String>,

    #[arg(long)]
    pub length: Option<String>,

    #[arg(long)]
    pub tone: Option<String>,

    /// PDF, PPTX or text file used as reference material.
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Also write the reply to this .docx file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}
