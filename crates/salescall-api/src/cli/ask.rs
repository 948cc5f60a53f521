//! `salescall ask`: run one turn from the command line.

use anyhow::{Context, Result};
use console::style;

use salescall_core::chat::service::TurnOutcome;
use salescall_types::chat::ChatSession;
use salescall_types::selection::{OptionCatalog, Selection};

use crate::cli::AskArgs;
use crate::state::AppState;
use crate::turn::{self, EXPORT_TITLE, Upload};

/// Apply the flags over the catalog's first-option selection.
fn selection_from_args(catalog: &OptionCatalog, args: &AskArgs) -> Result<Selection> {
    let mut selection = catalog
        .default_selection()
        .context("option catalog is incomplete")?;

    let overrides = [
        (&args.language, &mut selection.language),
        (&args.brand, &mut selection.brand),
        (&args.segment, &mut selection.segment),
        (&args.objective, &mut selection.objective),
        (&args.specialty, &mut selection.specialty),
        (&args.persona, &mut selection.persona),
        (&args.length, &mut selection.length),
        (&args.tone, &mut selection.tone),
    ];
    for (value, slot) in overrides {
        if let Some(value) = value {
            *slot = value.clone();
        }
    }
    selection.barriers = args.barriers.clone();

    Ok(selection)
}

pub async fn ask(state: &AppState, args: AskArgs, json: bool, quiet: bool) -> Result<()> {
    let selection = selection_from_args(state.conversation.catalog(), &args)?;
    let mut session = ChatSession::new();

    if let Some(path) = &args.document {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        session.reference = Some(turn::read_document(state, Upload { file_name, bytes }).await?);
    }

    let outcome = turn::run_turn(state, &mut session, selection, &args.message).await?;

    let TurnOutcome::Replied { usage, response_ms } = outcome else {
        anyhow::bail!("message is empty; nothing to ask");
    };
    let reply = session
        .transcript
        .last_assistant()
        .map(|m| m.text().to_string())
        .unwrap_or_default();

    if let Some(path) = &args.export {
        let bytes = state.exporter.export(EXPORT_TITLE, &reply)?;
        tokio::fs::write(path, bytes)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if json {
        let out = serde_json::json!({
            "reply": reply,
            "usage": usage,
            "response_ms": response_ms,
            "reference": session.reference.as_ref().map(|d| &d.file_name),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("{reply}");
    if !quiet {
        println!();
        println!(
            "  {}",
            style(format!(
                "{} tokens in, {} out, {response_ms} ms",
                usage.input_tokens, usage.output_tokens
            ))
            .dim()
        );
        if let Some(path) = &args.export {
            println!("  {} {}", style("Saved").green(), path.display());
        }
    }
    Ok(())
}
