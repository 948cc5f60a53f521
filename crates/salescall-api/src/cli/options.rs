//! `salescall options`: print the option catalog.

use anyhow::Result;
use console::style;

use salescall_types::selection::OptionCatalog;

use crate::http::handlers::options::field_options;

pub fn print_options(catalog: &OptionCatalog, json: bool) -> Result<()> {
    let fields = field_options(catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }

    println!();
    for field in &fields {
        let suffix = if field.multi { " (multiple)" } else { "" };
        println!(
            "  {}{}  {}",
            style(field.label).bold(),
            style(suffix).dim(),
            style(format!("--{}", cli_flag(field.key))).dim()
        );
        for option in &field.options {
            println!("    - {option}");
        }
    }
    println!();
    Ok(())
}

/// The `ask` flag for a form field (`barriers` is repeated as `--barrier`).
fn cli_flag(key: &str) -> &str {
    match key {
        "barriers" => "barrier",
        other => other,
    }
}
