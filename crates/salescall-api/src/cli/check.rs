//! `salescall check`: verify the credential and endpoint.

use anyhow::Result;
use console::style;

use salescall_infra::llm::{create_provider, test_provider_connection};
use salescall_infra::config::resolve_api_key;
use salescall_types::config::AppConfig;

pub async fn check(config: &AppConfig, json: bool) -> Result<()> {
    let api_key = resolve_api_key(&config.provider.api_key_env)?;
    let provider = create_provider(&config.provider, &api_key);
    let result = test_provider_connection(&provider).await;

    if json {
        let report = serde_json::json!({
            "provider": provider.name(),
            "model": config.provider.model,
            "ok": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &result {
            Ok(()) => println!(
                "  {} {} ({}) is reachable",
                style("✓").green(),
                style(provider.name()).cyan(),
                config.provider.model
            ),
            Err(e) => println!(
                "  {} {} ({}): {e}",
                style("✗").red(),
                style(provider.name()).cyan(),
                config.provider.model
            ),
        }
    }

    result.map_err(Into::into)
}
