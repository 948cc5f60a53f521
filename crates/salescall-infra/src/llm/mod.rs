//! LLM provider implementations.
//!
//! Provides a factory ([`create_provider`]) that builds the configured
//! provider behind a [`BoxLlmProvider`], and a connection check
//! ([`test_provider_connection`]) used by `salescall check`.

pub mod openai_compat;

use secrecy::{ExposeSecret, SecretString};

use salescall_core::llm::box_provider::BoxLlmProvider;
use salescall_types::config::ProviderConfig;
use salescall_types::llm::{CompletionRequest, LlmError, LlmMessage};

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{OpenAiCompatConfig, base_url_for};

/// Create a [`BoxLlmProvider`] from the `[provider]` config section.
///
/// `base_url` wins when set; otherwise the URL is inferred from the
/// provider name (unknown names use Groq's endpoint).
pub fn create_provider(config: &ProviderConfig, api_key: &SecretString) -> BoxLlmProvider {
    let key = api_key.expose_secret();
    let provider = match config.base_url.as_deref() {
        Some(base_url) => OpenAiCompatibleProvider::new(OpenAiCompatConfig {
            provider_name: config.name.clone(),
            base_url: base_url.to_string(),
            api_key: key.to_string(),
            model: config.model.clone(),
        }),
        None => match config.name.as_str() {
            "openai" => OpenAiCompatibleProvider::openai(key, &config.model),
            "groq" => OpenAiCompatibleProvider::groq(key, &config.model),
            other => OpenAiCompatibleProvider::new(OpenAiCompatConfig {
                provider_name: other.to_string(),
                base_url: base_url_for(other).to_string(),
                api_key: key.to_string(),
                model: config.model.clone(),
            }),
        },
    };
    tracing::debug!(provider = %config.name, model = %config.model, "completion provider created");
    BoxLlmProvider::new(provider)
}

/// Send a minimal completion to verify the key and endpoint work.
pub async fn test_provider_connection(provider: &BoxLlmProvider) -> Result<(), LlmError> {
    let request = CompletionRequest {
        model: String::new(),
        messages: vec![LlmMessage::user("Hello")],
        max_tokens: 10,
        temperature: Some(0.0),
    };
    provider.complete(&request).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SecretString {
        SecretString::from("test-key".to_string())
    }

    #[test]
    fn test_create_default_provider_is_groq() {
        let provider = create_provider(&ProviderConfig::default(), &key());
        assert_eq!(provider.name(), "groq");
    }

    #[test]
    fn test_create_provider_with_base_url_keeps_name() {
        let config = ProviderConfig {
            name: "local-proxy".to_string(),
            base_url: Some("http://localhost:8080/v1".to_string()),
            ..ProviderConfig::default()
        };
        let provider = create_provider(&config, &key());
        assert_eq!(provider.name(), "local-proxy");
    }

    #[test]
    fn test_create_openai_by_name() {
        let config = ProviderConfig {
            name: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            ..ProviderConfig::default()
        };
        assert_eq!(create_provider(&config, &key()).name(), "openai");
    }
}
