//! Speech backends.

pub mod openai_compat;

use secrecy::SecretString;

use salescall_core::speech::BoxSpeechProvider;
use salescall_types::config::{ProviderConfig, SpeechConfig};

use crate::llm::openai_compat::config::base_url_for;

use self::openai_compat::OpenAiCompatSpeech;

/// Build the speech backend, or `None` when speech is disabled.
///
/// Without an explicit `[speech] base_url`, the completion provider's
/// endpoint (and key) is reused.
pub fn create_speech_provider(
    speech: &SpeechConfig,
    provider: &ProviderConfig,
    api_key: &SecretString,
) -> Option<BoxSpeechProvider> {
    if !speech.enabled {
        tracing::info!("speech features disabled");
        return None;
    }

    let base_url = speech
        .base_url
        .clone()
        .or_else(|| provider.base_url.clone())
        .unwrap_or_else(|| base_url_for(&provider.name).to_string());

    Some(BoxSpeechProvider::new(OpenAiCompatSpeech::new(
        base_url,
        api_key.clone(),
        speech.clone(),
    )))
}
