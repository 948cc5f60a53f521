//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the HTTP handlers. Ports are pinned to the infra implementations here.

use std::sync::Arc;

use minijinja::Environment;

use salescall_core::chat::service::{CompletionSettings, ConversationService};
use salescall_core::chat::store::{SessionLimits, SessionStore};
use salescall_core::document::{DocumentExporter, DocumentReader};
use salescall_core::llm::box_provider::BoxLlmProvider;
use salescall_core::speech::BoxSpeechProvider;
use salescall_infra::brand::BrandReferenceLoader;
use salescall_infra::config::{resolve_api_key, validate_config};
use salescall_infra::document::FileDocumentReader;
use salescall_infra::export::docx::DocxExporter;
use salescall_infra::llm::create_provider;
use salescall_infra::speech::create_speech_provider;
use salescall_types::config::AppConfig;

use crate::http::page;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub conversation: Arc<ConversationService>,
    pub sessions: Arc<SessionStore>,
    pub reader: Arc<dyn DocumentReader>,
    pub exporter: Arc<dyn DocumentExporter>,
    /// `None` when `[speech] enabled = false`.
    pub speech: Option<Arc<BoxSpeechProvider>>,
    pub brands: Arc<BrandReferenceLoader>,
    pub templates: Arc<Environment<'static>>,
}

impl AppState {
    /// Validate the config, resolve the credential, and build every service.
    ///
    /// Fails before anything is served when the API key is missing.
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        validate_config(&config)?;
        let api_key = resolve_api_key(&config.provider.api_key_env)?;

        let provider = create_provider(&config.provider, &api_key);
        let speech = create_speech_provider(&config.speech, &config.provider, &api_key);

        Self::from_parts(config, provider, speech)
    }

    /// Wire the state around an already-built completion provider.
    pub fn from_parts(
        config: AppConfig,
        provider: BoxLlmProvider,
        speech: Option<BoxSpeechProvider>,
    ) -> anyhow::Result<Self> {
        let settings = CompletionSettings::from_config(&config.provider, &config.prompt);
        let conversation = ConversationService::new(provider, settings, config.catalog.clone());
        let brands = BrandReferenceLoader::new(&config.server.assets_dir);
        let templates = page::template_env()?;
        let sessions = SessionStore::with_limits(SessionLimits::from_config(&config.server));

        tracing::debug!(
            provider = conversation.provider_name(),
            model = %config.provider.model,
            speech = speech.is_some(),
            "application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            conversation: Arc::new(conversation),
            sessions: Arc::new(sessions),
            reader: Arc::new(FileDocumentReader::new()),
            exporter: Arc::new(DocxExporter::new()),
            speech: speech.map(Arc::new),
            brands: Arc::new(brands),
            templates: Arc::new(templates),
        })
    }
}
