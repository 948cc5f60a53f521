//! Conversation service: one user turn in, at most one assistant reply out.
//!
//! A turn appends the user message first and then calls the completion
//! provider exactly once. On provider failure the user message stays and no
//! assistant message is added, so the transcript grows by one instead of two.

use std::time::Instant;

use tracing::{Instrument, info_span, warn};

use salescall_types::chat::{Message, ReferenceDocument, Role, Transcript};
use salescall_types::config::{PromptConfig, ProviderConfig};
use salescall_types::error::TurnError;
use salescall_types::llm::{CompletionRequest, LlmMessage, Usage};
use salescall_types::selection::{OptionCatalog, Selection};

use crate::llm::box_provider::BoxLlmProvider;
use crate::prompt::InstructionBuilder;

/// Completion parameters applied to every turn.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub system_preamble: String,
    pub reference_excerpt_chars: usize,
}

impl CompletionSettings {
    pub fn from_config(provider: &ProviderConfig, prompt: &PromptConfig) -> Self {
        Self {
            model: provider.model.clone(),
            temperature: provider.temperature,
            max_tokens: provider.max_tokens,
            system_preamble: prompt.system_preamble.clone(),
            reference_excerpt_chars: prompt.reference_excerpt_chars,
        }
    }
}

/// Inputs read fresh from the form on every submission.
#[derive(Debug, Clone, Copy)]
pub struct TurnInput<'a> {
    pub selection: &'a Selection,
    pub user_text: &'a str,
    pub reference: Option<&'a ReferenceDocument>,
}

/// What a successful submission did to the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input; nothing appended, no call made.
    Ignored,
    /// User message and assistant reply appended.
    Replied { usage: Usage, response_ms: u64 },
}

/// Assembles instructions and appends turns to a transcript.
pub struct ConversationService {
    provider: BoxLlmProvider,
    settings: CompletionSettings,
    catalog: OptionCatalog,
}

impl ConversationService {
    pub fn new(provider: BoxLlmProvider, settings: CompletionSettings, catalog: OptionCatalog) -> Self {
        Self {
            provider,
            settings,
            catalog,
        }
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Build the completion request for one turn without sending it.
    pub fn build_request(&self, input: &TurnInput<'_>) -> CompletionRequest {
        let instruction = InstructionBuilder::new(self.settings.reference_excerpt_chars).build(
            input.selection,
            input.user_text,
            input.reference,
        );

        CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                LlmMessage::system(self.settings.system_preamble.clone()),
                LlmMessage::user(instruction),
            ],
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.temperature),
        }
    }

    /// Submit one turn.
    ///
    /// - Blank text: returns `Ignored` and leaves the transcript untouched.
    /// - Selection outside the catalog: returns an error, nothing appended.
    /// - Provider failure: the user message is kept, the error is returned.
    pub async fn submit_turn(
        &self,
        transcript: &mut Transcript,
        input: TurnInput<'_>,
    ) -> Result<TurnOutcome, TurnError> {
        if input.user_text.trim().is_empty() {
            return Ok(TurnOutcome::Ignored);
        }

        self.catalog.validate(input.selection)?;

        transcript.push(Message::new(Role::User, input.user_text));

        let request = self.build_request(&input);
        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
        );

        let start = Instant::now();
        let response = match self.provider.complete(&request).instrument(span).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, provider = self.provider.name(), "completion failed, turn dropped");
                return Err(err.into());
            }
        };
        let response_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            response_id = %response.id,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            response_ms,
            "completion received"
        );

        transcript.push(Message::new(Role::Assistant, response.content));

        Ok(TurnOutcome::Replied {
            usage: response.usage,
            response_ms,
        })
    }
}
