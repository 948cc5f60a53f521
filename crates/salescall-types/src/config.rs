//! Configuration types.
//!
//! `AppConfig` mirrors `config.toml`. Every field has a default, so an
//! empty or missing file yields a working Groq-backed configuration.

use serde::{Deserialize, Serialize};

use crate::selection::OptionCatalog;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub catalog: OptionCatalog,
}

/// HTTP listener and asset location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory that brand reference documents are resolved against.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Largest accepted turn form body, uploads included.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Sessions untouched for this long are dropped.
    #[serde(default = "default_session_idle_minutes")]
    pub session_idle_minutes: u64,
    /// Upper bound on live sessions; the least recently used one goes first.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_assets_dir() -> String {
    ".".to_string()
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_session_idle_minutes() -> u64 {
    60
}

fn default_max_sessions() -> usize {
    256
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            assets_dir: default_assets_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            session_idle_minutes: default_session_idle_minutes(),
            max_sessions: default_max_sessions(),
        }
    }
}

/// Hosted chat-completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name used in logs (e.g. "groq", "openai").
    #[serde(default = "default_provider_name")]
    pub name: String,
    /// Override the provider's base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_provider_name() -> String {
    "groq".to_string()
}

fn default_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            base_url: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Instruction template knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_system_preamble")]
    pub system_preamble: String,
    /// How many characters of the reference document go into the instruction.
    #[serde(default = "default_reference_excerpt_chars")]
    pub reference_excerpt_chars: usize,
}

fn default_system_preamble() -> String {
    "You are a helpful sales assistant chatbot. You coach pharmaceutical sales \
     representatives on how to talk to healthcare professionals, staying accurate \
     to the approved product information."
        .to_string()
}

fn default_reference_excerpt_chars() -> usize {
    500
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_preamble: default_system_preamble(),
            reference_excerpt_chars: default_reference_excerpt_chars(),
        }
    }
}

/// Optional speech-to-text / text-to-speech collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Defaults to the completion provider's base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Audio container requested from the speech endpoint ("wav", "mp3").
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
}

fn default_transcription_model() -> String {
    "whisper-large-v3".to_string()
}

fn default_speech_model() -> String {
    "playai-tts".to_string()
}

fn default_voice() -> String {
    "Fritz-PlayAI".to_string()
}

fn default_audio_format() -> String {
    "wav".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: None,
            transcription_model: default_transcription_model(),
            speech_model: default_speech_model(),
            voice: default_voice(),
            audio_format: default_audio_format(),
        }
    }
}
