//! Speech collaborator port and its boxed wrapper.
//!
//! Same blanket-impl pattern as [`crate::llm::box_provider`]: an RPITIT
//! trait for implementations and an object-safe box for runtime selection.

use std::future::Future;
use std::pin::Pin;

use salescall_types::error::SpeechError;

/// Audio bytes plus their MIME type.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Speech-to-text and text-to-speech backend.
pub trait SpeechProvider: Send + Sync {
    /// Turn a recorded clip into text.
    fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
    ) -> impl Future<Output = Result<String, SpeechError>> + Send;

    /// Turn reply text into playable audio.
    fn synthesize(&self, text: &str) -> impl Future<Output = Result<SpeechAudio, SpeechError>> + Send;
}

pub trait SpeechProviderDyn: Send + Sync {
    fn transcribe_boxed<'a>(
        &'a self,
        audio: Vec<u8>,
        file_name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, SpeechError>> + Send + 'a>>;

    fn synthesize_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<SpeechAudio, SpeechError>> + Send + 'a>>;
}

impl<T: SpeechProvider> SpeechProviderDyn for T {
    fn transcribe_boxed<'a>(
        &'a self,
        audio: Vec<u8>,
        file_name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, SpeechError>> + Send + 'a>> {
        Box::pin(self.transcribe(audio, file_name))
    }

    fn synthesize_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<SpeechAudio, SpeechError>> + Send + 'a>> {
        Box::pin(self.synthesize(text))
    }
}

/// Type-erased speech backend.
pub struct BoxSpeechProvider {
    inner: Box<dyn SpeechProviderDyn + Send + Sync>,
}

impl BoxSpeechProvider {
    pub fn new<T: SpeechProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, SpeechError> {
        self.inner.transcribe_boxed(audio, file_name).await
    }

    pub async fn synthesize(&self, text: &str) -> Result<SpeechAudio, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::NothingToSpeak);
        }
        self.inner.synthesize_boxed(text).await
    }
}
