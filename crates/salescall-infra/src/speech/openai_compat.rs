//! Speech over the OpenAI-compatible audio endpoints.
//!
//! - `POST {base}/audio/transcriptions` (multipart: `file`, `model`) -> `{"text": ...}`
//! - `POST {base}/audio/speech` (JSON: `model`, `input`, `voice`, `response_format`) -> audio bytes
//!
//! The API key is held as a [`SecretString`] and only exposed when building
//! the `Authorization` header.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use salescall_core::speech::{SpeechAudio, SpeechProvider};
use salescall_types::config::SpeechConfig;
use salescall_types::error::SpeechError;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

pub struct OpenAiCompatSpeech {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    config: SpeechConfig,
}

impl OpenAiCompatSpeech {
    pub fn new(base_url: String, api_key: SecretString, config: SpeechConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn audio_content_type(&self) -> String {
        match self.config.audio_format.as_str() {
            "mp3" => "audio/mpeg".to_string(),
            "wav" => "audio/wav".to_string(),
            other => format!("audio/{other}"),
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SpeechError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SpeechError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

impl SpeechProvider for OpenAiCompatSpeech {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, SpeechError> {
        let part = Part::bytes(audio).file_name(file_name.to_string());
        let form = Form::new()
            .text("model", self.config.transcription_model.clone())
            .part("file", part);

        let response = self
            .client
            .post(self.url("/audio/transcriptions"))
            .bearer_auth(self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| SpeechError::Request(e.to_string()))?;

        let parsed: TranscriptionResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SpeechError::Deserialization(e.to_string()))?;

        tracing::debug!(chars = parsed.text.len(), "audio transcribed");
        Ok(parsed.text.trim().to_string())
    }

    async fn synthesize(&self, text: &str) -> Result<SpeechAudio, SpeechError> {
        let body = SpeechRequest {
            model: &self.config.speech_model,
            input: text,
            voice: &self.config.voice,
            response_format: &self.config.audio_format,
        };

        let response = self
            .client
            .post(self.url("/audio/speech"))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechError::Request(e.to_string()))?;

        let bytes = Self::check_status(response)
            .await?
            .bytes()
            .await
            .map_err(|e| SpeechError::Request(e.to_string()))?;

        Ok(SpeechAudio {
            bytes: bytes.to_vec(),
            content_type: self.audio_content_type(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speech(format: &str) -> OpenAiCompatSpeech {
        OpenAiCompatSpeech::new(
            "https://api.groq.com/openai/v1/".to_string(),
            SecretString::from("k".to_string()),
            SpeechConfig {
                enabled: true,
                audio_format: format.to_string(),
                ..SpeechConfig::default()
            },
        )
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        assert_eq!(
            speech("wav").url("/audio/speech"),
            "https://api.groq.com/openai/v1/audio/speech"
        );
    }

    #[test]
    fn test_audio_content_type() {
        assert_eq!(speech("wav").audio_content_type(), "audio/wav");
        assert_eq!(speech("mp3").audio_content_type(), "audio/mpeg");
        assert_eq!(speech("ogg").audio_content_type(), "audio/ogg");
    }

    #[test]
    fn test_speech_request_shape() {
        let body = SpeechRequest {
            model: "playai-tts",
            input: "Hello doctor",
            voice: "Fritz-PlayAI",
            response_format: "wav",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["input"], "Hello doctor");
        assert_eq!(json["response_format"], "wav");
    }
}
