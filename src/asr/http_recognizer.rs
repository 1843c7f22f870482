use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::asr::audio::AudioBuffer;
use crate::asr::interface::SpeechRecognizer;
use crate::config::RecognitionConfig;
use crate::error::RecognitionError;

const MAX_ERROR_BODY: usize = 500;

/// Recognizer backed by an OpenAI-compatible `/audio/transcriptions` endpoint.
pub struct HttpRecognizer {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl HttpRecognizer {
    pub fn new(config: &RecognitionConfig) -> Result<Self, RecognitionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            model: config.model.clone(),
            language: config.language.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url)
    }
}

impl std::fmt::Debug for HttpRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRecognizer")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SpeechRecognizer for HttpRecognizer {
    async fn recognize(&self, audio: &AudioBuffer) -> Result<String, RecognitionError> {
        let part = reqwest::multipart::Part::bytes(audio.data.clone())
            .file_name(audio.file_name())
            .mime_str(audio.format.mime_type())?;

        let mut form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "json")
            .part("file", part);
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        // Local whisper servers usually run without a key
        let mut request = self.client.post(self.endpoint()).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!(
            "Sending {} bytes of {} audio to {}",
            audio.data.len(),
            audio.format,
            self.base_url
        );
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            // Error bodies can be long localized messages; keep a prefix, cut on a char boundary.
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();
            return Err(RecognitionError::Service { status, body });
        }

        let parsed: TranscriptionResponse = response.json().await?;
        let text = parsed.text.trim();
        if text.is_empty() {
            return Err(RecognitionError::Unintelligible);
        }
        Ok(text.to_string())
    }
}
