use std::path::Path;

use tracing::{info, warn};

use crate::asr::SpeechRecognizer;
use crate::error::RecognitionError;

/// Outcome of one recognition attempt, shown to the user either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionResult {
    Transcript(String),
    Failed(String),
}

impl TranscriptionResult {
    pub fn display_text(&self) -> String {
        match self {
            TranscriptionResult::Transcript(text) => text.clone(),
            TranscriptionResult::Failed(message) => {
                format!("Error transcribing audio: {}", message)
            }
        }
    }
}

impl From<Result<String, RecognitionError>> for TranscriptionResult {
    fn from(result: Result<String, RecognitionError>) -> Self {
        match result {
            Ok(text) => TranscriptionResult::Transcript(text),
            Err(e) => TranscriptionResult::Failed(e.to_string()),
        }
    }
}

/// Open the audio at `path` and run it through the recognizer.
pub async fn transcribe_file(recognizer: &dyn SpeechRecognizer, path: &Path) -> TranscriptionResult {
    let result = recognize_path(recognizer, path).await;

    match &result {
        Ok(text) => info!("Transcribed {} characters", text.len()),
        Err(e) => warn!("Transcription failed: {}", e),
    }
    result.into()
}

async fn recognize_path(
    recognizer: &dyn SpeechRecognizer,
    path: &Path,
) -> Result<String, RecognitionError> {
    let audio = recognizer.open_audio(path).await?;
    recognizer.recognize(&audio).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_text_has_prefix() {
        let outcome: Result<String, RecognitionError> =
            Err(RecognitionError::Network("connection refused".to_string()));
        let result = TranscriptionResult::from(outcome);
        assert_eq!(
            result.display_text(),
            "Error transcribing audio: recognition service unreachable: connection refused"
        );
    }

    #[test]
    fn transcript_is_shown_verbatim() {
        let outcome: Result<String, RecognitionError> = Ok("hello there".to_string());
        let result = TranscriptionResult::from(outcome);
        assert_eq!(result, TranscriptionResult::Transcript("hello there".to_string()));
        assert_eq!(result.display_text(), "hello there");
    }
}
