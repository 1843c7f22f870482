use std::path::Path;

use async_trait::async_trait;

use crate::asr::audio::AudioBuffer;
use crate::error::RecognitionError;

/// Speech recognition backend.
///
/// Every failure mode (unreadable file, network, service rejection,
/// unintelligible speech) is reported as a [`RecognitionError`].
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Load the audio source at `path`.
    async fn open_audio(&self, path: &Path) -> Result<AudioBuffer, RecognitionError> {
        AudioBuffer::open(path).await
    }

    /// Produce a transcript for an opened audio source.
    async fn recognize(&self, audio: &AudioBuffer) -> Result<String, RecognitionError>;
}
