use std::sync::Arc;

use crate::asr::{HttpRecognizer, SpeechRecognizer};
use crate::config::Config;
use crate::render::{HtmlPage, PageRenderer};
use crate::upload::{UploadStore, AUDIO_FIELD};

/// Per-process handler state, built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub recognizer: Arc<dyn SpeechRecognizer>,
    pub renderer: Arc<dyn PageRenderer>,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let recognizer = Arc::new(HttpRecognizer::new(&config.recognition)?);
        Ok(Self::with_recognizer(config, recognizer))
    }

    pub fn with_recognizer(config: Config, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        let uploads = UploadStore::new(config.server.temp_dir.clone());
        Self {
            config,
            recognizer,
            renderer: Arc::new(HtmlPage::new(AUDIO_FIELD)),
            uploads,
        }
    }
}
