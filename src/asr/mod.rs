pub mod audio;
pub mod http_recognizer;
pub mod interface;

pub use audio::{AudioBuffer, AudioFormat};
pub use http_recognizer::HttpRecognizer;
pub use interface::SpeechRecognizer;
