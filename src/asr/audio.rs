use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::RecognitionError;

/// Audio container formats the recognizer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Aiff,
    Aifc,
    Flac,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 4] = [
        AudioFormat::Wav,
        AudioFormat::Aiff,
        AudioFormat::Aifc,
        AudioFormat::Flac,
    ];

    /// Match a lowercase file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "wav" => Some(AudioFormat::Wav),
            "aiff" => Some(AudioFormat::Aiff),
            "aifc" => Some(AudioFormat::Aifc),
            "flac" => Some(AudioFormat::Flac),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Aiff => "aiff",
            AudioFormat::Aifc => "aifc",
            AudioFormat::Flac => "flac",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Aiff | AudioFormat::Aifc => "audio/aiff",
            AudioFormat::Flac => "audio/flac",
        }
    }

    /// Identify the container from its leading bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.len() >= 4 && &data[..4] == b"fLaC" {
            return Some(AudioFormat::Flac);
        }
        if data.len() < 12 {
            return None;
        }
        match (&data[..4], &data[8..12]) {
            (b"RIFF", b"WAVE") => Some(AudioFormat::Wav),
            (b"FORM", b"AIFF") => Some(AudioFormat::Aiff),
            (b"FORM", b"AIFC") => Some(AudioFormat::Aifc),
            _ => None,
        }
    }

    /// Human readable list used in rejection messages, e.g. "WAV, AIFF, AIFC, or FLAC".
    pub fn allowed_list() -> String {
        let names: Vec<String> = Self::ALL
            .iter()
            .map(|f| f.extension().to_uppercase())
            .collect();
        match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An audio file loaded from disk, ready to hand to a recognizer.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub path: PathBuf,
    pub format: AudioFormat,
    pub data: Vec<u8>,
}

impl AudioBuffer {
    /// Read the file at `path` and check that its content is a supported container.
    pub async fn open(path: &Path) -> Result<Self, RecognitionError> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            RecognitionError::Decode(format!("could not read {}: {}", path.display(), e))
        })?;

        if data.is_empty() {
            return Err(RecognitionError::Decode("audio file is empty".to_string()));
        }

        let format = AudioFormat::sniff(&data).ok_or_else(|| {
            RecognitionError::Decode(format!(
                "file content is not a {} audio stream",
                AudioFormat::allowed_list()
            ))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            format,
            data,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("audio.{}", self.format))
    }
}

#[cfg(test)]
pub(crate) fn wav_bytes(payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(12 + payload.len());
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&((4 + payload.len()) as u32).to_le_bytes());
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(payload);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_recognizes_supported_containers() {
        assert_eq!(AudioFormat::sniff(&wav_bytes(b"data")), Some(AudioFormat::Wav));
        assert_eq!(AudioFormat::sniff(b"FORM\0\0\0\x04AIFF"), Some(AudioFormat::Aiff));
        assert_eq!(AudioFormat::sniff(b"FORM\0\0\0\x04AIFC"), Some(AudioFormat::Aifc));
        assert_eq!(AudioFormat::sniff(b"fLaC\0\0\0\x22"), Some(AudioFormat::Flac));
    }

    #[test]
    fn sniff_rejects_other_content() {
        assert_eq!(AudioFormat::sniff(b""), None);
        assert_eq!(AudioFormat::sniff(b"ID3\x03\0\0\0\0\0\0\0\0"), None);
        assert_eq!(AudioFormat::sniff(b"RIFF\0\0\0\0AVI "), None);
    }

    #[test]
    fn allowed_list_names_every_format() {
        assert_eq!(AudioFormat::allowed_list(), "WAV, AIFF, AIFC, or FLAC");
    }

    #[test]
    fn extension_lookup_is_exact() {
        assert_eq!(AudioFormat::from_extension("flac"), Some(AudioFormat::Flac));
        assert_eq!(AudioFormat::from_extension("mp3"), None);
        assert_eq!(AudioFormat::from_extension("WAV"), None);
    }

    #[tokio::test]
    async fn open_reads_and_sniffs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        std::fs::write(&path, wav_bytes(b"hello")).unwrap();

        let audio = AudioBuffer::open(&path).await.unwrap();
        assert_eq!(audio.format, AudioFormat::Wav);
        assert_eq!(audio.file_name(), "clip.wav");
    }

    #[tokio::test]
    async fn open_rejects_renamed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.wav");
        std::fs::write(&path, b"just some text, not audio").unwrap();

        let err = AudioBuffer::open(&path).await.unwrap_err();
        assert!(matches!(err, RecognitionError::Decode(_)));
    }

    #[tokio::test]
    async fn open_missing_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AudioBuffer::open(&dir.path().join("gone.flac")).await.unwrap_err();
        assert!(err.to_string().contains("could not read"));
    }
}
