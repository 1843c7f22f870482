use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub recognition: RecognitionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Parent directory for per-request upload directories. System temp dir when unset.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            temp_dir: None,
        }
    }
}

/// OpenAI-compatible transcription endpoint settings
#[derive(Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "whisper-1".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            language: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for RecognitionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognitionConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("language", &self.language)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from a YAML or JSON file, picked by extension.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        // Editors on Windows like to prepend a BOM
        let bytes = fs::read(path)?;
        let (text, _) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
        let content = substitute_env_vars(&text);

        // Determine file type by extension, YAML otherwise
        let path_lower = path.to_string_lossy().to_lowercase();
        let config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Candidate config file locations, in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        let mut paths: Vec<PathBuf> = std::env::var_os("CONFIG_PATH")
            .map(PathBuf::from)
            .into_iter()
            .collect();
        paths.push(PathBuf::from("conf.yaml"));
        paths.push(PathBuf::from("conf.json"));
        if let Some(dir) = exe_dir {
            paths.push(dir.join("conf.yaml"));
            paths.push(dir.join("conf.json"));
        }
        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }
        if self.server.max_upload_bytes == 0 {
            anyhow::bail!("server.max_upload_bytes must be greater than zero");
        }
        if self.recognition.base_url.trim().is_empty() {
            anyhow::bail!("recognition.base_url must not be empty");
        }
        if self.recognition.timeout_secs == 0 {
            anyhow::bail!("recognition.timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

/// Replace `${VAR_NAME}` with the environment value, leaving unknown variables untouched.
fn substitute_env_vars(content: &str) -> String {
    let pattern = match Regex::new(r"\$\{(\w+)\}") {
        Ok(p) => p,
        Err(_) => return content.to_string(),
    };
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.recognition.model, "whisper-1");
    }

    #[test]
    fn load_yaml_with_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.yaml");
        fs::write(
            &path,
            "server:\n  port: 8080\nrecognition:\n  model: whisper-large\n  language: en\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.recognition.model, "whisper-large");
        assert_eq!(config.recognition.language.as_deref(), Some("en"));
        assert_eq!(config.recognition.timeout_secs, 60);
    }

    #[test]
    fn load_json_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.json");
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(br#"{"server": {"max_upload_bytes": 1024}}"#);
        fs::write(&path, bytes).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.max_upload_bytes, 1024);
    }

    #[test]
    fn env_placeholders_are_substituted() {
        std::env::set_var("TRANSCRIBE_WEB_TEST_KEY", "sk-from-env");
        let out = substitute_env_vars("api_key: ${TRANSCRIBE_WEB_TEST_KEY}\nother: ${TRANSCRIBE_WEB_UNSET_VAR}");
        assert_eq!(
            out,
            "api_key: sk-from-env\nother: ${TRANSCRIBE_WEB_UNSET_VAR}"
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.yaml");
        fs::write(&path, "recognition:\n  timeout_secs: 0\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load(Path::new("/nonexistent/conf.yaml")).is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = RecognitionConfig {
            api_key: Some("sk-secret".to_string()),
            ..RecognitionConfig::default()
        };
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
