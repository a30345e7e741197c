use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::error::Result;

pub const DEFAULT_SCRAPER_ENDPOINT: &str = "https://app.scrapingbee.com/api/v1";
pub const DEFAULT_API_KEY_ENV: &str = "READEASE_SCRAPER_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Scraping/render proxy, or a server-side mediator that holds the key itself.
    pub endpoint: String,

    /// Name of the environment variable holding the service credential.
    pub api_key_env: String,

    /// Fallback credential when the environment variable is unset.
    pub api_key: Option<String>,

    pub timeout_secs: Option<u64>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SCRAPER_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl ScraperConfig {
    /// Credential lookup: environment first, then the config file value.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub command: String,
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self {
                command: "say".to_string(),
                args: vec!["-f".to_string(), "-".to_string()],
            }
        } else {
            Self {
                command: "espeak-ng".to_string(),
                args: vec!["--stdin".to_string()],
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub ocr: OcrConfig,
    pub speech: SpeechConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load config from `path` (or the default location). A missing file
    /// yields defaults; a malformed one is reported and replaced by defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::get_config_path);

        match fs::read_to_string(&config_path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    debug!("Loaded config from {:?}", config_path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config {:?}: {}. Using defaults.", config_path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("readease");
        path.push("config.toml");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.scraper.endpoint, DEFAULT_SCRAPER_ENDPOINT);
        assert_eq!(config.scraper.api_key, None);
        assert_eq!(config.scraper.timeout_secs, None);
        assert_eq!(config.ocr.command, "tesseract");
        assert_eq!(config.ocr.language, "eng");
        assert!(config.storage.dir.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::parse(
            r#"
            [scraper]
            endpoint = "https://reader.example.org/scrape"

            [ocr]
            language = "deu"
            "#,
        )
        .unwrap();
        assert_eq!(config.scraper.endpoint, "https://reader.example.org/scrape");
        assert_eq!(config.scraper.api_key_env, DEFAULT_API_KEY_ENV);
        assert_eq!(config.ocr.command, "tesseract");
        assert_eq!(config.ocr.language, "deu");
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[scraper\nendpoint = ").unwrap();
        assert_eq!(AppConfig::load(Some(&path)), AppConfig::default());
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert_eq!(AppConfig::load(Some(&path)), AppConfig::default());
    }

    #[test]
    fn test_api_key_falls_back_to_file_value() {
        let scraper = ScraperConfig {
            api_key_env: "READEASE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        assert_eq!(scraper.resolve_api_key().as_deref(), Some("from-file"));

        let blank = ScraperConfig {
            api_key_env: "READEASE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.resolve_api_key(), None);
    }
}
