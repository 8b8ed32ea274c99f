//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `suggestions.api_key`
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            model: "gemini-2.0-flash-lite".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl SuggestionConfig {
    /// The configured API key, if it is non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Whether the live text-generation service can be used
    pub fn is_configured(&self) -> bool {
        self.enabled && self.api_key().is_some()
    }
}

impl Config {
    /// Load the configuration from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let config = if config_path.exists() {
            Self::read(&config_path)?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };

        Ok(config.with_env_overrides())
    }

    /// Load the configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScreenerError::Configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }

        Ok(Self::read(path)?.with_env_overrides())
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Apply `GEMINI_API_KEY` from the environment when it is set and non-empty
    pub fn with_env_overrides(self) -> Self {
        let key = std::env::var(API_KEY_ENV).ok();
        self.with_api_key_override(key)
    }

    fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.suggestions.api_key = Some(key);
        }
        self
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_unconfigured() {
        let config = Config::default();

        assert!(config.suggestions.enabled);
        assert!(!config.suggestions.is_configured());
        assert_eq!(config.suggestions.timeout_secs, 30);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_blank_api_key_is_unconfigured() {
        let mut config = Config::default();
        config.suggestions.api_key = Some("   ".to_string());

        assert!(config.suggestions.api_key().is_none());
        assert!(!config.suggestions.is_configured());
    }

    #[test]
    fn test_disabled_suggestions_ignore_key() {
        let mut config = Config::default();
        config.suggestions.api_key = Some("secret".to_string());
        config.suggestions.enabled = false;

        assert!(!config.suggestions.is_configured());
    }

    #[test]
    fn test_api_key_override() {
        let config = Config::default().with_api_key_override(Some("from-env".to_string()));
        assert_eq!(config.suggestions.api_key(), Some("from-env"));

        let config = Config::default().with_api_key_override(Some(String::new()));
        assert!(config.suggestions.api_key().is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [suggestions]
            model = "gemini-pro"

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.suggestions.model, "gemini-pro");
        assert_eq!(config.suggestions.timeout_secs, 30);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.color_output);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.suggestions.timeout_secs = 5;
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let reloaded = Config::from_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reloaded.suggestions.timeout_secs, 5);
        assert_eq!(reloaded.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ScreenerError::Configuration(_))));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Config::from_toml("suggestions = 3").is_err());
    }
}
