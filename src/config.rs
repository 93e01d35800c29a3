//! Configuration management for the resume ranker

use crate::error::{RankerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

pub const MIN_MAX_TOKENS: u32 = 256;
pub const MAX_MAX_TOKENS: u32 = 4096;
pub const MAX_TOKENS_STEP: u32 = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelSettings,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    pub name: String,
    pub endpoint: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Whole-request timeout for the HTTP client; unset means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub enable_cache: bool,
    /// Record unreadable PDFs as error rows instead of aborting the batch
    pub skip_unreadable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelSettings {
                name: DEFAULT_MODEL.to_string(),
                endpoint: DEFAULT_ENDPOINT.to_string(),
                temperature: DEFAULT_TEMPERATURE,
                max_tokens: DEFAULT_MAX_TOKENS,
                request_timeout_secs: None,
            },
            processing: ProcessingConfig {
                enable_cache: true,
                skip_unreadable: false,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: true,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| RankerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        validate_temperature(self.model.temperature)?;
        validate_max_tokens(self.model.max_tokens)?;
        if self.model.name.trim().is_empty() {
            return Err(RankerError::Configuration("Model name must not be empty".to_string()));
        }
        Ok(())
    }
}

pub fn validate_temperature(temperature: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&temperature) {
        return Err(RankerError::Configuration(format!(
            "Temperature must be between 0.0 and 1.0, got {}",
            temperature
        )));
    }
    Ok(())
}

pub fn validate_max_tokens(max_tokens: u32) -> Result<()> {
    if !(MIN_MAX_TOKENS..=MAX_MAX_TOKENS).contains(&max_tokens) || max_tokens % MAX_TOKENS_STEP != 0 {
        return Err(RankerError::Configuration(format!(
            "Max tokens must be a multiple of {} between {} and {}, got {}",
            MAX_TOKENS_STEP, MIN_MAX_TOKENS, MAX_MAX_TOKENS, max_tokens
        )));
    }
    Ok(())
}
