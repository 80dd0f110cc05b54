//! Configuration management for the job matcher

use crate::error::{JobMatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub search: SearchConfig,
    pub job_source: JobSourceConfig,
    pub embedding: EmbeddingConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_location: String,
    pub default_keywords: String,
    pub max_jobs: usize,
    pub top_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSourceConfig {
    /// Two-letter country code used in the Adzuna search URL.
    pub country: String,
    /// Credentials fall back to ADZUNA_APP_ID / ADZUNA_API_KEY when unset.
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub results_per_page: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub batch_size: usize,
    pub max_retries: usize,
    /// Inputs longer than this many words are truncated before embedding.
    pub max_input_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub remove_stop_words: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub results_dir: PathBuf,
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                default_location: "St. Louis, MO".to_string(),
                default_keywords: "software engineer".to_string(),
                max_jobs: 50,
                top_n: 10,
            },
            job_source: JobSourceConfig {
                country: "us".to_string(),
                app_id: None,
                app_key: None,
                results_per_page: 50,
            },
            embedding: EmbeddingConfig {
                model: "text-embedding-3-small".to_string(),
                api_key_env: "OPENAI_API_KEY".to_string(),
                batch_size: 20,
                max_retries: 3,
                max_input_words: 8000,
            },
            processing: ProcessingConfig {
                remove_stop_words: false,
            },
            output: OutputConfig {
                results_dir: PathBuf::from("results"),
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default config path, creating it with defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load from an explicit path; the file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            JobMatcherError::Configuration(format!("Failed to parse config: {}", e))
        })?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            JobMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-matcher")
            .join("config.toml")
    }
}
