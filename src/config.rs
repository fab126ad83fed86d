// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for answerbank
//!
//! Loads configuration from .answerbankrc.toml in current directory or ~/.config/answerbank/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::confidence::DEFAULT_CONFIDENCE_THRESHOLD;
use crate::matching::FieldTypeRules;
use crate::store::{DEFAULT_PROBABLE_LIMIT, DEFAULT_STORE_NAME};

/// File name of the per-directory configuration.
pub const LOCAL_CONFIG_FILE: &str = ".answerbankrc.toml";

/// Output format for results (mirrored from cli for library use)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration loaded from .answerbankrc.toml or ~/.config/answerbank/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the stored answers
    pub store_path: Option<PathBuf>,
    /// Key the answers are stored under inside the file
    pub store_name: Option<String>,
    /// Default output format (text or json)
    pub default_format: Option<String>,
    /// Number of results returned by `probable`
    pub probable_limit: Option<usize>,
    /// Confidence below which a suggestion is needed
    pub confidence_threshold: Option<f64>,
    /// Extra groups of interchangeable field types
    pub field_type_groups: Vec<Vec<String>>,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .answerbankrc.toml in current directory
    /// 2. ~/.config/answerbank/config.toml
    pub fn load() -> Self {
        // Try current directory first
        if let Some(config) = Self::load_from_path(Path::new(LOCAL_CONFIG_FILE)) {
            return config;
        }

        // Try home directory config
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".config").join("answerbank").join("config.toml");
            if let Some(config) = Self::load_from_path(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    pub fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded configuration");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse configuration");
                None
            }
        }
    }

    /// Get output format from config, parsing the string to ConfigOutputFormat
    pub fn output_format(&self) -> Option<ConfigOutputFormat> {
        self.default_format.as_ref().and_then(|s| match s.to_lowercase().as_str() {
            "json" => Some(ConfigOutputFormat::Json),
            "text" => Some(ConfigOutputFormat::Text),
            _ => None,
        })
    }

    /// Merge CLI options with config (CLI wins)
    pub fn merge_store_path(&self, cli_value: Option<PathBuf>) -> PathBuf {
        cli_value
            .or_else(|| self.store_path.clone())
            .unwrap_or_else(default_store_path)
    }

    pub fn merge_store_name(&self, cli_value: Option<String>) -> String {
        cli_value
            .or_else(|| self.store_name.clone())
            .unwrap_or_else(|| DEFAULT_STORE_NAME.to_string())
    }

    pub fn merge_probable_limit(&self, cli_value: Option<usize>) -> usize {
        cli_value
            .or(self.probable_limit)
            .unwrap_or(DEFAULT_PROBABLE_LIMIT)
    }

    pub fn merge_confidence_threshold(&self, cli_value: Option<f64>) -> f64 {
        cli_value
            .or(self.confidence_threshold)
            .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD)
    }

    pub fn field_type_rules(&self) -> FieldTypeRules {
        FieldTypeRules::with_extra_groups(&self.field_type_groups)
    }
}

/// `<data dir>/answerbank/answers.json`, or `answers.json` in the current
/// directory when the platform has no data directory.
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("answerbank"))
        .unwrap_or_default()
        .join("answers.json")
}
