use std::path::PathBuf;
use std::time::Duration;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::summarize::{DEFAULT_API_BASE, DEFAULT_MODEL};

pub const DEFAULT_LANG: &str = "en";

/// Upper bound on transcript characters sent to the model
pub const DEFAULT_MAX_INPUT_CHARS: usize = 400_000;

/// Settings from `config.toml`. The API key deliberately has no field here.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub model: Option<String>,
    pub lang: Option<String>,
    pub api_base: Option<String>,
    pub max_input_chars: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub format: Option<String>,
}

impl Config {
    /// Load config from ~/.config/ytblog/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or(DEFAULT_LANG)
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars.unwrap_or(DEFAULT_MAX_INPUT_CHARS)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytblog")
        .join("config.toml")
}
