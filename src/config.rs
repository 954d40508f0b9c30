/// Startup configuration
///
/// The API key is resolved once at startup: the GEMINI_API_KEY environment
/// variable wins, then config.json in the user config directory. A missing
/// key is deliberately NOT fatal here; the first analysis attempt reports
/// it instead.

use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::gemini::prompt::MODEL_ID;

/// Process configuration injected into the Gemini client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key; None until the user configures one
    pub api_key: Option<String>,
    /// Model identifier for generateContent calls
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    MODEL_ID.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            model: default_model(),
        }
    }
}

impl Config {
    /// Load configuration from the environment, then the config file
    pub fn load() -> Self {
        let mut config = Self::load_file().unwrap_or_default();

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                config.api_key = Some(key.trim().to_string());
            }
        }

        if config.api_key.is_some() {
            info!("🔑 Gemini API key configured (model: {})", config.model);
        } else {
            warn!("no Gemini API key found; analysis will fail until one is set");
        }

        config
    }

    /// Parse the on-disk config, tolerating its absence
    fn load_file() -> Option<Self> {
        let path = Self::config_path();
        let contents = std::fs::read_to_string(&path).ok()?;
        match Self::from_json(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("ignoring malformed config at {}: {}", path.display(), e);
                None
            }
        }
    }

    fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Where config.json lives
    ///
    /// - Linux: ~/.config/face-scan/config.json
    /// - macOS: ~/Library/Application Support/face-scan/config.json
    /// - Windows: %APPDATA%\face-scan\config.json
    pub fn config_path() -> PathBuf {
        let mut path = dirs_next::config_dir()
            .or_else(dirs_next::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("face-scan");
        path.push("config.json");
        path
    }
}
