//! CLI configuration
//!
//! Loaded from `<config-dir>/eboutic/config.toml`. Every field has a
//! default, so a missing file is not an error; a malformed one is.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_COOKIE_MAX_AGE_SECS: u64 = 3600;

/// Error loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL for remote basket calls.
    pub base_url: String,
    /// Where the file-backed cookie jar lives.
    pub cookie_file: PathBuf,
    /// Max-Age applied to the basket cookies, in seconds.
    pub cookie_max_age: u64,
}

#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    base_url: Option<String>,
    cookie_file: Option<PathBuf>,
    cookie_max_age: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_file: config_dir().join("cookies.json"),
            cookie_max_age: DEFAULT_COOKIE_MAX_AGE_SECS,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_dir().join("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let parsed: TomlConfig = toml::from_str(&contents)?;

        let mut config = Self::default();
        if let Some(base_url) = parsed.base_url {
            config.base_url = base_url;
        }
        if let Some(cookie_file) = parsed.cookie_file {
            config.cookie_file = cookie_file;
        }
        if let Some(cookie_max_age) = parsed.cookie_max_age {
            config.cookie_max_age = cookie_max_age;
        }
        Ok(config)
    }
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eboutic")
}
