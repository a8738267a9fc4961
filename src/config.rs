//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Assistant backend connection
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Unset means requests wait as long as the backend takes
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            request_timeout_secs: None,
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Name used in the dashboard greeting
    #[serde(default = "default_user_name")]
    pub user_name: String,
}

fn default_user_name() -> String {
    "User".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Result of searching the default config locations
#[derive(Debug)]
pub struct Discovered {
    pub config: Config,
    /// File the config came from; `None` for defaults
    pub source: Option<PathBuf>,
    /// Files that exist but could not be loaded
    pub skipped: Vec<ConfigError>,
}

impl Discovered {
    /// Log where the config came from. Call once logging is up.
    pub fn report(&self) {
        for error in &self.skipped {
            tracing::warn!("Ignoring config file: {}", error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("aide").join("config.toml"))
    }

    /// Files searched by [`Config::load_default`], in order
    pub fn search_paths() -> Vec<PathBuf> {
        Self::default_path()
            .into_iter()
            .chain(std::iter::once(PathBuf::from("./config.toml")))
            .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> Discovered {
        Self::load_first(&Self::search_paths())
    }

    /// Load the first of `paths` that exists and parses, falling back to
    /// defaults with environment overrides. Files that exist but fail to
    /// load are reported in [`Discovered::skipped`].
    ///
    /// Nothing is logged here: this runs before logging is configured.
    pub fn load_first(paths: &[PathBuf]) -> Discovered {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return Discovered {
                        config,
                        source: Some(path.clone()),
                        skipped,
                    }
                }
                Err(e) => skipped.push(e),
            }
        }

        Discovered {
            config: Self::from_env(),
            source: None,
            skipped,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("AIDE_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Ok(timeout) = std::env::var("AIDE_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.backend.request_timeout_secs = Some(secs);
            }
        }

        if let Ok(name) = std::env::var("AIDE_USER_NAME") {
            self.ui.user_name = name;
        }

        if let Ok(level) = std::env::var("AIDE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("AIDE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Aide Configuration
#
# Environment variables override these settings:
# - AIDE_BACKEND_URL
# - AIDE_REQUEST_TIMEOUT_SECS
# - AIDE_USER_NAME
# - AIDE_LOG_LEVEL
# - AIDE_LOG_FORMAT

[backend]
# Base URL of the assistant backend
url = "http://127.0.0.1:5000"

# Request timeout in seconds (omit to wait indefinitely)
# request_timeout_secs = 30

[ui]
# Name used in the dashboard greeting
user_name = "User"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
