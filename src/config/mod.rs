//! Configuration management for blogop

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default blog backend host
pub const DEFAULT_API_HOST: &str = "http://localhost:8080";

/// REST base path appended to the host
pub const API_BASE_PATH: &str = "/api/v1";

/// File holding persisted session tokens, next to the config file
const SESSION_FILE_NAME: &str = "session.yaml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Blog backend host (scheme + authority)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Grace delay before redirecting to login after a failed token refresh
    #[serde(default = "default_auth_redirect_delay_ms")]
    pub auth_redirect_delay_ms: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_auth_redirect_delay_ms() -> u64 {
    300
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            timeout_secs: default_timeout_secs(),
            auth_redirect_delay_ms: default_auth_redirect_delay_ms(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".blogop").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Path of the session token file belonging to a config file
    pub fn session_path(config_path: &Path) -> PathBuf {
        config_path
            .parent()
            .map(|dir| dir.join(SESSION_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(SESSION_FILE_NAME))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load_from(path) {
            Ok(config) => Ok(config),
            Err(crate::error::Error::Config(ConfigError::NotFound(_))) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Effective API host: CLI/env override, then config file, then default
    pub fn api_host(&self, host_override: Option<&str>) -> String {
        host_override
            .map(str::to_string)
            .or_else(|| self.api_host.clone())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
    }

    /// Full REST base URL for a host
    pub fn base_url(&self, host_override: Option<&str>) -> String {
        format!(
            "{}{}",
            self.api_host(host_override).trim_end_matches('/'),
            API_BASE_PATH
        )
    }

    /// HTTP timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.preferences.timeout_secs)
    }

    /// Auth redirect grace delay as a Duration
    pub fn auth_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.preferences.auth_redirect_delay_ms)
    }
}
