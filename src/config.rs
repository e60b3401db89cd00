//! Top-level application configuration.
//!
//! Configuration is stored in `.mailform/config.yaml` and includes:
//! - The user directory endpoint
//! - Directory request timeout and the cosmetic loading delay

use std::env;
use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MailformError, Result};
use crate::paths;

/// Environment variable that overrides `directory.url`
pub const API_URL_ENV: &str = "MAILFORM_API_URL";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// User directory settings
    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// User directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Base URL of the users endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Artificial delay before a fetch resolves, in milliseconds (default: 0)
    #[serde(default)]
    pub fetch_delay_ms: u64,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_directory_timeout")]
    pub timeout: u64,
}

fn default_directory_timeout() -> u64 {
    30
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            url: None,
            fetch_delay_ms: 0,
            timeout: default_directory_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = paths::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            MailformError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = paths::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MailformError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            MailformError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions)?;
        }

        Ok(())
    }

    /// Get the directory URL from the environment or the config file
    pub fn directory_url(&self) -> Option<String> {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.is_empty()
        {
            return Some(url);
        }

        self.directory.url.clone()
    }

    /// Request timeout for directory fetches
    pub fn directory_timeout(&self) -> Duration {
        Duration::from_secs(self.directory.timeout)
    }

    /// Cosmetic delay applied before a fetch resolves
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.directory.fetch_delay_ms)
    }
}
