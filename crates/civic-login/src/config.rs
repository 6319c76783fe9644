//! Login flow configuration
//!
//! Every threshold of the prototype (attempt limits, countdown lengths,
//! simulated latencies and the placeholder credentials) is a setting here
//! rather than a constant in the flow.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::token_input::TOKEN_LENGTH;

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "civic-login";

/// Placeholder credentials accepted by the stub authenticators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoCredentials {
    pub username: String,
    pub password: String,
    /// The one token that verifies successfully
    pub token: String,
    /// Sentinel token that always reports as expired
    pub expired_token: String,
}

impl Default for DemoCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "12345".to_string(),
            token: "123456".to_string(),
            expired_token: "999999".to_string(),
        }
    }
}

/// Settings for the whole login flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Failed password attempts before the account reports `locked`
    pub max_password_attempts: u32,
    /// Failed token attempts before every check reports "too many attempts"
    pub max_token_attempts: u32,
    /// Seconds before a new token may be requested
    pub resend_cooldown_secs: u32,
    /// Seconds a token stays valid once issued
    pub token_expiry_secs: u32,
    /// Countdown tick period in milliseconds
    pub tick_ms: u64,
    /// Simulated latency of the password check
    pub credential_delay_ms: u64,
    /// Simulated latency of the token check
    pub token_delay_ms: u64,
    /// Simulated latency of a resend
    pub resend_delay_ms: u64,
    /// Delay between a successful login and the flow reset
    pub success_reset_ms: u64,
    /// Default toast lifetime, 0 keeps toasts until dismissed
    pub notification_duration_ms: u64,
    pub min_username_len: usize,
    pub min_password_len: usize,
    pub demo: DemoCredentials,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            max_password_attempts: 5,
            max_token_attempts: 5,
            resend_cooldown_secs: 30,
            token_expiry_secs: 60,
            tick_ms: 1000,
            credential_delay_ms: 800,
            token_delay_ms: 600,
            resend_delay_ms: 500,
            success_reset_ms: 2000,
            notification_duration_ms: 4000,
            min_username_len: 3,
            min_password_len: 5,
            demo: DemoCredentials::default(),
        }
    }
}

impl LoginConfig {
    /// Config with millisecond latencies, for demos and tests
    pub fn fast() -> Self {
        Self {
            credential_delay_ms: 1,
            token_delay_ms: 1,
            resend_delay_ms: 1,
            success_reset_ms: 10,
            ..Self::default()
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn credential_delay(&self) -> Duration {
        Duration::from_millis(self.credential_delay_ms)
    }

    pub fn token_delay(&self) -> Duration {
        Duration::from_millis(self.token_delay_ms)
    }

    pub fn resend_delay(&self) -> Duration {
        Duration::from_millis(self.resend_delay_ms)
    }

    pub fn success_reset(&self) -> Duration {
        Duration::from_millis(self.success_reset_ms)
    }

    /// Check that the settings describe a usable flow
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(Error::InvalidConfig("tick_ms must be greater than 0".into()));
        }
        if self.max_password_attempts == 0 || self.max_token_attempts == 0 {
            return Err(Error::InvalidConfig(
                "attempt limits must be greater than 0".into(),
            ));
        }
        for (name, value) in [
            ("demo.token", &self.demo.token),
            ("demo.expired_token", &self.demo.expired_token),
        ] {
            if value.len() != TOKEN_LENGTH || !value.chars().all(|c| c.is_ascii_digit()) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be {} ASCII digits",
                    name, TOKEN_LENGTH
                )));
            }
        }
        Ok(())
    }

    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to ~/.config
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg_config).join(CONFIG_DIR_NAME));
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Parse and check a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location
    ///
    /// Returns default configuration if the file doesn't exist or is invalid.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring config file {:?}: {}", path, e);
            Self::default()
        })
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir().ok_or(Error::NoConfigDir)?;
        self.save_to(&config_dir.join(CONFIG_FILE_NAME))
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }
}
