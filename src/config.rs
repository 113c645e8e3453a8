// src/config.rs
// =============================================================================
// Session configuration, read from a TOML file.
//
// Example crawler.toml:
//
//   [session]
//   base_url = "https://www.example.com"
//   username = "me@example.com"
//   password_env = "PROFILE_CRAWLER_PASSWORD"   # optional
//   timeout_secs = 10                           # optional
//   request_delay_ms = 100                      # optional
//
// The password itself never lives in the file: we read it from the
// environment variable named by `password_env`.
// =============================================================================

use crate::error::SessionError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "crawler.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Site root; profile pages live at {base_url}/in/{id}/
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    pub username: String,
    #[serde(default = "default_password_env")]
    pub password_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pause between two page fetches
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_login_path() -> String {
    "/login/".to_string()
}

fn default_password_env() -> String {
    "PROFILE_CRAWLER_PASSWORD".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_request_delay_ms() -> u64 {
    100
}

fn default_user_agent() -> String {
    concat!("profile-crawler/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Config {
    /// Reads and parses a config file
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, SessionError> {
        let config: Config = toml::from_str(text)?;
        config.session.base()?;
        Ok(config)
    }
}

impl SessionConfig {
    /// The parsed base URL
    pub fn base(&self) -> Result<Url, SessionError> {
        Url::parse(&self.base_url).map_err(|e| SessionError::InvalidBaseUrl(format!("{}: {}", self.base_url, e)))
    }

    pub fn login_url(&self) -> Result<Url, SessionError> {
        self.base()?
            .join(&self.login_path)
            .map_err(|e| SessionError::InvalidBaseUrl(format!("{}: {}", self.login_path, e)))
    }

    /// Reads the password from the configured environment variable
    pub fn password(&self) -> Result<String, SessionError> {
        std::env::var(&self.password_env).map_err(|_| SessionError::MissingPassword(self.password_env.clone()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}
