//! Server configuration.
//!
//! Read from environment variables, falling back to defaults that match a
//! checkout run from the repository root:
//! - `HOST` - bind address (default `127.0.0.1`)
//! - `PORT` - bind port (default `3000`)
//! - `TASKS_DIR` - directory of saved task files (default `./saved-tasks`)
//! - `PUBLIC_DIR` - static assets (default `./public`)

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid PORT value {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub tasks_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            tasks_dir: PathBuf::from("saved-tasks"),
            public_dir: PathBuf::from("public"),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT").filter(|p| !p.is_empty()) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("HOST")
                .filter(|h| !h.is_empty())
                .unwrap_or(defaults.host),
            port,
            tasks_dir: lookup("TASKS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.tasks_dir),
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
