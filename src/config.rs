// src/config.rs
use std::{env, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    listen_addr: String,
    allowed_origins: Vec<String>,
    storage_timeout: Duration,
    database_max_connections: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_storage_timeout_ms() -> u64 {
    5_000
}

fn default_max_connections() -> u32 {
    10
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let storage_timeout_ms = match lookup("STORAGE_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "STORAGE_TIMEOUT_MS must be a positive integer, got `{raw}`"
                    ))
                })?,
            None => default_storage_timeout_ms(),
        };

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "DATABASE_MAX_CONNECTIONS must be a positive integer, got `{raw}`"
                    ))
                })?,
            None => default_max_connections(),
        };

        Ok(Self {
            database_url,
            listen_addr,
            allowed_origins,
            storage_timeout: Duration::from_millis(storage_timeout_ms),
            database_max_connections,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    /// Empty means any origin is accepted.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Upper bound applied to every storage call.
    pub fn storage_timeout(&self) -> Duration {
        self.storage_timeout
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }
}
