//! Process configuration, read from `PRELANDER_*` environment variables.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file holding site and download records.
    pub db_path: PathBuf,
    /// Maximum accepted JSON body, in bytes.
    pub json_limit: usize,
    /// Capacity of the side-effect queue.
    pub queue_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: PathBuf::from("prelander.sqlite"),
            json_limit: 1024 * 1024,
            queue_capacity: 100,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset or blank keys keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let config = Self {
            host: get("PRELANDER_HOST").unwrap_or(defaults.host),
            port: number("PRELANDER_PORT", get("PRELANDER_PORT"), defaults.port)?,
            db_path: get("PRELANDER_DB").map(PathBuf::from).unwrap_or(defaults.db_path),
            json_limit: number("PRELANDER_JSON_LIMIT", get("PRELANDER_JSON_LIMIT"), defaults.json_limit)?,
            queue_capacity: number(
                "PRELANDER_QUEUE_CAPACITY",
                get("PRELANDER_QUEUE_CAPACITY"),
                defaults.queue_capacity,
            )?,
        };
        if config.queue_capacity == 0 {
            return Err(ConfigError::Zero("PRELANDER_QUEUE_CAPACITY"));
        }
        if config.json_limit == 0 {
            return Err(ConfigError::Zero("PRELANDER_JSON_LIMIT"));
        }
        Ok(config)
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn number<T: std::str::FromStr>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}
