use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use log::{info, LevelFilter};
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "8000";
const DEFAULT_DATABASE_PATH: &str = "data/records.db";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost,http://localhost:8080,null";
const DEFAULT_LOG_DIR: &str = "log";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Error, Debug)]
#[error("invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub quiz_catalog: Option<PathBuf>,
    pub cors_origins: Vec<String>,
    pub log_dir: String,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            host: try_load("APP_HOST", DEFAULT_HOST)?,
            port: try_load("APP_PORT", DEFAULT_PORT)?,
            database_path: try_load("DATABASE_PATH", DEFAULT_DATABASE_PATH)?,
            quiz_catalog: var("QUIZ_CATALOG").map(PathBuf::from),
            cors_origins: split_list(&try_load::<String>("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)?),
            log_dir: try_load("LOG_DIR", DEFAULT_LOG_DIR)?,
            log_level: try_load("LOG_LEVEL", DEFAULT_LOG_LEVEL)?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Applies a `host:port` (or bare host) given on the command line.
    pub fn override_address(&mut self, addr: &str) -> Result<(), ConfigError> {
        match addr.rsplit_once(':') {
            Some((host, port)) => {
                self.port = port.parse().map_err(|e: std::num::ParseIntError| ConfigError {
                    key: "address argument".to_string(),
                    value: addr.to_string(),
                    reason: e.to_string(),
                })?;
                self.host = host.to_string();
            }
            None => self.host = addr.to_string(),
        }

        Ok(())
    }

    /// Only useful once the logger is up.
    pub fn log_summary(&self) {
        info!("Bind address: {}", self.address());
        info!("Database path: {}", self.database_path);
        match &self.quiz_catalog {
            Some(path) => info!("Quiz catalog: {}", path.display()),
            None => info!("Quiz catalog: built-in"),
        }
        info!("Allowed origins: {}", self.cors_origins.join(", "));
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: 8000,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            quiz_catalog: None,
            cors_origins: split_list(DEFAULT_CORS_ORIGINS),
            log_dir: DEFAULT_LOG_DIR.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|| default.to_string());

    value.trim().parse().map_err(|e: T::Err| ConfigError {
        key: key.to_string(),
        value: value.clone(),
        reason: e.to_string(),
    })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
