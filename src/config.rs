use std::env;
use std::time::Duration;

use crate::shared::AppError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CACHE_TTL_SECS: u64 = 60;
const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Runtime settings read from the environment (and `.env`, if present)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// PostgreSQL connection string; the in-memory store is used when absent
    pub database_url: Option<String>,
    pub bind_addr: String,
    /// How long cached store reads stay fresh; `None` disables caching
    pub cache_ttl: Option<Duration>,
    pub history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            cache_ttl: Some(Duration::from_secs(DEFAULT_CACHE_TTL_SECS)),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let cache_ttl_secs = parse_or(&read, "CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;
        let history_limit = parse_or(&read, "HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?;
        if history_limit == 0 {
            return Err(AppError::Config(
                "HISTORY_LIMIT must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            database_url: read("DATABASE_URL"),
            bind_addr: read("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            cache_ttl: (cache_ttl_secs > 0).then(|| Duration::from_secs(cache_ttl_secs)),
            history_limit,
        })
    }
}

fn parse_or<T, R>(read: &R, key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    R: Fn(&str) -> Option<String>,
{
    match read(key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| AppError::Config(format!("{} has invalid value '{}'", key, value))),
    }
}
