use std::env;
use std::str::FromStr;

use tracing::info;

use crate::services::parking_service::DEFAULT_RECURRING_THRESHOLD;
use crate::utils::error::{AppError, AppResult};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/parking";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where spots and tickets are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreKind,
    pub database_url: String,
    pub max_connections: u32,
    pub recurring_threshold: i64,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            store = ?config.store,
            recurring_threshold = config.recurring_threshold,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let recurring_threshold = parse_or(
            &lookup,
            "RECURRING_DISCOUNT_THRESHOLD",
            DEFAULT_RECURRING_THRESHOLD,
        )?;
        if recurring_threshold < 1 {
            return Err(AppError::ConfigError(format!(
                "RECURRING_DISCOUNT_THRESHOLD must be at least 1, got {recurring_threshold}"
            )));
        }

        Ok(Self {
            store: parse_or(&lookup, "PARKING_STORE", StoreKind::Postgres)?,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            recurring_threshold,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::ConfigError(format!("{key}: {e}"))),
        None => Ok(default),
    }
}
