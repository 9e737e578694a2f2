use anyhow::{bail, Context, Result};

use crate::matching::orchestrator::DEFAULT_CONCURRENCY;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Candidates scored at once within one matching run.
    pub match_concurrency: usize,
    /// Background runs that may wait in the queue.
    pub match_queue_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            database_url: require_env("DATABASE_URL")?,
            database_max_connections: parse_or_default(
                "DATABASE_MAX_CONNECTIONS",
                std::env::var("DATABASE_MAX_CONNECTIONS").ok(),
                10,
            )?,
            port: parse_or_default("PORT", std::env::var("PORT").ok(), 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            match_concurrency: parse_or_default(
                "MATCH_CONCURRENCY",
                std::env::var("MATCH_CONCURRENCY").ok(),
                DEFAULT_CONCURRENCY,
            )?,
            match_queue_capacity: parse_or_default(
                "MATCH_QUEUE_CAPACITY",
                std::env::var("MATCH_QUEUE_CAPACITY").ok(),
                64,
            )?,
        };

        if config.match_concurrency == 0 {
            bail!("MATCH_CONCURRENCY must be at least 1");
        }
        if config.match_queue_capacity == 0 {
            bail!("MATCH_QUEUE_CAPACITY must be at least 1");
        }

        Ok(config)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        None => Ok(default),
    }
}
