use std::env;

use anyhow::{Context, bail};

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    Redis { url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cache: CacheBackend,
    /// Serialize cart mutations per user id.
    pub write_locks: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("APP_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        let cache = match lookup("CART_CACHE").map(|v| v.trim().to_ascii_lowercase()) {
            None => CacheBackend::Redis {
                url: lookup("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            },
            Some(kind) if kind == "redis" => CacheBackend::Redis {
                url: lookup("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            },
            Some(kind) if kind == "memory" => CacheBackend::Memory,
            Some(other) => bail!("unknown CART_CACHE backend `{other}` (expected redis or memory)"),
        };

        let write_locks = match lookup("CART_WRITE_LOCKS") {
            None => true,
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("CART_WRITE_LOCKS must be true or false, got `{raw}`"))?,
        };

        Ok(Self {
            port,
            database_url,
            host,
            cache,
            write_locks,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
