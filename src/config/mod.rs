use anyhow::{anyhow, Result};
use sqlx::postgres::PgSslMode;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub http_addr: String,
    pub api_prefix: String,
    pub database_url: String,
    pub db_ssl_mode: Option<PgSslMode>,
    pub db_max_connections: u32,
    pub db_connect_timeout_seconds: u64,
    pub db_idle_timeout_seconds: u64,
    pub db_max_lifetime_seconds: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let http_addr = match std::env::var("HTTP_ADDR") {
            Ok(addr) => addr,
            Err(_) => format!("0.0.0.0:{}", env_or("PORT", "3000")),
        };
        let _parsed_http_addr = SocketAddr::from_str(&http_addr)
            .map_err(|err| anyhow!("invalid HTTP_ADDR: {}", err))?;

        let api_prefix = env_or("API_PREFIX", "/api");
        if !api_prefix.starts_with('/') {
            return Err(anyhow!("invalid API_PREFIX: must start with '/'"));
        }

        let database_url = env_or_err("DATABASE_URL")?;
        let db_ssl_mode =
            resolve_ssl_mode(std::env::var("DB_SSL_MODE").ok().as_deref(), &database_url)?;

        Ok(Self {
            http_addr,
            api_prefix: api_prefix.trim_end_matches('/').to_string(),
            database_url,
            db_ssl_mode,
            db_max_connections: env_or_parse("DB_MAX_CONNECTIONS", "10")?,
            db_connect_timeout_seconds: env_or_parse("DB_CONNECT_TIMEOUT_SECONDS", "5")?,
            db_idle_timeout_seconds: env_or_parse("DB_IDLE_TIMEOUT_SECONDS", "300")?,
            db_max_lifetime_seconds: env_or_parse("DB_MAX_LIFETIME_SECONDS", "1800")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_err(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| anyhow!("missing required env var: {}", key))
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}

fn parse_ssl_mode(value: &str) -> Result<PgSslMode> {
    PgSslMode::from_str(value).map_err(|err| anyhow!("invalid DB_SSL_MODE: {}", err))
}

/// `DB_SSL_MODE` wins; otherwise an `sslmode` in the URL is left alone, and
/// a URL without one gets `require`.
fn resolve_ssl_mode(env_value: Option<&str>, database_url: &str) -> Result<Option<PgSslMode>> {
    match env_value {
        Some(mode) => parse_ssl_mode(mode).map(Some),
        None if database_url.contains("sslmode=") => Ok(None),
        None => Ok(Some(PgSslMode::Require)),
    }
}
