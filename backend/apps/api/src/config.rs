//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use anyhow::Context;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Process-level settings for the API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    /// Upper bound on waiting for a pooled connection
    pub database_acquire_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    /// Overrides the poll engine's requester header when set
    pub requester_header: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            database_acquire_timeout: Duration::from_secs(parse_or(
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                5,
            )?),
            bind_addr: parse_or("API_BIND_ADDR", DEFAULT_BIND_ADDR.parse()?)?,
            frontend_origins,
            requester_header: env::var("POLL_REQUESTER_HEADER")
                .ok()
                .map(|header| header.trim().to_string())
                .filter(|header| !header.is_empty()),
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}
