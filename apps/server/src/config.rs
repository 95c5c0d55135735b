use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Base URL of the daily par yield curve feed. `None` uses the public Treasury site.
    pub feed_url: Option<String>,
    pub yield_ttl: Duration,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("TREASURY_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid TREASURY_LISTEN_ADDR")?;
        let db_path =
            std::env::var("TREASURY_DB_PATH").unwrap_or_else(|_| "./db/treasury.db".into());
        let cors_allow = std::env::var("TREASURY_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("TREASURY_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let feed_url = std::env::var("TREASURY_FEED_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let ttl_secs: u64 = std::env::var("TREASURY_YIELD_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .unwrap_or(3600);
        let log_format =
            std::env::var("TREASURY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            feed_url,
            yield_ttl: Duration::from_secs(ttl_secs),
            log_format,
        })
    }
}
