use std::env;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_addr: String,
    pub redis_password: Option<String>,
    pub redis_db: i64,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let redis_addr = lookup("REDIS_ADDR")
            .unwrap_or_else(|| "localhost:6379".to_string());

        // An empty password means no AUTH, same as leaving it unset
        let redis_password = lookup("REDIS_PASSWORD").filter(|p| !p.is_empty());

        let redis_db: i64 = lookup("REDIS_DB")
            .unwrap_or_else(|| "0".to_string())
            .parse::<u32>()
            .context("REDIS_DB must be a non-negative database index")?
            .into();

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            redis_addr,
            redis_password,
            redis_db,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Redis address: {}", self.redis_addr);
        tracing::info!("  Redis password: {}",
            if self.redis_password.is_some() { "set" } else { "not set" });
        tracing::info!("  Redis database: {}", self.redis_db);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}
