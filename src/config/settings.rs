//! Process settings read from the environment.
//!
//! A `.env` file is honoured when present. Every variable has a default so
//! the service starts with no environment at all.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::{AdminError, AdminResult};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    /// Local development (the default).
    Development,
    /// Automated test runs.
    Test,
    /// Deployed service.
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Deployment environment from `APP_ENV`.
    pub environment: AppEnvironment,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Directory holding company.yaml and policy.yaml.
    pub config_dir: PathBuf,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Settings {
    /// Reads settings from the process environment (after loading `.env`).
    pub fn from_env() -> AdminResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> AdminResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment = AppEnvironment::parse(&var("APP_ENV", "development"));
        let host = var("APP_HOST", "127.0.0.1");
        let port_raw = var("APP_PORT", "3000");
        let port = port_raw.parse::<u16>().map_err(|_| AdminError::Settings {
            message: format!("APP_PORT must be a valid u16, got '{}'", port_raw),
        })?;

        Ok(Self {
            environment,
            host,
            port,
            database_path: PathBuf::from(var("APP_DATABASE_PATH", "hr-admin.db")),
            config_dir: PathBuf::from(var("APP_CONFIG_DIR", "./config/default")),
            log_level: var("APP_LOG_LEVEL", "info"),
        })
    }

    /// Resolves the bind address.
    pub fn socket_addr(&self) -> AdminResult<SocketAddr> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self.host.parse().map_err(|_| AdminError::Settings {
            message: format!("APP_HOST must be an IPv4 or IPv6 address, got '{}'", self.host),
        })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}
