//! Server configuration from the environment

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    /// GoTrue-compatible auth service origin
    pub auth_service_url: String,
    pub auth_service_anon_key: String,
    pub auth_service_timeout: Duration,
    /// Public origin of the portal
    pub site_url: String,
    pub bind_addr: SocketAddr,
    /// Built frontend served behind the session gate
    pub static_dir: PathBuf,
    pub frontend_origins: Vec<String>,
    /// Insecure cookies outside production
    pub development: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let development = match env::var("APP_ENV") {
            Ok(value) => value != "production",
            Err(_) => cfg!(debug_assertions),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: parsed("DATABASE_MAX_CONNECTIONS", 5)?,
            auth_service_url: required("AUTH_SERVICE_URL")?,
            auth_service_anon_key: required("AUTH_SERVICE_ANON_KEY")?,
            auth_service_timeout: Duration::from_secs(parsed("AUTH_SERVICE_TIMEOUT_SECS", 10)?),
            site_url: env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            bind_addr: parsed("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("frontend/out")),
            frontend_origins: env::var("FRONTEND_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            development,
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} must be set in environment", name))
}

fn parsed<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}
