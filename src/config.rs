//! Server configuration from the environment.

use serde::Serialize;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub submit_timeout: Duration,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("public"),
            catalog_path: None,
            submit_timeout: Duration::from_millis(10_000),
            log_json: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("PORTFOLIO_BIND_HOST").unwrap_or(defaults.host),
            port: env_u16("PORT", defaults.port),
            static_dir: env::var("PORTFOLIO_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            catalog_path: env::var("PORTFOLIO_CATALOG")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            submit_timeout: Duration::from_millis(env_u64(
                "PORTFOLIO_SUBMIT_TIMEOUT_MS",
                defaults.submit_timeout.as_millis() as u64,
            )),
            log_json: env_bool("PORTFOLIO_LOG_JSON", defaults.log_json),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

pub fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

pub fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or(default)
}

pub fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
