//! # Application Configuration
//!
//! Loads Mind Track settings from environment variables, with defaults for
//! everything so a fresh checkout runs without a `.env` file.
//!
//! ## Environment Variables
//!
//! - `MINDTRACK_DATA_DIR`: Directory holding the persisted records (default: "./data")
//! - `MINDTRACK_EMAIL_DOMAIN`: Institutional email suffix required at registration (default: "@ru.is")
//! - `LOG_LEVEL`: Logging level (default: "info")

use std::env;
use std::path::PathBuf;

use eyre::Result;
use tracing::Level;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_EMAIL_DOMAIN: &str = "@ru.is";

/// Configuration for the Mind Track stores and binary.
///
/// # Example
///
/// ```
/// use mindtrack_core::config::AppConfig;
///
/// let config = AppConfig::default();
/// assert_eq!(config.email_domain, "@ru.is");
/// ```
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory where the key-value records live
    pub data_dir: PathBuf,

    /// Suffix every registered email must end with, including the `@`
    pub email_domain: String,

    /// Log level for the application
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    /// Creates a new AppConfig from environment variables
    ///
    /// Unset variables fall back to the defaults. An unknown `LOG_LEVEL` falls
    /// back to `info`.
    pub fn from_env() -> Result<Self> {
        let data_dir = env::var("MINDTRACK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let email_domain = env::var("MINDTRACK_EMAIL_DOMAIN")
            .map(|domain| normalize_domain(&domain))
            .unwrap_or_else(|_| DEFAULT_EMAIL_DOMAIN.to_string());
        if email_domain.len() < 2 {
            eyre::bail!("MINDTRACK_EMAIL_DOMAIN must not be empty");
        }

        let log_level = env::var("LOG_LEVEL")
            .map(|level| parse_log_level(&level))
            .unwrap_or(Level::INFO);

        Ok(Self {
            data_dir,
            email_domain,
            log_level,
        })
    }
}

/// Lowercases a domain suffix and makes sure it starts with `@`.
pub fn normalize_domain(domain: &str) -> String {
    let domain = domain.trim().to_lowercase();
    if domain.starts_with('@') {
        domain
    } else {
        format!("@{}", domain)
    }
}

pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
