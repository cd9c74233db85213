//! Application configuration loading from badge.toml
//!
//! Every field has a default, so a missing file or a partial file is fine. The
//! `BADGE_CONFIG` environment variable overrides the file location and
//! `BADGE_BIND_ADDR` overrides the listen address.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_CONFIG_PATH: &str = "badge.toml";

/// Configuration structure representing the entire badge.toml file
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Badge presentation settings not stored in the database
    pub badge: BadgeConfig,
}

/// HTTP listener settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to, e.g. `0.0.0.0:3000`
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

impl ServerConfig {
    /// Parses the configured bind address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address.parse().map_err(Error::from)
    }
}

/// Badge presentation settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BadgeConfig {
    /// Where the badge links when the partner has no landing page
    pub default_landing_url: String,
    /// `chrono` format string used for the expiration date in hover text
    pub date_format: String,
    /// Tooltip shown by embedded badges that are not effectively valid
    pub expired_text: String,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            default_landing_url: "https://partners.example.com".to_string(),
            date_format: "%B %-d, %Y".to_string(),
            expired_text: "This certification has expired or is not valid for this site."
                .to_string(),
        }
    }
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses application configuration from TOML text
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse badge.toml: {e}"),
    })
}

/// Loads configuration from `BADGE_CONFIG` (or ./badge.toml), falling back to
/// defaults when the default file does not exist, then applies `BADGE_BIND_ADDR`.
pub fn load_app_configuration() -> Result<AppConfig> {
    let mut config = match std::env::var("BADGE_CONFIG") {
        Ok(path) => load_config(path)?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)?,
        Err(_) => {
            info!("No {} found, using default configuration.", DEFAULT_CONFIG_PATH);
            AppConfig::default()
        }
    };

    if let Ok(bind_address) = std::env::var("BADGE_BIND_ADDR") {
        config.server.bind_address = bind_address;
    }

    Ok(config)
}
