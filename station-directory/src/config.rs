//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::stations::{DEFAULT_DATASET_URL, StationClientConfig};

/// Default map service; rows link to `<base>/place/<lat>,<lng>`.
pub const DEFAULT_MAP_BASE_URL: &str = "https://www.google.com/maps";

/// Error for an environment variable that is set but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: String,
}

/// Configuration for the directory server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Feature query URL of the station dataset
    pub dataset_url: String,
    /// Base URL of the map service rows link to
    pub map_base_url: String,
    /// Timeout for the dataset request in seconds
    pub fetch_timeout_secs: u64,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Read the configuration from `STATION_*` environment variables,
    /// falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("STATION_BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|e: std::net::AddrParseError| ConfigError {
                var: "STATION_BIND_ADDR",
                reason: e.to_string(),
                value,
            })?;
        }

        if let Some(value) = lookup("STATION_DATASET_URL") {
            config.dataset_url = non_empty("STATION_DATASET_URL", value)?;
        }

        if let Some(value) = lookup("STATION_MAP_BASE_URL") {
            config.map_base_url = non_empty("STATION_MAP_BASE_URL", value)?
                .trim_end_matches('/')
                .to_string();
        }

        if let Some(value) = lookup("STATION_FETCH_TIMEOUT_SECS") {
            config.fetch_timeout_secs = match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                Ok(_) => {
                    return Err(ConfigError {
                        var: "STATION_FETCH_TIMEOUT_SECS",
                        value,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError {
                        var: "STATION_FETCH_TIMEOUT_SECS",
                        reason: e.to_string(),
                        value,
                    });
                }
            };
        }

        if let Some(value) = lookup("STATION_STATIC_DIR") {
            config.static_dir = PathBuf::from(non_empty("STATION_STATIC_DIR", value)?);
        }

        Ok(config)
    }

    /// Client configuration for the dataset fetch.
    pub fn client_config(&self) -> StationClientConfig {
        StationClientConfig::new(&self.dataset_url).with_timeout_secs(self.fetch_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            map_base_url: DEFAULT_MAP_BASE_URL.to_string(),
            fetch_timeout_secs: 30,
            static_dir: PathBuf::from("static"),
        }
    }
}

fn non_empty(var: &'static str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError {
            var,
            value,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(value)
}
