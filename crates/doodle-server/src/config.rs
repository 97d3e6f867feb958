//! Relay configuration from the environment.

use std::net::SocketAddr;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} {value:?}: {source}")]
    InvalidNumber {
        key: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("RELAY_CHANNEL_CAPACITY must be at least 1")]
    ZeroCapacity,
}

/// Relay settings.
///
/// | variable | default |
/// |---|---|
/// | `PORT` | 3000 |
/// | `STATIC_DIR` | unset (no static files) |
/// | `RELAY_CHANNEL_CAPACITY` | 256 frames buffered per peer |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub port: u16,
    /// Directory served at `/` (the built web bundle).
    pub static_dir: Option<PathBuf>,
    pub channel_capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get("PORT") {
            config.port = value.trim().parse().map_err(|source| ConfigError::InvalidNumber {
                key: "PORT",
                value,
                source,
            })?;
        }
        config.static_dir = get("STATIC_DIR").map(PathBuf::from);
        if let Some(value) = get("RELAY_CHANNEL_CAPACITY") {
            config.channel_capacity =
                value.trim().parse().map_err(|source| ConfigError::InvalidNumber {
                    key: "RELAY_CHANNEL_CAPACITY",
                    value,
                    source,
                })?;
        }
        if config.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(config)
    }

    /// Listen on all interfaces.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
