//! Environment-driven configuration for the dashboard binary.
//!
//! | Variable | Default |
//! |---|---|
//! | `VMIX_DASHBOARD_HOST` | `0.0.0.0` |
//! | `VMIX_DASHBOARD_PORT` | `5050` |
//! | `VMIX_DASHBOARD_PORT_ATTEMPTS` | `10` |
//! | `VMIX_ENDPOINT` | `localhost:8088` |
//! | `VMIX_TIMEOUT_MS` | `2000` |
//! | `VMIX_START_MODE` | `demo` |

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use vmix_integration::{EndpointConfig, IntegrationConfig, Mode};

pub const DEFAULT_DASHBOARD_PORT: u16 = 5050;
pub const DEFAULT_PORT_ATTEMPTS: u16 = 10;

/// Rejected configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the HTTP layer plus the integration service it fronts
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub bind_host: IpAddr,
    /// First port tried
    pub port: u16,
    /// How many consecutive ports to try before giving up
    pub port_attempts: u16,
    pub integration: IntegrationConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_DASHBOARD_PORT,
            port_attempts: DEFAULT_PORT_ATTEMPTS,
            integration: IntegrationConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_host = parse_var(&lookup, "VMIX_DASHBOARD_HOST")?.unwrap_or(defaults.bind_host);
        let port = parse_var(&lookup, "VMIX_DASHBOARD_PORT")?.unwrap_or(defaults.port);
        let port_attempts = parse_var::<u16, _>(&lookup, "VMIX_DASHBOARD_PORT_ATTEMPTS")?
            .unwrap_or(defaults.port_attempts)
            .max(1);

        let endpoint = match lookup("VMIX_ENDPOINT") {
            Some(raw) => EndpointConfig::normalize(&raw).map_err(|e| ConfigError::InvalidValue {
                key: "VMIX_ENDPOINT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.integration.endpoint,
        };

        let timeout = parse_var::<u64, _>(&lookup, "VMIX_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.integration.timeout);

        let initial_mode =
            parse_var::<Mode, _>(&lookup, "VMIX_START_MODE")?.unwrap_or(defaults.integration.initial_mode);

        Ok(Self {
            bind_host,
            port,
            port_attempts,
            integration: IntegrationConfig {
                endpoint,
                timeout,
                initial_mode,
            },
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key,
                value,
                reason: e.to_string(),
            }),
    }
}
