//! Connection mode and per-process session state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vmix_client::EndpointConfig;

/// Whether the dashboard simulates a device or talks to a real one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Fixed fixture data, no network I/O
    #[default]
    Demo,
    /// Real requests against the configured endpoint
    Live,
}

impl Mode {
    /// The other mode
    pub fn flipped(self) -> Mode {
        match self {
            Mode::Demo => Mode::Live,
            Mode::Live => Mode::Demo,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Demo => "Demo",
            Mode::Live => "Live",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" => Ok(Mode::Demo),
            "live" => Ok(Mode::Live),
            other => Err(format!("unknown mode '{}', expected demo or live", other)),
        }
    }
}

/// Mutable state shared by every request.
///
/// Only [`IntegrationService`](crate::IntegrationService) holds one, behind
/// its mutex.
#[derive(Debug, Clone)]
pub(crate) struct SessionState {
    pub(crate) mode: Mode,
    pub(crate) endpoint: EndpointConfig,
    /// Most recent raw payload produced by a poll or connect
    pub(crate) last_payload: Option<String>,
}

impl SessionState {
    pub(crate) fn new(mode: Mode, endpoint: EndpointConfig) -> Self {
        Self {
            mode,
            endpoint,
            last_payload: None,
        }
    }
}
