//! HTTP client for the vMix web API
//!
//! This crate performs the network round trip against a vMix instance's
//! `/api` endpoint. Failures are reported as data rather than errors where
//! callers only need to render something: [`DeviceClient::check_status`]
//! returns a plain `bool` and [`DeviceClient::fetch_inputs_xml`] returns a
//! [`RawPayload`] that may be an `Error:` marker.

mod endpoint;
mod error;

pub use endpoint::{EndpointConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{ClientError, EndpointError};

use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Body of an inputs fetch, or a marker describing why there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPayload {
    /// The XML text the device returned with 200 OK
    Body(String),
    /// A short, human-readable diagnostic
    Error(String),
}

impl RawPayload {
    pub fn is_error(&self) -> bool {
        matches!(self, RawPayload::Error(_))
    }

    /// The payload as passed through to callers; errors read `Error: ...`.
    pub fn into_text(self) -> String {
        match self {
            RawPayload::Body(body) => body,
            error => error.to_string(),
        }
    }
}

impl fmt::Display for RawPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawPayload::Body(body) => f.write_str(body),
            RawPayload::Error(diagnostic) => write!(f, "Error: {}", diagnostic),
        }
    }
}

/// A minimal async client for vMix devices
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl DeviceClient {
    /// Create a client with the default 2 second timeout
    pub fn new() -> Result<Self, ClientError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client whose every request is bounded by `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, ClientError> {
        // Devices live on the local network; system proxies would only get in the way
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check whether a vMix instance answers at `endpoint`.
    ///
    /// Returns `true` only for HTTP 200 with a well-formed XML body. Timeouts,
    /// refused connections, DNS failures, other status codes and non-XML
    /// bodies all yield `false`.
    pub async fn check_status(&self, endpoint: &EndpointConfig) -> bool {
        match self.probe(endpoint).await {
            Ok(()) => {
                debug!(%endpoint, "vMix reachable");
                true
            }
            Err(e) => {
                warn!(%endpoint, error = %e, "vMix status check failed");
                false
            }
        }
    }

    /// Same check as [`check_status`](Self::check_status), keeping the reason for a failure.
    pub async fn probe(&self, endpoint: &EndpointConfig) -> Result<(), ClientError> {
        let body = self.get_api(endpoint).await?;
        vmix_parser::ensure_well_formed(&body)?;
        Ok(())
    }

    /// Fetch the raw inputs document from `endpoint`.
    ///
    /// Never fails: a non-200 answer becomes `Error: Status <code>` and a
    /// transport failure becomes `Error: <reason>`.
    pub async fn fetch_inputs_xml(&self, endpoint: &EndpointConfig) -> RawPayload {
        match self.get_api(endpoint).await {
            Ok(body) => {
                debug!(%endpoint, bytes = body.len(), "Fetched vMix inputs document");
                RawPayload::Body(body)
            }
            Err(ClientError::Status(code)) => {
                warn!(%endpoint, status = code, "vMix returned unexpected status");
                RawPayload::Error(format!("Status {}", code))
            }
            Err(e) => {
                warn!(%endpoint, error = %e, "Failed to fetch vMix inputs");
                RawPayload::Error(e.to_string())
            }
        }
    }

    async fn get_api(&self, endpoint: &EndpointConfig) -> Result<String, ClientError> {
        let url = endpoint.api_url();
        debug!(%url, "GET vMix API");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
