//! The integration facade consumed by the web layer.

use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};
use vmix_client::{DeviceClient, EndpointConfig, EndpointError, RawPayload, DEFAULT_TIMEOUT};
use vmix_parser::{InputRecord, PollResult};

use crate::demo;
use crate::error::Result;
use crate::session::{Mode, SessionState};

/// Payload reported when a live poll finds no device.
pub const NOT_CONNECTED_PAYLOAD: &str = "Not connected to vMix";

/// Payload reported by the passthrough before any live poll has run.
pub const NO_PAYLOAD_YET: &str = "No payload received yet";

/// Startup settings for [`IntegrationService`]
#[derive(Debug, Clone)]
pub struct IntegrationConfig {
    /// Endpoint targeted before any connect
    pub endpoint: EndpointConfig,
    /// Bound on every device request
    pub timeout: Duration,
    pub initial_mode: Mode,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            timeout: DEFAULT_TIMEOUT,
            initial_mode: Mode::Demo,
        }
    }
}

/// Answer to a status query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub mode: Mode,
    /// Currently committed endpoint as `host:port`
    pub endpoint: String,
}

/// Answer to a mode toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeChange {
    pub mode: Mode,
    pub message: String,
}

/// Answer to a connect request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectOutcome {
    pub connected: bool,
    pub message: String,
    pub inputs: Vec<InputRecord>,
}

impl ConnectOutcome {
    fn unreachable(target: &dyn fmt::Display) -> Self {
        Self {
            connected: false,
            message: format!(
                "Could not connect to vMix at {}. Please check if vMix is running and accessible.",
                target
            ),
            inputs: Vec::new(),
        }
    }
}

/// Owns the session state and composes the device client, the XML parser
/// and the demo fixtures.
///
/// One instance is shared (behind an `Arc`) by all concurrent requests. The
/// session mutex is only held for snapshots and commits, never across a
/// network round trip.
pub struct IntegrationService {
    client: DeviceClient,
    session: Mutex<SessionState>,
}

impl IntegrationService {
    /// Create a service with its own device client.
    pub fn new(config: IntegrationConfig) -> Result<Self> {
        let client = DeviceClient::with_timeout(config.timeout)?;
        Ok(Self::with_client(client, config.initial_mode, config.endpoint))
    }

    pub fn with_client(client: DeviceClient, mode: Mode, endpoint: EndpointConfig) -> Self {
        Self {
            client,
            session: Mutex::new(SessionState::new(mode, endpoint)),
        }
    }

    pub fn mode(&self) -> Mode {
        self.session.lock().mode
    }

    /// The committed endpoint
    pub fn endpoint(&self) -> EndpointConfig {
        self.session.lock().endpoint.clone()
    }

    fn snapshot(&self) -> (Mode, EndpointConfig) {
        let session = self.session.lock();
        (session.mode, session.endpoint.clone())
    }

    fn record_payload(&self, payload: &str) {
        self.session.lock().last_payload = Some(payload.to_string());
    }

    /// Connection state. Demo mode is always connected and does no I/O.
    pub async fn status(&self) -> ConnectionStatus {
        let (mode, endpoint) = self.snapshot();

        let connected = match mode {
            Mode::Demo => true,
            Mode::Live => self.client.check_status(&endpoint).await,
        };

        ConnectionStatus {
            connected,
            mode,
            endpoint: endpoint.to_string(),
        }
    }

    /// Current input list.
    ///
    /// In Live mode the device is checked first; when it is unreachable the
    /// fetch is skipped and an empty result is returned.
    pub async fn inputs(&self) -> PollResult {
        let (mode, endpoint) = self.snapshot();

        let result = match mode {
            Mode::Demo => {
                debug!("Demo mode: returning sample inputs");
                demo::demo_poll()
            }
            Mode::Live => {
                if self.client.check_status(&endpoint).await {
                    self.fetch_and_parse(&endpoint).await
                } else {
                    warn!(%endpoint, "vMix not connected, returning empty input list");
                    PollResult::empty(NOT_CONNECTED_PAYLOAD)
                }
            }
        };

        self.record_payload(&result.raw_payload);
        result
    }

    async fn fetch_and_parse(&self, endpoint: &EndpointConfig) -> PollResult {
        match self.client.fetch_inputs_xml(endpoint).await {
            RawPayload::Body(body) => match vmix_parser::parse(&body) {
                Ok(result) => {
                    debug!(%endpoint, inputs = result.inputs.len(), "Parsed vMix inputs");
                    result
                }
                Err(e) => {
                    warn!(%endpoint, error = %e, "Discarding unparseable vMix document");
                    PollResult::empty(format!("Error: {}", e))
                }
            },
            error => PollResult::empty(error.into_text()),
        }
    }

    /// Set `explicit` as the mode, or flip the current mode when `None`.
    pub fn toggle_mode(&self, explicit: Option<Mode>) -> ModeChange {
        let mode = {
            let mut session = self.session.lock();
            let next = explicit.unwrap_or_else(|| session.mode.flipped());
            session.mode = next;
            next
        };

        info!(%mode, "Switched mode");
        ModeChange {
            mode,
            message: format!("Switched to {} mode", mode),
        }
    }

    /// Try a new endpoint and commit it only if a device answers there.
    ///
    /// The device is contacted whatever the current mode is. On failure the
    /// previously committed endpoint stays in place. An endpoint whose port
    /// is not a number is reported as unreachable without any request.
    ///
    /// # Errors
    ///
    /// `IntegrationError::InvalidEndpoint` when `raw_endpoint` is empty; no
    /// request is made in that case.
    pub async fn connect(&self, raw_endpoint: &str) -> Result<ConnectOutcome> {
        let candidate = match EndpointConfig::normalize(raw_endpoint) {
            Ok(candidate) => candidate,
            Err(EndpointError::InvalidPort(raw)) => {
                warn!(endpoint = %raw, "Endpoint has no usable port");
                return Ok(ConnectOutcome::unreachable(&raw));
            }
            Err(e) => return Err(e.into()),
        };
        info!(endpoint = %candidate, "Attempting to connect to vMix");

        if let Err(e) = self.client.probe(&candidate).await {
            warn!(endpoint = %candidate, error = %e, "Failed to connect to vMix");
            return Ok(ConnectOutcome::unreachable(&candidate));
        }

        self.session.lock().endpoint = candidate.clone();
        info!(endpoint = %candidate, "Committed vMix endpoint");

        let result = self.fetch_and_parse(&candidate).await;
        self.record_payload(&result.raw_payload);

        Ok(ConnectOutcome {
            connected: true,
            message: format!("Successfully connected to vMix at {}", candidate),
            inputs: result.inputs,
        })
    }

    /// The most recent raw payload, untouched.
    ///
    /// Before the first poll this is the demo serialization in Demo mode and
    /// a placeholder in Live mode.
    pub fn raw_passthrough(&self) -> String {
        let session = self.session.lock();
        match (&session.last_payload, session.mode) {
            (Some(payload), _) => payload.clone(),
            (None, Mode::Demo) => demo::demo_poll().raw_payload,
            (None, Mode::Live) => NO_PAYLOAD_YET.to_string(),
        }
    }
}
