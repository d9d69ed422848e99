//! Error types for the integration facade

use thiserror::Error;
use vmix_client::{ClientError, EndpointError};

/// Result type for integration operations
pub type Result<T> = std::result::Result<T, IntegrationError>;

/// Hard failures of the integration facade.
///
/// Device-facing problems never show up here; they are reported as
/// `connected: false`, empty input lists and `Error:` payloads instead.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// The caller passed an endpoint that cannot be normalized
    #[error(transparent)]
    InvalidEndpoint(#[from] EndpointError),

    /// The HTTP client could not be created
    #[error("Failed to initialize device client: {0}")]
    Client(#[from] ClientError),
}
