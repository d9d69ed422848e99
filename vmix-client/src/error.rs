//! Error types for the device client

use thiserror::Error;
use vmix_parser::ParseError;

/// Rejected endpoint strings
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// Nothing to connect to
    #[error("Invalid endpoint: endpoint must not be empty")]
    Empty,

    /// The segment after `:` is not a port number
    #[error("Invalid endpoint: '{0}' does not end in a valid port")]
    InvalidPort(String),
}

/// Errors that can occur while talking to a vMix device
#[derive(Debug, Error)]
pub enum ClientError {
    /// Timeout, refused connection, DNS failure and other transport errors
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The device answered with something other than 200 OK
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// The device answered 200 OK but the body is not XML
    #[error(transparent)]
    Malformed(#[from] ParseError),

    /// The underlying HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}
