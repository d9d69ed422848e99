//! Error types for vMix XML parsing

use thiserror::Error;

/// Errors that can occur while reading a vMix status document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The body is not well-formed XML at all
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// An `input` element is missing its `number` attribute, or it is not a positive integer
    #[error("Input #{index} has an invalid number: {value:?}")]
    InvalidInputNumber {
        /// Zero-based position of the offending `input` element
        index: usize,
        /// The raw attribute value, if one was present
        value: Option<String>,
    },
}

/// Result type alias for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
