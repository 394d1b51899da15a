//! Error types for the HTTP transport

use thiserror::Error;

/// Errors that can occur while exchanging a request with a remote service
///
/// A response with a non-success status is not an error at this layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection, DNS, TLS or timeout failure
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The response arrived but its body could not be read
    #[error("Response body error: {0}")]
    Body(String),
}
