//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur while bringing up or running a transport.
///
/// Per-request failures are answered on the wire and never surface here;
/// these errors end the `serve()` call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error during transport.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Server initialization error (MCP handshake failed).
    #[error("Server initialization error: {0}")]
    InitError(String),

    /// HTTP-specific error.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Service error from rmcp.
    #[error("Service error: {0}")]
    ServiceError(String),
}

impl TransportError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::BindError {
            address: address.into(),
            source,
        }
    }

    /// Create an initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::InitError(msg.into())
    }

    /// Create an HTTP error.
    pub fn http(msg: impl Into<String>) -> Self {
        Self::HttpError(msg.into())
    }

    /// Create a service error.
    pub fn service(msg: impl Into<String>) -> Self {
        Self::ServiceError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_message() {
        let source = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = TransportError::bind("127.0.0.1:8080", source);
        assert_eq!(
            err.to_string(),
            "Failed to bind to 127.0.0.1:8080: address in use"
        );
    }
}
