//! Internal error types for the remote clients.
//!
//! These errors are internal to `debridlink-remote` and are mapped to
//! [`RemotePortError`](debridlink_core::RemotePortError) at the port
//! boundary. Every `endpoint` here is already stripped of its query string.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for remote client operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service answered with something other than 200.
    #[error("Request to {endpoint} failed with status {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        endpoint: String,
    },

    /// Connection, TLS, proxy or timeout failure.
    #[error("Request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        /// Always built with `without_url()`
        #[source]
        source: reqwest::Error,
    },

    /// The body was not the JSON shape we expected.
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body decoded but lacks something required.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// A base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built (bad proxy, TLS setup).
    #[error("Failed to build HTTP client: {message}")]
    Client { message: String },

    /// The torrent to upload could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadUpload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RemoteError {
    pub(crate) fn network(endpoint: impl Into<String>, err: reqwest::Error) -> Self {
        Self::Network {
            endpoint: endpoint.into(),
            source: err.without_url(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}
