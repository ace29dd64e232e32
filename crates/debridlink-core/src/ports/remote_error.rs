//! Error types for remote service ports.

use thiserror::Error;

/// Errors from the debrid and hosting service ports.
///
/// Implementation-specific errors (HTTP, JSON) are mapped to these by the
/// adapter. Endpoints are reported without their query string so API keys
/// never reach the logs.
#[derive(Debug, Error)]
pub enum RemotePortError {
    /// Network or connectivity error.
    #[error("Network error: {message}")]
    Transport {
        /// Description of the network error
        message: String,
    },

    /// The service answered with a non-200 HTTP status.
    #[error("Request to {endpoint} failed with status {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Endpoint, without query parameters
        endpoint: String,
    },

    /// The response body was not the JSON we expected.
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode {
        /// Endpoint, without query parameters
        endpoint: String,
        /// Decoder message
        message: String,
    },

    /// The response decoded but is missing something required.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// Client could not be configured (bad proxy, bad base URL, unreadable upload).
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Result type alias for remote port operations.
pub type RemotePortResult<T> = Result<T, RemotePortError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RemotePortError::HttpStatus {
            status: 503,
            endpoint: "https://api.alldebrid.com/v4/magnet/status".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("magnet/status"));

        let err = RemotePortError::InvalidResponse {
            message: "upload reply has no files".to_string(),
        };
        assert!(err.to_string().contains("no files"));
    }
}
