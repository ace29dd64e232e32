//! CLI error type and exit code mapping.

use debridlink_core::{ConfigError, CoreError, RemotePortError, StoreError};
use thiserror::Error;

/// Everything that can end a run early.
#[derive(Debug, Error)]
pub enum CliError {
    /// The config file is missing, malformed or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The torrent directories or the output file failed.
    #[error("Filesystem error: {0}")]
    Store(#[from] StoreError),

    /// A remote service failed or could not be set up.
    #[error("Remote service error: {0}")]
    Remote(#[from] RemotePortError),

    /// Anything else, e.g. logging could not start.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Map error to a `sysexits.h` exit code.
    ///
    /// A remote client that cannot be built (bad base URL, bad proxy) is a
    /// configuration problem, not an outage.
    pub const fn exit_code(&self) -> u8 {
        match self {
            // EX_CONFIG
            Self::Config(_) | Self::Remote(RemotePortError::Configuration { .. }) => 78,
            Self::Store(_) => 74,    // EX_IOERR
            Self::Remote(_) => 69,   // EX_UNAVAILABLE
            Self::Internal(_) => 70, // EX_SOFTWARE
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Store(e) => Self::Store(e),
            CoreError::Remote(e) => Self::Remote(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let config = CliError::from(ConfigError::InvalidField {
            field: "utb_api_key",
            reason: "must not be empty".to_string(),
        });
        assert_eq!(config.exit_code(), 78);

        let store = CliError::from(CoreError::Store(StoreError::Scan {
            path: PathBuf::from("/watch"),
            reason: "permission denied".to_string(),
        }));
        assert_eq!(store.exit_code(), 74);

        let remote = CliError::from(CoreError::Remote(RemotePortError::HttpStatus {
            status: 503,
            endpoint: "https://api.alldebrid.com/v4/magnet/status".to_string(),
        }));
        assert_eq!(remote.exit_code(), 69);

        let transport = CliError::from(RemotePortError::Transport {
            message: "connection refused".to_string(),
        });
        assert_eq!(transport.exit_code(), 69);

        assert_eq!(CliError::Internal("boom".to_string()).exit_code(), 70);
    }

    #[test]
    fn test_client_setup_failure_is_configuration() {
        let err = CliError::from(RemotePortError::Configuration {
            message: "base URL must be http or https".to_string(),
        });
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_core_errors_keep_their_message() {
        let err = CliError::from(CoreError::Remote(RemotePortError::InvalidResponse {
            message: "upload reply has no files".to_string(),
        }));
        assert!(matches!(err, CliError::Remote(_)));
        assert!(err.to_string().contains("upload reply has no files"));
    }
}
