//! Business-level replies from the debrid service.
//!
//! The debrid API wraps every payload in an envelope whose `status` is
//! `"success"` or something else. A non-success envelope is not a transport
//! failure: the pipeline skips the torrent and tries again on the next run.

use std::fmt;

use super::magnet::MagnetId;

/// Error details the service attached to a refusal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFault {
    /// Envelope status (for example `"error"`); empty for per-file faults.
    pub status: String,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl fmt::Display for ServiceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{code}: {message}"),
            (Some(code), None) => f.write_str(code),
            (None, Some(message)) => f.write_str(message),
            (None, None) if self.status.is_empty() => f.write_str("unknown error"),
            (None, None) => write!(f, "status {}", self.status),
        }
    }
}

/// A debrid reply: the payload on success, the fault otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceReply<T> {
    Success(T),
    Rejected(ServiceFault),
}

impl<T> ServiceReply<T> {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// What the service did with an uploaded torrent file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Ingested; the magnet can be queried by id.
    Ready(MagnetId),
    /// Accepted but not fully ingested yet.
    Queued { id: Option<MagnetId> },
    /// The file itself was refused (invalid torrent, banned content, ...).
    Refused(ServiceFault),
}
