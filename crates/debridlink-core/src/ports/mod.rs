//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core services expect from
//! infrastructure. They use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP or JSON wire types in any signature
//! - Business refusals are values (`ServiceReply`, `LinkResolution`), not errors
//! - Errors returned from a port are fatal to the run

pub mod clock;
pub mod debrid;
pub mod remote_error;
pub mod resolver;
pub mod store;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::TorrentState;

pub use clock::{Clock, SystemClock};
pub use debrid::DebridPort;
pub use remote_error::{RemotePortError, RemotePortResult};
pub use resolver::ResolverPort;
pub use store::{LinkSink, TorrentStore};

/// Errors from the torrent directory layout and the output file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The watched directory could not be listed.
    #[error("Failed to scan {path}: {reason}")]
    Scan { path: PathBuf, reason: String },

    /// A torrent file could not be stat'ed.
    #[error("Failed to read metadata of {path}: {reason}")]
    Metadata { path: PathBuf, reason: String },

    /// A terminal directory could not be created.
    #[error("Failed to create directory {path}: {reason}")]
    CreateDir { path: PathBuf, reason: String },

    /// A path that should be a directory is something else.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Moving a torrent between directories failed.
    #[error("Failed to move {from} to {to}: {reason}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// Appending to the output file failed.
    #[error("Failed to write output file {path}: {reason}")]
    Output { path: PathBuf, reason: String },

    /// The requested move is not allowed from the file's current state.
    #[error("Cannot move {path} from {from} to {to}")]
    IllegalTransition {
        path: PathBuf,
        from: TorrentState,
        to: TorrentState,
    },
}

/// Core error type for a run.
///
/// Every variant is fatal. The CLI maps these to exit codes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Filesystem operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A remote service could not be reached or answered garbage.
    #[error(transparent)]
    Remote(#[from] RemotePortError),
}

/// Container for every port a run needs.
///
/// Built once at the composition root and handed to
/// [`RelayService`](crate::services::RelayService).
#[derive(Clone)]
pub struct RelayPorts {
    /// AllDebrid magnet API.
    pub debrid: Arc<dyn DebridPort>,
    /// Uptobox link resolution.
    pub resolver: Arc<dyn ResolverPort>,
    /// Watched directory and its terminal siblings.
    pub store: Arc<dyn TorrentStore>,
    /// Output file of direct links.
    pub sink: Arc<dyn LinkSink>,
    pub clock: Arc<dyn Clock>,
}
