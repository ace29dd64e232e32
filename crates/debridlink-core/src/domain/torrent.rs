//! Local torrent files and their directory-encoded state.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Where a torrent file currently lives.
///
/// The state of a torrent on disk is the directory it sits in. A file starts
/// in the watched directory (`Pending`) and is renamed into exactly one of the
/// terminal directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorrentState {
    /// In the watched directory, waiting to be uploaded or polled again.
    Pending,
    /// All links were attempted and the torrent was filed away.
    Finished,
    /// The debrid service refused the torrent.
    Error,
    /// Reclaimed after sitting in the watched directory past the expiration window.
    Expired,
}

impl TorrentState {
    /// Whether this state is final for the torrent file.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether a file in this state may be moved to `next`.
    ///
    /// Only pending files move, and they only move into a terminal state.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(self, Self::Pending) && next.is_terminal()
    }

    /// Lowercase label used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Finished => "finished",
            Self::Error => "error",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for TorrentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `.torrent` file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentFile {
    /// Current location of the file.
    pub path: PathBuf,
    /// Last modification time, used by the inactivity sweep.
    pub modified: DateTime<Utc>,
    /// Directory-encoded state.
    pub state: TorrentState,
}

impl TorrentFile {
    /// A file discovered in the watched directory.
    pub fn pending(path: impl Into<PathBuf>, modified: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            modified,
            state: TorrentState::Pending,
        }
    }

    /// Base name of the file, as uploaded to the debrid service.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Whether the file was last touched at or before `cutoff` (unix seconds).
    pub fn modified_at_or_before(&self, cutoff: i64) -> bool {
        self.modified.timestamp() <= cutoff
    }
}
