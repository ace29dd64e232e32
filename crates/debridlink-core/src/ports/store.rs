//! Filesystem ports: the torrent directory layout and the output file.

use super::StoreError;
use crate::domain::{ResolvedDownloadLink, TorrentFile, TorrentState};

/// The watched directory and the three terminal directories.
///
/// Implemented by [`crate::fs::FsTorrentStore`].
#[cfg_attr(test, mockall::automock)]
pub trait TorrentStore: Send + Sync {
    /// Create the terminal directories if they are missing.
    fn ensure_layout(&self) -> Result<(), StoreError>;

    /// List `.torrent` files in the watched directory, in path order.
    fn scan_pending(&self) -> Result<Vec<TorrentFile>, StoreError>;

    /// Move a pending file into the directory for `to`.
    ///
    /// Returns the file at its new location.
    fn relocate(&self, file: &TorrentFile, to: TorrentState) -> Result<TorrentFile, StoreError>;
}

/// Append-only sink for resolved links.
#[cfg_attr(test, mockall::automock)]
pub trait LinkSink: Send + Sync {
    fn append(&self, link: &ResolvedDownloadLink) -> Result<(), StoreError>;
}
