//! Directory layout that encodes torrent state.

use std::path::{Path, PathBuf};

use crate::config::RelayConfig;
use crate::domain::TorrentState;

/// One directory per [`TorrentState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentLayout {
    pub watch_dir: PathBuf,
    pub finished_dir: PathBuf,
    pub error_dir: PathBuf,
    pub expired_dir: PathBuf,
}

impl TorrentLayout {
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            watch_dir: config.torrent_directory.clone(),
            finished_dir: config.finished_directory.clone(),
            error_dir: config.error_directory.clone(),
            expired_dir: config.expired_directory.clone(),
        }
    }

    /// Layout with the conventional sub-directory names under `root`.
    pub fn under(root: &Path) -> Self {
        Self {
            watch_dir: root.join("watch"),
            finished_dir: root.join("finished"),
            error_dir: root.join("error"),
            expired_dir: root.join("expired"),
        }
    }

    pub fn dir_for(&self, state: TorrentState) -> &Path {
        match state {
            TorrentState::Pending => &self.watch_dir,
            TorrentState::Finished => &self.finished_dir,
            TorrentState::Error => &self.error_dir,
            TorrentState::Expired => &self.expired_dir,
        }
    }

    /// Directories created at the start of every run.
    pub fn terminal_dirs(&self) -> [&Path; 3] {
        [&self.error_dir, &self.finished_dir, &self.expired_dir]
    }
}
