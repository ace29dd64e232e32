//! Torrent store backed by real directories.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::layout::TorrentLayout;
use crate::domain::{TorrentFile, TorrentState};
use crate::ports::{StoreError, TorrentStore};

/// Extension of the files picked up from the watched directory.
pub const TORRENT_EXTENSION: &str = "torrent";

/// [`TorrentStore`] over a [`TorrentLayout`] on the local filesystem.
///
/// Moves are plain renames, so the terminal directories must live on the
/// same filesystem as the watched directory.
#[derive(Debug, Clone)]
pub struct FsTorrentStore {
    layout: TorrentLayout,
}

impl FsTorrentStore {
    pub const fn new(layout: TorrentLayout) -> Self {
        Self { layout }
    }

    pub const fn layout(&self) -> &TorrentLayout {
        &self.layout
    }
}

fn is_torrent_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TORRENT_EXTENSION))
}

fn modified_time(path: &Path) -> Result<DateTime<Utc>, StoreError> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(DateTime::<Utc>::from)
        .map_err(|e| StoreError::Metadata {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

impl TorrentStore for FsTorrentStore {
    fn ensure_layout(&self) -> Result<(), StoreError> {
        for dir in self.layout.terminal_dirs() {
            if dir.exists() {
                if !dir.is_dir() {
                    return Err(StoreError::NotADirectory(dir.to_path_buf()));
                }
                continue;
            }

            fs::create_dir_all(dir).map_err(|e| StoreError::CreateDir {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;
            debug!(dir = %dir.display(), "Created directory");
        }
        Ok(())
    }

    fn scan_pending(&self) -> Result<Vec<TorrentFile>, StoreError> {
        let watch_dir = &self.layout.watch_dir;
        info!("Scanning folder {} ...", watch_dir.display());

        let scan_error = |e: std::io::Error| StoreError::Scan {
            path: watch_dir.clone(),
            reason: e.to_string(),
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(watch_dir).map_err(scan_error)? {
            let path = entry.map_err(scan_error)?.path();
            if is_torrent_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        match paths.len() {
            0 => info!("FILESYSTEM - No file detected !"),
            1 => info!("FILESYSTEM - 1 file detected !"),
            n => info!("FILESYSTEM - {n} files detected !"),
        }

        paths
            .into_iter()
            .map(|path| {
                let modified = modified_time(&path)?;
                Ok(TorrentFile::pending(path, modified))
            })
            .collect()
    }

    fn relocate(&self, file: &TorrentFile, to: TorrentState) -> Result<TorrentFile, StoreError> {
        if !file.state.can_transition_to(to) {
            return Err(StoreError::IllegalTransition {
                path: file.path.clone(),
                from: file.state,
                to,
            });
        }

        let Some(name) = file.path.file_name() else {
            return Err(StoreError::Rename {
                from: file.path.clone(),
                to: self.layout.dir_for(to).to_path_buf(),
                reason: "path has no file name".to_string(),
            });
        };
        let destination = self.layout.dir_for(to).join(name);

        fs::rename(&file.path, &destination).map_err(|e| StoreError::Rename {
            from: file.path.clone(),
            to: destination.clone(),
            reason: e.to_string(),
        })?;

        Ok(TorrentFile {
            path: destination,
            modified: file.modified,
            state: to,
        })
    }
}
