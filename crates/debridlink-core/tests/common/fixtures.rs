//! Directory and magnet fixtures.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use debridlink_core::{Link, MagnetId, MagnetStatusCode, RemoteMagnet, TorrentLayout};
use tempfile::TempDir;

/// A temp directory with the watched directory already created.
pub struct Workspace {
    pub dir: TempDir,
    pub layout: TorrentLayout,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let layout = TorrentLayout::under(dir.path());
        fs::create_dir_all(&layout.watch_dir).unwrap();
        let output = dir.path().join("links.txt");
        Self {
            dir,
            layout,
            output,
        }
    }

    /// Drop a torrent in the watched directory with the given age.
    pub fn add_torrent(&self, name: &str, now: DateTime<Utc>, age: Duration) -> PathBuf {
        let path = self.layout.watch_dir.join(name);
        fs::write(&path, b"d8:announce0:4:infod4:name0:ee").unwrap();

        let mtime = SystemTime::from(now) - age;
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
        path
    }

    pub fn names_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .map(|entries| {
                entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn output_lines(&self) -> Vec<String> {
        fs::read_to_string(&self.output)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub const fn hours(n: u64) -> Duration {
    Duration::from_secs(n * 3600)
}

pub fn hosted_link(code: &str) -> Link {
    Link {
        url: format!("https://uptobox.com/{code}"),
        filename: format!("{code}.mkv"),
        size: 1024,
        entries: Vec::new(),
    }
}

pub fn magnet(id: u64, status: &str, code: i32, uploaded_at: DateTime<Utc>) -> RemoteMagnet {
    RemoteMagnet {
        id: MagnetId(id),
        filename: format!("magnet-{id}"),
        size: 2048,
        status: status.to_string(),
        status_code: MagnetStatusCode(code),
        downloaded: 0,
        uploaded_at,
        links: Vec::new(),
    }
}

pub fn ready_magnet(id: u64, uploaded_at: DateTime<Utc>, links: Vec<Link>) -> RemoteMagnet {
    RemoteMagnet {
        downloaded: 2048,
        links,
        ..magnet(id, RemoteMagnet::READY, 4, uploaded_at)
    }
}
