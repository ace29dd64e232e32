//! Remote magnets, their links, and resolved download links.

use std::fmt;

use chrono::{DateTime, Utc};

/// Identifier assigned to a magnet by the debrid service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MagnetId(pub u64);

impl fmt::Display for MagnetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse progress class of a magnet status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Codes 0 to 4: queued, downloading, compressing, uploading, ready.
    InProgress,
    /// Code 10: the service gave up after 72 hours without activity.
    Inactive,
    /// Any other code above 4.
    Failed,
}

/// Numeric magnet status as reported by the debrid service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagnetStatusCode(pub i32);

impl MagnetStatusCode {
    /// Status code the service uses for magnets it reclaimed as inactive.
    pub const INACTIVE: Self = Self(10);

    /// Highest code that still means the magnet is progressing normally.
    pub const LAST_IN_PROGRESS: i32 = 4;

    pub const fn class(self) -> StatusClass {
        if self.0 == Self::INACTIVE.0 {
            StatusClass::Inactive
        } else if self.0 > Self::LAST_IN_PROGRESS {
            StatusClass::Failed
        } else {
            StatusClass::InProgress
        }
    }
}

impl fmt::Display for MagnetStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A magnet as known to the debrid service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMagnet {
    pub id: MagnetId,
    pub filename: String,
    pub size: u64,
    /// Human readable status, `"Ready"` once everything is hosted.
    pub status: String,
    pub status_code: MagnetStatusCode,
    /// Bytes fetched so far by the service.
    pub downloaded: u64,
    pub uploaded_at: DateTime<Utc>,
    /// Hosted files; only populated by the detail query of a ready magnet.
    pub links: Vec<Link>,
}

impl RemoteMagnet {
    /// Status string of a fully hosted magnet.
    pub const READY: &'static str = "Ready";

    pub fn is_ready(&self) -> bool {
        self.status == Self::READY
    }
}

/// One hosted file of a completed magnet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Hosting service URL; its last path segment is the file code.
    pub url: String,
    pub filename: String,
    pub size: u64,
    /// Contents, for archives and folders.
    pub entries: Vec<LinkEntry>,
}

impl Link {
    /// Hosting-service file code, taken from the last path segment of the URL.
    ///
    /// Query strings, fragments and trailing slashes are ignored. Returns
    /// `None` when nothing is left.
    pub fn file_code(&self) -> Option<&str> {
        let without_fragment = self.url.split('#').next().unwrap_or_default();
        let without_query = without_fragment.split('?').next().unwrap_or_default();
        let trimmed = without_query.trim_end_matches('/');

        // Bare host: "https://host" has no file code
        let after_scheme = trimmed
            .split_once("://")
            .map_or(trimmed, |(_, rest)| rest);
        if !after_scheme.contains('/') && trimmed.contains("://") {
            return None;
        }

        trimmed
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}

/// A file or folder inside a [`Link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub name: String,
    /// Size in bytes; absent for folders.
    pub size: Option<u64>,
    pub entries: Vec<LinkEntry>,
}

impl LinkEntry {
    /// Number of files below this entry, counting itself when it is a file.
    pub fn file_count(&self) -> usize {
        if self.entries.is_empty() {
            1
        } else {
            self.entries.iter().map(Self::file_count).sum()
        }
    }
}

/// Permanent direct download URL returned by the hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDownloadLink(pub String);

impl ResolvedDownloadLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedDownloadLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of asking the hosting service for a direct link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkResolution {
    Resolved(ResolvedDownloadLink),
    /// The service answered but refused; the message is shown to the operator.
    Failed { message: String },
}
