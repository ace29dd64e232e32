//! Domain types for the magnet lifecycle.
//!
//! These are pure data types with no I/O. Remote wire formats live in
//! `debridlink-remote` and are converted into these at the port boundary.

mod magnet;
mod reply;
mod torrent;

pub use magnet::{
    Link, LinkEntry, LinkResolution, MagnetId, MagnetStatusCode, RemoteMagnet,
    ResolvedDownloadLink, StatusClass,
};
pub use reply::{ServiceFault, ServiceReply, UploadOutcome};
pub use torrent::{TorrentFile, TorrentState};
