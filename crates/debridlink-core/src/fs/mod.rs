//! Filesystem implementations of the store ports.
//!
//! - `TorrentLayout`: the watched directory and the terminal directories
//! - `FsTorrentStore`: scanning and moving torrent files
//! - `OutputFile`: append-only list of resolved links

mod layout;
mod output;
mod store;

pub use layout::TorrentLayout;
pub use output::OutputFile;
pub use store::{FsTorrentStore, TORRENT_EXTENSION};
