//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// One reclaim-and-upload pass over the watched torrent directory.
#[derive(Debug, Parser)]
#[command(name = "debridlink")]
#[command(about = "Push torrents through AllDebrid and collect Uptobox download links")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(
        short = 'c',
        long = "config",
        env = "DEBRIDLINK_CONFIG",
        default_value = "config.json"
    )]
    pub config: PathBuf,

    /// Log file, appended to on every run
    #[arg(long = "log-file", default_value = "debridlink.log")]
    pub log_file: PathBuf,
}
