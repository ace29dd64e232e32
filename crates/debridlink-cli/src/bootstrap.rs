//! CLI bootstrap - the composition root.
//!
//! This is the only place where concrete adapters are chosen:
//! - AllDebrid and Uptobox clients (via debridlink-remote)
//! - Torrent directories and the output file (via debridlink-core `fs`)
//! - The system clock
//!
//! `main` gets back a fully wired [`RelayService`] and only calls `run_once`.

use std::path::Path;
use std::sync::Arc;

use debridlink_core::{
    FsTorrentStore, OutputFile, RelayConfig, RelayPorts, RelayService, SystemClock, TorrentLayout,
};
use debridlink_remote::{
    DebridClientConfig, DefaultDebridClient, DefaultResolverClient, ResolverClientConfig,
};
use tracing::{debug, info};

use crate::error::CliError;

/// Load the config at `config_path` and wire every port.
pub fn bootstrap(config_path: &Path) -> Result<RelayService, CliError> {
    let config = RelayConfig::load(config_path)?;
    info!(config = %config_path.display(), "Configuration loaded");
    build_service(&config)
}

fn build_service(config: &RelayConfig) -> Result<RelayService, CliError> {
    let debrid_config = DebridClientConfig::from_relay_config(config);
    debug!(?debrid_config, "AllDebrid client");
    let debrid = DefaultDebridClient::new(&debrid_config)?;

    let resolver = DefaultResolverClient::new(&ResolverClientConfig::from_relay_config(config))?;

    let ports = RelayPorts {
        debrid: Arc::new(debrid),
        resolver: Arc::new(resolver),
        store: Arc::new(FsTorrentStore::new(TorrentLayout::from_config(config))),
        sink: Arc::new(OutputFile::new(&config.output_file)),
        clock: Arc::new(SystemClock),
    };

    Ok(RelayService::new(ports, config.expiration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_config(dir: &Path, alldebrid_base_url: &str) -> PathBuf {
        let root = dir.display();
        let body = format!(
            r#"{{
                "alldebrid_agent": "debridlink",
                "alldebrid_api_key": "ad-key",
                "utb_api_key": "utb-key",
                "torrent_directory": "{root}/watch",
                "finished_directory": "{root}/finished",
                "error_directory": "{root}/error",
                "expired_directory": "{root}/expired",
                "expiration_time": "72h",
                "output_file": "{root}/links.txt",
                "alldebrid_base_url": "{alldebrid_base_url}"
            }}"#
        );
        let path = dir.join("config.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_bootstrap_wires_a_service() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "https://api.alldebrid.com/v4");

        assert!(bootstrap(&path).is_ok());
        // Wiring alone must not touch the layout
        assert!(!dir.path().join("finished").exists());
    }

    #[test]
    fn test_missing_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = bootstrap(&dir.path().join("absent.json")).unwrap_err();

        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_unusable_base_url_is_a_config_exit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "ftp://api.alldebrid.com/v4");

        let err = bootstrap(&path).unwrap_err();
        assert!(matches!(err, CliError::Remote(_)));
        assert_eq!(err.exit_code(), 78);
    }
}
