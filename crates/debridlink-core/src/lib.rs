#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod fs;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ProxyKind, ProxySettings, RelayConfig, parse_duration};
pub use domain::{
    Link, LinkEntry, LinkResolution, MagnetId, MagnetStatusCode, RemoteMagnet,
    ResolvedDownloadLink, ServiceFault, ServiceReply, StatusClass, TorrentFile, TorrentState,
    UploadOutcome,
};
pub use fs::{FsTorrentStore, OutputFile, TorrentLayout};
pub use ports::{
    Clock, CoreError, DebridPort, LinkSink, RelayPorts, RemotePortError, RemotePortResult,
    ResolverPort, StoreError, SystemClock, TorrentStore,
};
pub use services::{
    FileOutcome, InactivityReclaimer, PipelineReport, ReclaimDecision, ReclaimReport,
    RelayService, RunSummary, UploadPipeline, reclaim_decision,
};
