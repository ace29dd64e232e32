//! Upload-and-resolve pipeline.
//!
//! For each pending torrent, in order:
//!
//! ```text
//! upload ─┬─ envelope rejected ─────────────► stays pending
//!         ├─ file refused ──────────────────► error/
//!         ├─ not ingested yet ──────────────► stays pending
//!         └─ ready ─► detail ─┬─ rejected ──► stays pending
//!                             ├─ not Ready ─► stays pending
//!                             └─ Ready ─► resolve every link ─► finished/
//! ```
//!
//! A link the hosting service refuses is logged and skipped; the torrent is
//! still finished once every link has been attempted. Any port error aborts
//! the whole run.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::{
    LinkResolution, RemoteMagnet, ServiceFault, ServiceReply, TorrentFile, TorrentState,
    UploadOutcome,
};
use crate::ports::{CoreError, DebridPort, LinkSink, ResolverPort, TorrentStore};

/// What happened to one torrent during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The upload envelope was not `success`; retried next run.
    UploadRejected(ServiceFault),
    /// The service refused the torrent itself; moved to the error directory.
    Refused(ServiceFault),
    /// Uploaded but not ingested yet; retried next run.
    NotIngested,
    /// The detail query was not `success`; retried next run.
    DetailUnavailable(ServiceFault),
    /// The magnet exists but is still being fetched; retried next run.
    NotReady { status: String },
    /// Every link was attempted; moved to the finished directory.
    Finished { resolved: usize, failed: usize },
}

impl FileOutcome {
    /// Terminal state the torrent was moved to, if any.
    pub const fn terminal_state(&self) -> Option<TorrentState> {
        match self {
            Self::Refused(_) => Some(TorrentState::Error),
            Self::Finished { .. } => Some(TorrentState::Finished),
            Self::UploadRejected(_)
            | Self::NotIngested
            | Self::DetailUnavailable(_)
            | Self::NotReady { .. } => None,
        }
    }
}

/// Counters from one pipeline pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Torrents found in the watched directory.
    pub scanned: usize,
    pub finished: usize,
    pub errored: usize,
    /// Torrents left pending for the next run.
    pub pending: usize,
    /// Lines appended to the output file.
    pub links_written: usize,
    /// Links the hosting service refused.
    pub links_failed: usize,
}

impl PipelineReport {
    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Finished { resolved, failed } => {
                self.finished += 1;
                self.links_written += resolved;
                self.links_failed += failed;
            }
            FileOutcome::Refused(_) => self.errored += 1,
            FileOutcome::UploadRejected(_)
            | FileOutcome::NotIngested
            | FileOutcome::DetailUnavailable(_)
            | FileOutcome::NotReady { .. } => self.pending += 1,
        }
    }
}

/// Uploads pending torrents and turns finished magnets into direct links.
pub struct UploadPipeline {
    debrid: Arc<dyn DebridPort>,
    resolver: Arc<dyn ResolverPort>,
    store: Arc<dyn TorrentStore>,
    sink: Arc<dyn LinkSink>,
}

impl UploadPipeline {
    pub fn new(
        debrid: Arc<dyn DebridPort>,
        resolver: Arc<dyn ResolverPort>,
        store: Arc<dyn TorrentStore>,
        sink: Arc<dyn LinkSink>,
    ) -> Self {
        Self {
            debrid,
            resolver,
            store,
            sink,
        }
    }

    /// Process every torrent currently in the watched directory.
    pub async fn run(&self) -> Result<PipelineReport, CoreError> {
        info!("##### UploadMagnet Step");
        let files = self.store.scan_pending()?;

        let mut report = PipelineReport {
            scanned: files.len(),
            ..PipelineReport::default()
        };
        for file in &files {
            let outcome = self.process(file).await?;
            report.record(&outcome);
        }

        info!(
            scanned = report.scanned,
            finished = report.finished,
            errored = report.errored,
            pending = report.pending,
            links_written = report.links_written,
            links_failed = report.links_failed,
            "Upload pass complete"
        );
        Ok(report)
    }

    /// Drive one torrent as far as it can go in this run.
    pub async fn process(&self, file: &TorrentFile) -> Result<FileOutcome, CoreError> {
        let name = file.path.display();

        let outcome = match self.debrid.upload_torrent(&file.path).await? {
            ServiceReply::Success(outcome) => outcome,
            ServiceReply::Rejected(fault) => {
                warn!("{name} upload rejected: {fault}");
                return Ok(FileOutcome::UploadRejected(fault));
            }
        };

        let id = match outcome {
            UploadOutcome::Ready(id) => id,
            UploadOutcome::Queued { id } => {
                info!(magnet_id = ?id.map(|id| id.0), "{name} uploaded, not ingested yet");
                return Ok(FileOutcome::NotIngested);
            }
            UploadOutcome::Refused(fault) => {
                error!("{name} refused by ALLDEBRID: {fault}");
                let moved = self.store.relocate(file, TorrentState::Error)?;
                info!("file {name} moved to {}", parent_display(&moved));
                return Ok(FileOutcome::Refused(fault));
            }
        };

        let magnet = match self.debrid.magnet_status(id).await? {
            ServiceReply::Success(magnet) => magnet,
            ServiceReply::Rejected(fault) => {
                warn!(magnet_id = %id, "{name} status unavailable: {fault}");
                return Ok(FileOutcome::DetailUnavailable(fault));
            }
        };

        if !magnet.is_ready() {
            info!(magnet_id = %id, status = %magnet.status, "{name} found but not ready !");
            return Ok(FileOutcome::NotReady {
                status: magnet.status,
            });
        }

        let (resolved, failed) = self.resolve_links(file, &magnet).await?;

        let moved = self.store.relocate(file, TorrentState::Finished)?;
        info!("file {name} moved to {}", parent_display(&moved));
        if failed > 0 {
            warn!(resolved, failed, "{name} finished with unresolved links");
        }

        Ok(FileOutcome::Finished { resolved, failed })
    }

    /// Resolve every link of a ready magnet, one at a time.
    ///
    /// Returns how many links were written and how many were refused.
    async fn resolve_links(
        &self,
        file: &TorrentFile,
        magnet: &RemoteMagnet,
    ) -> Result<(usize, usize), CoreError> {
        let mut resolved = 0;
        let mut failed = 0;

        for link in &magnet.links {
            let file_count: usize = link.entries.iter().map(|e| e.file_count()).sum();

            let Some(code) = link.file_code() else {
                error!(
                    "Error on torrent {}, file: {} - no file code in {}",
                    file.path.display(),
                    link.filename,
                    link.url
                );
                failed += 1;
                continue;
            };

            match self.resolver.resolve(code).await? {
                LinkResolution::Resolved(download) => {
                    self.sink.append(&download)?;
                    info!(file_count, "Write final link {download} for download");
                    resolved += 1;
                }
                LinkResolution::Failed { message } => {
                    error!(
                        "Error on torrent {}, file: {} - {message}",
                        file.path.display(),
                        link.filename
                    );
                    failed += 1;
                }
            }
        }

        Ok((resolved, failed))
    }
}

fn parent_display(file: &TorrentFile) -> String {
    file.path
        .parent()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default()
}
