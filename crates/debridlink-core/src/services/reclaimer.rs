//! Inactivity reclaimer.
//!
//! Runs before the pipeline and bounds stale work in two sweeps:
//!
//! 1. Filesystem: pending torrents last modified at or before the cutoff are
//!    moved to the expired directory.
//! 2. Remote: magnets that are not ready are deleted when the service marked
//!    them inactive (code 10), or when they were uploaded at or before the
//!    cutoff and have downloaded nothing.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::{RemoteMagnet, ServiceReply, StatusClass, TorrentState};
use crate::ports::{Clock, CoreError, DebridPort, RemotePortError, StoreError, TorrentStore};

/// What the remote sweep does with one magnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReclaimDecision {
    /// Ready, progressing, or still within the expiration window.
    Keep,
    /// The service reported the magnet inactive.
    DeleteInactive,
    /// Queued past the cutoff without downloading a single byte.
    DeleteStalled,
    /// Terminal error on the service side; logged, left alone.
    ReportFailure,
}

impl ReclaimDecision {
    pub const fn deletes(self) -> bool {
        matches!(self, Self::DeleteInactive | Self::DeleteStalled)
    }
}

/// Decide the fate of a magnet given the cutoff (unix seconds).
///
/// Code 10 is checked first and wins over the age and progress check.
pub fn reclaim_decision(magnet: &RemoteMagnet, cutoff: i64) -> ReclaimDecision {
    if magnet.is_ready() {
        return ReclaimDecision::Keep;
    }

    match magnet.status_code.class() {
        StatusClass::Inactive => ReclaimDecision::DeleteInactive,
        StatusClass::Failed => ReclaimDecision::ReportFailure,
        StatusClass::InProgress => {
            if magnet.uploaded_at.timestamp() <= cutoff && magnet.downloaded == 0 {
                ReclaimDecision::DeleteStalled
            } else {
                ReclaimDecision::Keep
            }
        }
    }
}

/// Counters from one reclaimer pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReclaimReport {
    /// Pending torrents moved to the expired directory.
    pub expired_files: usize,
    /// Magnets deleted on the debrid service.
    pub deleted_magnets: usize,
    /// Magnets left in a terminal error state.
    pub failed_magnets: usize,
}

/// Sweeps stale pending torrents and inactive magnets.
pub struct InactivityReclaimer {
    debrid: Arc<dyn DebridPort>,
    store: Arc<dyn TorrentStore>,
    clock: Arc<dyn Clock>,
    expiration: Duration,
}

impl InactivityReclaimer {
    pub fn new(
        debrid: Arc<dyn DebridPort>,
        store: Arc<dyn TorrentStore>,
        clock: Arc<dyn Clock>,
        expiration: Duration,
    ) -> Self {
        Self {
            debrid,
            store,
            clock,
            expiration,
        }
    }

    /// `now - expiration`, in unix seconds.
    pub fn cutoff(&self) -> i64 {
        let window = i64::try_from(self.expiration.as_secs()).unwrap_or(i64::MAX);
        self.clock.now().timestamp().saturating_sub(window)
    }

    /// Run the filesystem sweep, then the remote sweep.
    pub async fn run(&self) -> Result<ReclaimReport, CoreError> {
        info!("##### CleanInactiveMagnet Step");
        let cutoff = self.cutoff();

        let expired_files = self.sweep_filesystem(cutoff)?;
        let mut report = self.sweep_remote(cutoff).await?;
        report.expired_files = expired_files;

        info!(
            expired_files = report.expired_files,
            deleted_magnets = report.deleted_magnets,
            failed_magnets = report.failed_magnets,
            "Reclaim pass complete"
        );
        Ok(report)
    }

    /// Move pending torrents modified at or before `cutoff` to the expired directory.
    pub fn sweep_filesystem(&self, cutoff: i64) -> Result<usize, StoreError> {
        let mut expired = 0;
        for file in self.store.scan_pending()? {
            if !file.modified_at_or_before(cutoff) {
                continue;
            }
            warn!("FILESYSTEM - REMOVE INACTIVE {}", file.path.display());
            self.store.relocate(&file, TorrentState::Expired)?;
            expired += 1;
        }
        Ok(expired)
    }

    /// Delete inactive or stalled magnets on the debrid service.
    ///
    /// The returned report has `expired_files` left at zero.
    pub async fn sweep_remote(&self, cutoff: i64) -> Result<ReclaimReport, RemotePortError> {
        let mut report = ReclaimReport::default();

        let magnets = match self.debrid.list_magnets().await? {
            ServiceReply::Success(magnets) => magnets,
            ServiceReply::Rejected(fault) => {
                warn!("ALLDEBRID - magnet list unavailable ({fault}), skipping remote sweep");
                return Ok(report);
            }
        };

        for magnet in &magnets {
            match reclaim_decision(magnet, cutoff) {
                ReclaimDecision::Keep => {}
                ReclaimDecision::ReportFailure => {
                    error!(
                        id = %magnet.id,
                        status = %magnet.status,
                        status_code = %magnet.status_code,
                        "ALLDEBRID - magnet in error state: {}",
                        magnet.filename
                    );
                    report.failed_magnets += 1;
                }
                decision @ (ReclaimDecision::DeleteInactive | ReclaimDecision::DeleteStalled) => {
                    warn!(
                        id = %magnet.id,
                        reason = ?decision,
                        "ALLDEBRID - REMOVE INACTIVE {}",
                        magnet.filename
                    );
                    self.debrid.delete_magnet(magnet.id).await?;
                    report.deleted_magnets += 1;
                }
            }
        }

        Ok(report)
    }
}
