//! `RelayService` - one full run.
//!
//! A run prepares the directory layout, reclaims inactive torrents and
//! magnets, then uploads and resolves whatever is still pending. Steps are
//! strictly sequential and the first fatal error ends the run.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::{InactivityReclaimer, PipelineReport, ReclaimReport, UploadPipeline};
use crate::ports::{CoreError, RelayPorts, TorrentStore};

/// Totals from one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reclaim: ReclaimReport,
    pub pipeline: PipelineReport,
}

/// Facade over the reclaimer and the upload pipeline.
///
/// # Example
///
/// ```ignore
/// let ports = RelayPorts { debrid, resolver, store, sink, clock };
/// let summary = RelayService::new(ports, config.expiration).run_once().await?;
/// ```
pub struct RelayService {
    store: Arc<dyn TorrentStore>,
    reclaimer: InactivityReclaimer,
    pipeline: UploadPipeline,
}

impl fmt::Debug for RelayService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayService").finish_non_exhaustive()
    }
}

impl RelayService {
    pub fn new(ports: RelayPorts, expiration: Duration) -> Self {
        let reclaimer = InactivityReclaimer::new(
            ports.debrid.clone(),
            ports.store.clone(),
            ports.clock,
            expiration,
        );
        let pipeline = UploadPipeline::new(
            ports.debrid,
            ports.resolver,
            ports.store.clone(),
            ports.sink,
        );
        Self {
            store: ports.store,
            reclaimer,
            pipeline,
        }
    }

    /// Layout, reclaim, then upload.
    pub async fn run_once(&self) -> Result<RunSummary, CoreError> {
        self.store.ensure_layout()?;

        let reclaim = self.reclaimer.run().await?;
        let pipeline = self.pipeline.run().await?;

        info!(
            expired = reclaim.expired_files,
            deleted = reclaim.deleted_magnets,
            finished = pipeline.finished,
            errored = pipeline.errored,
            pending = pipeline.pending,
            links = pipeline.links_written,
            "Run complete"
        );
        Ok(RunSummary { reclaim, pipeline })
    }
}
