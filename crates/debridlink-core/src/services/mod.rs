//! Core services.
//!
//! Services orchestrate ports and domain logic. They never see HTTP, JSON
//! or concrete directories.

mod pipeline;
mod reclaimer;
mod relay;

pub use pipeline::{FileOutcome, PipelineReport, UploadPipeline};
pub use reclaimer::{InactivityReclaimer, ReclaimDecision, ReclaimReport, reclaim_decision};
pub use relay::{RelayService, RunSummary};
