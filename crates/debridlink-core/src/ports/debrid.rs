//! Debrid service port trait.

use std::path::Path;

use async_trait::async_trait;

use super::remote_error::RemotePortResult;
use crate::domain::{MagnetId, RemoteMagnet, ServiceReply, UploadOutcome};

/// Port trait for the debrid service's magnet endpoints.
///
/// The implementation lives in `debridlink-remote`.
///
/// # Design
///
/// - Business refusals come back as `ServiceReply::Rejected`
/// - `Err` means transport, HTTP status or decode failure; the run aborts
/// - No retries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DebridPort: Send + Sync {
    /// All magnets on the account, in summary form (no links).
    async fn list_magnets(&self) -> RemotePortResult<ServiceReply<Vec<RemoteMagnet>>>;

    /// One magnet in detail form, including its links once ready.
    async fn magnet_status(&self, id: MagnetId) -> RemotePortResult<ServiceReply<RemoteMagnet>>;

    /// Upload a `.torrent` file.
    async fn upload_torrent(&self, path: &Path) -> RemotePortResult<ServiceReply<UploadOutcome>>;

    /// Delete a magnet on the service.
    async fn delete_magnet(&self, id: MagnetId) -> RemotePortResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn DebridPort>) {}
}
