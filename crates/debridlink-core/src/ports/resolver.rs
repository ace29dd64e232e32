//! Hosting service port trait.

use async_trait::async_trait;

use super::remote_error::RemotePortResult;
use crate::domain::LinkResolution;

/// Port trait for turning a hosted file code into a direct download link.
///
/// A refusal from the service (`statusCode == 1`) is `LinkResolution::Failed`
/// and only affects that one link. `Err` aborts the run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResolverPort: Send + Sync {
    async fn resolve(&self, file_code: &str) -> RemotePortResult<LinkResolution>;
}
