//! Scripted fakes for the debrid, resolver and clock ports.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use debridlink_core::{
    Clock, DebridPort, LinkResolution, MagnetId, RemoteMagnet, RemotePortError, RemotePortResult,
    ResolvedDownloadLink, ResolverPort, ServiceReply, UploadOutcome,
};

/// Debrid service driven by canned replies, recording every call.
#[derive(Default)]
pub struct FakeDebrid {
    /// Reply to `list_magnets`.
    pub magnets: Vec<RemoteMagnet>,
    /// Upload reply keyed by torrent file name.
    pub uploads: HashMap<String, UploadOutcome>,
    /// Status reply keyed by magnet id.
    pub details: HashMap<u64, RemoteMagnet>,
    calls: Mutex<Vec<String>>,
    deleted: Mutex<Vec<MagnetId>>,
}

impl FakeDebrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_magnet(mut self, magnet: RemoteMagnet) -> Self {
        self.magnets.push(magnet);
        self
    }

    pub fn with_upload(mut self, file_name: &str, outcome: UploadOutcome) -> Self {
        self.uploads.insert(file_name.to_string(), outcome);
        self
    }

    pub fn with_detail(mut self, magnet: RemoteMagnet) -> Self {
        self.details.insert(magnet.id.0, magnet);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<MagnetId> {
        self.deleted.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DebridPort for FakeDebrid {
    async fn list_magnets(&self) -> RemotePortResult<ServiceReply<Vec<RemoteMagnet>>> {
        self.record("list".to_string());
        Ok(ServiceReply::Success(self.magnets.clone()))
    }

    async fn magnet_status(&self, id: MagnetId) -> RemotePortResult<ServiceReply<RemoteMagnet>> {
        self.record(format!("status {id}"));
        self.details
            .get(&id.0)
            .cloned()
            .map(ServiceReply::Success)
            .ok_or_else(|| RemotePortError::InvalidResponse {
                message: format!("no magnet {id}"),
            })
    }

    async fn upload_torrent(&self, path: &Path) -> RemotePortResult<ServiceReply<UploadOutcome>> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.record(format!("upload {name}"));
        self.uploads
            .get(&name)
            .cloned()
            .map(ServiceReply::Success)
            .ok_or_else(|| RemotePortError::Transport {
                message: format!("unexpected upload of {name}"),
            })
    }

    async fn delete_magnet(&self, id: MagnetId) -> RemotePortResult<()> {
        self.record(format!("delete {id}"));
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}

/// Hosting service resolving file codes from a fixed table.
///
/// Unknown codes are refused the way the real service refuses a missing file.
#[derive(Default)]
pub struct FakeResolver {
    links: HashMap<String, String>,
    resolved: Mutex<Vec<String>>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link(mut self, file_code: &str, download: &str) -> Self {
        self.links
            .insert(file_code.to_string(), download.to_string());
        self
    }

    pub fn resolved(&self) -> Vec<String> {
        self.resolved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResolverPort for FakeResolver {
    async fn resolve(&self, file_code: &str) -> RemotePortResult<LinkResolution> {
        self.resolved.lock().unwrap().push(file_code.to_string());
        Ok(match self.links.get(file_code) {
            Some(url) => LinkResolution::Resolved(ResolvedDownloadLink(url.clone())),
            None => LinkResolution::Failed {
                message: "File not found".to_string(),
            },
        })
    }
}

/// Clock frozen at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
