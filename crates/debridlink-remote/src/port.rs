//! Port trait implementations for the remote clients.
//!
//! This module implements the core-owned `DebridPort` and `ResolverPort`
//! traits, converting wire replies into domain values and internal errors
//! into `RemotePortError`.

use std::path::Path;

use async_trait::async_trait;
use chrono::DateTime;
use debridlink_core::{
    DebridPort, Link, LinkEntry, LinkResolution, MagnetId, MagnetStatusCode, RemoteMagnet,
    RemotePortError, RemotePortResult, ResolvedDownloadLink, ResolverPort, ServiceFault,
    ServiceReply, UploadOutcome,
};
use tracing::warn;

use crate::client::{DebridClient, ResolverClient};
use crate::error::{RemoteError, RemoteResult};
use crate::http::HttpBackend;
use crate::models::{ApiError, Envelope, LinkDto, LinkFileDto, MagnetDto, UploadData, UtbLinkReply};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `RemoteError` to core `RemotePortError`.
pub(crate) fn map_error(err: RemoteError) -> RemotePortError {
    match err {
        RemoteError::HttpStatus { status, endpoint } => {
            RemotePortError::HttpStatus { status, endpoint }
        }
        RemoteError::Network { endpoint, source } => RemotePortError::Transport {
            message: format!("{endpoint}: {source}"),
        },
        RemoteError::Decode { endpoint, source } => RemotePortError::Decode {
            endpoint,
            message: source.to_string(),
        },
        RemoteError::InvalidResponse { message } => RemotePortError::InvalidResponse { message },
        RemoteError::InvalidUrl(e) => RemotePortError::Configuration {
            message: format!("invalid base URL: {e}"),
        },
        RemoteError::Client { message } => RemotePortError::Configuration { message },
        err @ RemoteError::ReadUpload { .. } => RemotePortError::Configuration {
            message: err.to_string(),
        },
    }
}

// ============================================================================
// Type Conversions
// ============================================================================

fn to_fault(status: &str, error: Option<ApiError>) -> ServiceFault {
    let error = error.unwrap_or_default();
    ServiceFault {
        status: status.to_string(),
        code: error.code,
        message: error.message,
    }
}

/// Unwrap an AllDebrid envelope: refusals become values, a successful reply
/// without `data` is invalid.
fn into_reply<T, U>(
    envelope: Envelope<T>,
    what: &str,
    convert: impl FnOnce(T) -> RemoteResult<U>,
) -> RemoteResult<ServiceReply<U>> {
    if !envelope.is_success() {
        return Ok(ServiceReply::Rejected(to_fault(&envelope.status, envelope.error)));
    }

    let data = envelope
        .data
        .ok_or_else(|| RemoteError::invalid(format!("{what} reply has no data")))?;
    convert(data).map(ServiceReply::Success)
}

fn to_entry(dto: LinkFileDto) -> LinkEntry {
    LinkEntry {
        name: dto.n,
        size: dto.s,
        entries: dto.e.into_iter().map(to_entry).collect(),
    }
}

fn to_link(dto: LinkDto) -> Link {
    Link {
        url: dto.link,
        filename: dto.filename,
        size: dto.size,
        entries: dto.files.into_iter().map(to_entry).collect(),
    }
}

fn to_remote_magnet(dto: MagnetDto) -> RemoteResult<RemoteMagnet> {
    let uploaded_at = DateTime::from_timestamp(dto.upload_date, 0).ok_or_else(|| {
        RemoteError::invalid(format!(
            "magnet {} has an out of range uploadDate {}",
            dto.id, dto.upload_date
        ))
    })?;

    Ok(RemoteMagnet {
        id: MagnetId(dto.id),
        filename: dto.filename,
        size: dto.size,
        status: dto.status,
        status_code: MagnetStatusCode(dto.status_code),
        downloaded: dto.downloaded,
        uploaded_at,
        links: dto.links.into_iter().map(to_link).collect(),
    })
}

/// Interpret `files[0]` of an accepted upload.
fn to_upload_outcome(data: UploadData) -> RemoteResult<UploadOutcome> {
    let file = data
        .files
        .into_iter()
        .next()
        .ok_or_else(|| RemoteError::invalid("upload reply lists no files"))?;

    if let Some(error) = file.error {
        return Ok(UploadOutcome::Refused(to_fault("", Some(error))));
    }

    let id = file.id.map(MagnetId);
    if !file.ready {
        return Ok(UploadOutcome::Queued { id });
    }
    id.map(UploadOutcome::Ready).ok_or_else(|| {
        RemoteError::invalid(format!("{} is ready but has no magnet id", file.file))
    })
}

fn to_resolution(reply: UtbLinkReply) -> RemoteResult<LinkResolution> {
    if reply.status_code != 0 {
        let message = reply
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("statusCode {}", reply.status_code));
        return Ok(LinkResolution::Failed { message });
    }

    reply
        .dl_link()
        .map(|link| LinkResolution::Resolved(ResolvedDownloadLink(link.to_string())))
        .ok_or_else(|| RemoteError::invalid("link reply has statusCode 0 but no dlLink"))
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend> DebridPort for DebridClient<B> {
    async fn list_magnets(&self) -> RemotePortResult<ServiceReply<Vec<RemoteMagnet>>> {
        let envelope = self.fetch_magnets().await.map_err(map_error)?;
        into_reply(envelope, "magnet list", |data| {
            data.magnets.into_iter().map(to_remote_magnet).collect()
        })
        .map_err(map_error)
    }

    async fn magnet_status(&self, id: MagnetId) -> RemotePortResult<ServiceReply<RemoteMagnet>> {
        let envelope = self.fetch_magnet(id).await.map_err(map_error)?;
        into_reply(envelope, "magnet status", |data| to_remote_magnet(data.magnets))
            .map_err(map_error)
    }

    async fn upload_torrent(&self, path: &Path) -> RemotePortResult<ServiceReply<UploadOutcome>> {
        let envelope = self.upload_file(path).await.map_err(map_error)?;
        into_reply(envelope, "upload", to_upload_outcome).map_err(map_error)
    }

    async fn delete_magnet(&self, id: MagnetId) -> RemotePortResult<()> {
        let envelope = self.delete(id).await.map_err(map_error)?;
        if !envelope.is_success() {
            warn!(
                magnet_id = %id,
                "ALLDEBRID - delete not acknowledged: {}",
                to_fault(&envelope.status, envelope.error)
            );
        }
        Ok(())
    }
}

#[async_trait]
impl<B: HttpBackend> ResolverPort for ResolverClient<B> {
    async fn resolve(&self, file_code: &str) -> RemotePortResult<LinkResolution> {
        let reply = self.fetch_link(file_code).await.map_err(map_error)?;
        to_resolution(reply).map_err(map_error)
    }
}
