//! AllDebrid magnet endpoints.

use std::path::Path;

use debridlink_core::MagnetId;

use super::DebridClient;
use crate::error::{RemoteError, RemoteResult};
use crate::http::{FileUpload, HttpBackend};
use crate::models::{Envelope, MagnetDetailData, MagnetListData, UploadData};
use crate::url::{build_delete_url, build_status_url, build_upload_url};

/// Multipart field the upload endpoint reads the torrent from.
const UPLOAD_FIELD: &str = "files[0]";

impl<B: HttpBackend> DebridClient<B> {
    /// Every magnet on the account, summary form.
    pub async fn fetch_magnets(&self) -> RemoteResult<Envelope<MagnetListData>> {
        let url = build_status_url(&self.api, None);
        self.backend.get_json(&url).await
    }

    /// One magnet, with its hosted links.
    pub async fn fetch_magnet(&self, id: MagnetId) -> RemoteResult<Envelope<MagnetDetailData>> {
        let url = build_status_url(&self.api, Some(id));
        self.backend.get_json(&url).await
    }

    /// Read a torrent file fully and upload it.
    pub async fn upload_file(&self, path: &Path) -> RemoteResult<Envelope<UploadData>> {
        let read_error = |source| RemoteError::ReadUpload {
            path: path.to_path_buf(),
            source,
        };

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                read_error(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path has no file name",
                ))
            })?;
        let body = tokio::fs::read(path).await.map_err(read_error)?;

        let upload = FileUpload {
            field: UPLOAD_FIELD,
            file_name,
            body,
        };
        self.backend
            .post_file_json(&build_upload_url(&self.api), upload)
            .await
    }

    /// Delete a magnet. Only the HTTP status and JSON shape are checked here.
    pub async fn delete(&self, id: MagnetId) -> RemoteResult<Envelope<serde_json::Value>> {
        let url = build_delete_url(&self.api, id);
        self.backend.get_json(&url).await
    }
}
