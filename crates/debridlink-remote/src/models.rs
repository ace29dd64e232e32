//! Internal wire types for the AllDebrid and Uptobox APIs.
//!
//! These types are internal to `debridlink-remote`. Consumers only ever see
//! the domain types from `debridlink-core`. Fields the pipeline does not use
//! (seeders, speeds, hashes) are not modelled and are ignored on decode.

use serde::Deserialize;
use url::Url;

// ============================================================================
// Internal configuration (see config.rs for the public builders)
// ============================================================================

/// Parsed AllDebrid endpoint and credentials.
#[derive(Debug, Clone)]
pub struct DebridApi {
    pub base_url: Url,
    pub agent: String,
    pub api_key: String,
}

/// Parsed Uptobox endpoint and token.
#[derive(Debug, Clone)]
pub struct ResolverApi {
    pub base_url: Url,
    pub token: String,
}

// ============================================================================
// AllDebrid
// ============================================================================

/// `status` value of an accepted AllDebrid reply.
pub const STATUS_SUCCESS: &str = "success";

/// Every AllDebrid reply: `{"status": "...", "data": {...}, "error": {...}}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    /// Missing on error replies.
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Error object of a refused request or a refused upload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `data` of `magnet/status` without `id`.
#[derive(Debug, Deserialize)]
pub struct MagnetListData {
    #[serde(default)]
    pub magnets: Vec<MagnetDto>,
}

/// `data` of `magnet/status?id=`: `magnets` is a single object there.
#[derive(Debug, Deserialize)]
pub struct MagnetDetailData {
    pub magnets: MagnetDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnetDto {
    pub id: u64,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_code: i32,
    #[serde(default)]
    pub downloaded: u64,
    /// Unix seconds.
    #[serde(default)]
    pub upload_date: i64,
    #[serde(default)]
    pub links: Vec<LinkDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkDto {
    pub link: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub files: Vec<LinkFileDto>,
}

/// Entry of a hosted link's file tree: name, size, children.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkFileDto {
    pub n: String,
    #[serde(default)]
    pub s: Option<u64>,
    #[serde(default)]
    pub e: Vec<LinkFileDto>,
}

/// `data` of `magnet/upload/file`.
#[derive(Debug, Deserialize)]
pub struct UploadData {
    #[serde(default)]
    pub files: Vec<UploadedFileDto>,
}

#[derive(Debug, Deserialize)]
pub struct UploadedFileDto {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

// ============================================================================
// Uptobox
// ============================================================================

/// Reply of `GET /link`.
///
/// `data` is an object with `dlLink` on success but may be a bare string or
/// absent on error, so it stays untyped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtbLinkReply {
    pub status_code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl UtbLinkReply {
    pub fn dl_link(&self) -> Option<&str> {
        self.data
            .get("dlLink")
            .and_then(serde_json::Value::as_str)
            .filter(|link| !link.is_empty())
    }
}
