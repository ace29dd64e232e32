//! HTTP backend abstraction for the remote clients.
//!
//! The clients are generic over [`HttpBackend`] so tests can swap in a fake
//! that serves canned JSON. The production backend wraps one pooled reqwest
//! client; the debrid client gets one routed through the optional proxy, the
//! resolver gets a direct one.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::TransportConfig;
use crate::error::{RemoteError, RemoteResult};
use crate::url::redact;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// A file sent as one part of a multipart form.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Form field name
    pub field: &'static str,
    /// File name reported in the part's content disposition
    pub file_name: String,
    pub body: Vec<u8>,
}

/// Trait for HTTP backends that return decoded JSON.
///
/// Implementations must treat any status other than 200 as
/// [`RemoteError::HttpStatus`] and must never put the query string of
/// `url` into an error.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// `GET` a URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> RemoteResult<T>;

    /// `POST` a single-file multipart form and decode the JSON body.
    async fn post_file_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        upload: FileUpload,
    ) -> RemoteResult<T>;
}

/// Fail on anything but 200.
fn check_status(status: u16, endpoint: &str) -> RemoteResult<()> {
    if status == 200 {
        Ok(())
    } else {
        Err(RemoteError::HttpStatus {
            status,
            endpoint: endpoint.to_string(),
        })
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8], endpoint: &str) -> RemoteResult<T> {
    serde_json::from_slice(body).map_err(|source| RemoteError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production backend over a pooled reqwest client.
///
/// No retries: every failure is reported to the caller, which aborts the run.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Build the client, routed through `proxy_url` when given.
    ///
    /// Without a proxy the client also ignores proxy environment variables.
    pub fn new(transport: &TransportConfig, proxy_url: Option<&str>) -> RemoteResult<Self> {
        let builder = reqwest::Client::builder()
            .pool_idle_timeout(transport.idle_timeout)
            .pool_max_idle_per_host(transport.max_idle_per_host)
            .user_agent(transport.user_agent.as_str())
            .no_gzip();
        let builder = match transport.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        let builder = match proxy_url {
            Some(proxy_url) => {
                let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| RemoteError::Client {
                    message: format!("invalid proxy: {}", e.without_url()),
                })?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let client = builder.build().map_err(|e| RemoteError::Client {
            message: e.without_url().to_string(),
        })?;
        Ok(Self { client })
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        endpoint: &str,
    ) -> RemoteResult<T> {
        let status = response.status().as_u16();
        debug!(endpoint, status, "Response received");
        check_status(status, endpoint)?;

        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::network(endpoint, e))?;
        decode_body(&body, endpoint)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> RemoteResult<T> {
        let endpoint = redact(url);
        debug!(endpoint = %endpoint, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RemoteError::network(&endpoint, e))?;
        Self::read_json(response, &endpoint).await
    }

    async fn post_file_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        upload: FileUpload,
    ) -> RemoteResult<T> {
        let endpoint = redact(url);
        debug!(
            endpoint = %endpoint,
            file = %upload.file_name,
            bytes = upload.body.len(),
            "POST multipart"
        );

        let part = reqwest::multipart::Part::bytes(upload.body).file_name(upload.file_name);
        let form = reqwest::multipart::Form::new().part(upload.field, part);

        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| RemoteError::network(&endpoint, e))?;
        Self::read_json(response, &endpoint).await
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_status_only_accepts_200() {
        assert!(check_status(200, "x").is_ok());
        assert!(matches!(
            check_status(204, "x"),
            Err(RemoteError::HttpStatus { status: 204, .. })
        ));
    }

    #[test]
    fn test_reqwest_backend_direct() {
        assert!(ReqwestBackend::new(&TransportConfig::default(), None).is_ok());
    }

    #[test]
    fn test_reqwest_backend_with_request_timeout() {
        let transport = TransportConfig {
            timeout: Some(std::time::Duration::from_secs(5)),
            ..TransportConfig::default()
        };
        assert!(ReqwestBackend::new(&transport, None).is_ok());
    }

    #[test]
    fn test_reqwest_backend_with_socks_proxy() {
        let backend =
            ReqwestBackend::new(&TransportConfig::default(), Some("socks5h://127.0.0.1:1080"));
        assert!(backend.is_ok());
    }

    #[test]
    fn test_reqwest_backend_rejects_bad_proxy() {
        let backend = ReqwestBackend::new(&TransportConfig::default(), Some("::not a proxy::"));
        assert!(matches!(backend, Err(RemoteError::Client { .. })));
    }

    #[tokio::test]
    async fn test_fake_backend_longest_match_wins() {
        let backend = FakeBackend::new()
            .with_response("magnet/status", CannedResponse::json(json!({"which": "list"})))
            .with_response("magnet/status?id", CannedResponse::json(json!({"which": "one"})));

        let url = Url::parse("https://api.example/v4/magnet/status?id=3").unwrap();
        let reply: serde_json::Value = backend.get_json(&url).await.unwrap();
        assert_eq!(reply["which"], "one");
    }

    #[tokio::test]
    async fn test_fake_backend_errors_hide_query() {
        let backend = FakeBackend::new().with_response("broken", CannedResponse::raw("<html>"));

        let url = Url::parse("https://api.example/broken?apikey=secret").unwrap();
        let result: RemoteResult<serde_json::Value> = backend.get_json(&url).await;
        let err = result.unwrap_err();
        assert!(matches!(err, RemoteError::Decode { .. }));
        assert!(!err.to_string().contains("secret"));

        let missing = Url::parse("https://api.example/missing?apikey=secret").unwrap();
        let result: RemoteResult<serde_json::Value> = backend.get_json(&missing).await;
        let err = result.unwrap_err();
        assert!(matches!(err, RemoteError::HttpStatus { status: 404, .. }));
        assert!(!err.to_string().contains("secret"));
    }
}
