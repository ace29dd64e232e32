//! Uptobox link endpoint.

use super::ResolverClient;
use crate::error::RemoteResult;
use crate::http::HttpBackend;
use crate::models::UtbLinkReply;
use crate::url::build_link_url;

impl<B: HttpBackend> ResolverClient<B> {
    /// Ask for a direct download link for a hosted file code.
    pub async fn fetch_link(&self, file_code: &str) -> RemoteResult<UtbLinkReply> {
        let url = build_link_url(&self.api, file_code);
        self.backend.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::resolver_api;
    use crate::error::RemoteError;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_link_sends_token_and_code() {
        let backend = FakeBackend::new().with_response(
            "file_code=abc123",
            CannedResponse::json(json!({
                "statusCode": 0,
                "message": "Success",
                "data": {"dlLink": "https://www42.uptobox.com/dl/xyz/file.mkv"}
            })),
        );
        let client = ResolverClient::with_backend(resolver_api(), backend);

        let reply = client.fetch_link("abc123").await.unwrap();
        assert_eq!(
            reply.dl_link(),
            Some("https://www42.uptobox.com/dl/xyz/file.mkv")
        );
        assert!(client.backend.requests()[0].url.contains("token=UTBTOKEN"));
    }

    #[tokio::test]
    async fn test_fetch_link_decode_failure() {
        let backend =
            FakeBackend::new().with_response("link", CannedResponse::raw("Service Unavailable"));
        let client = ResolverClient::with_backend(resolver_api(), backend);

        let err = client.fetch_link("abc123").await.unwrap_err();
        assert!(matches!(err, RemoteError::Decode { .. }));
        assert!(!err.to_string().contains("UTBTOKEN"));
    }
}
