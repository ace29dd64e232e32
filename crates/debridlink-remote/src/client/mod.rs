//! Clients for the AllDebrid and Uptobox APIs.
//!
//! Each client only knows how to reach its endpoints and decode the wire
//! types. Conversion to domain types happens in `port.rs`.

mod debrid;
mod resolver;

use debridlink_core::RemotePortError;
use tracing::info;

use crate::config::{DebridClientConfig, ResolverClientConfig};
use crate::error::RemoteResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{DebridApi, ResolverApi};
use crate::port::map_error;
use crate::url::{build_proxy_url, parse_base_url};

// ============================================================================
// Type Aliases
// ============================================================================

/// AllDebrid client over the reqwest backend.
pub type DefaultDebridClient = DebridClient<ReqwestBackend>;

/// Uptobox client over the reqwest backend.
pub type DefaultResolverClient = ResolverClient<ReqwestBackend>;

// ============================================================================
// Clients
// ============================================================================

/// Client for the AllDebrid magnet API.
///
/// Generic over the HTTP backend for testing. Use [`DefaultDebridClient`]
/// and the `DebridPort` trait from production code.
pub struct DebridClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) api: DebridApi,
}

/// Client for the Uptobox link API.
pub struct ResolverClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) api: ResolverApi,
}

impl DefaultDebridClient {
    /// Build the client, including its proxy route when one is enabled.
    pub fn new(config: &DebridClientConfig) -> Result<Self, RemotePortError> {
        Self::build(config).map_err(map_error)
    }

    fn build(config: &DebridClientConfig) -> RemoteResult<Self> {
        let api = DebridApi {
            base_url: parse_base_url(&config.base_url)?,
            agent: config.agent.clone(),
            api_key: config.api_key.clone(),
        };

        let proxy_url = build_proxy_url(&config.proxy);
        if proxy_url.is_some() {
            info!(
                proxy = %config.proxy.address(),
                authenticated = config.proxy.credentials().is_some(),
                "ALLDEBRID - using SOCKS5 proxy"
            );
        }

        let backend = ReqwestBackend::new(&config.transport, proxy_url.as_deref())?;
        Ok(Self { backend, api })
    }
}

impl DefaultResolverClient {
    /// Build a direct (never proxied) client.
    pub fn new(config: &ResolverClientConfig) -> Result<Self, RemotePortError> {
        Self::build(config).map_err(map_error)
    }

    fn build(config: &ResolverClientConfig) -> RemoteResult<Self> {
        let api = ResolverApi {
            base_url: parse_base_url(&config.base_url)?,
            token: config.token.clone(),
        };
        let backend = ReqwestBackend::new(&config.transport, None)?;
        Ok(Self { backend, api })
    }
}

impl<B: HttpBackend> DebridClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(api: DebridApi, backend: B) -> Self {
        Self { backend, api }
    }
}

impl<B: HttpBackend> ResolverClient<B> {
    #[cfg(test)]
    pub(crate) const fn with_backend(api: ResolverApi, backend: B) -> Self {
        Self { backend, api }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use debridlink_core::{ProxyKind, ProxySettings};
    use url::Url;

    pub fn debrid_api() -> DebridApi {
        DebridApi {
            base_url: Url::parse("https://api.alldebrid.com/v4").unwrap(),
            agent: "debridlink".to_string(),
            api_key: "KEY123".to_string(),
        }
    }

    pub fn resolver_api() -> ResolverApi {
        ResolverApi {
            base_url: Url::parse("https://uptobox.com/api").unwrap(),
            token: "UTBTOKEN".to_string(),
        }
    }

    #[test]
    fn test_default_clients_build() {
        assert!(DefaultDebridClient::new(&DebridClientConfig::new("agent", "key")).is_ok());
        assert!(DefaultResolverClient::new(&ResolverClientConfig::new("token")).is_ok());
    }

    #[test]
    fn test_debrid_client_with_proxy_builds() {
        let config = DebridClientConfig::new("agent", "key").with_proxy(ProxySettings {
            enabled: true,
            kind: ProxyKind::Socks5,
            server: "127.0.0.1".to_string(),
            port: 9050,
            username: "user".to_string(),
            password: "pass".to_string(),
        });
        assert!(DefaultDebridClient::new(&config).is_ok());
    }

    #[test]
    fn test_bad_base_url_is_configuration_error() {
        let config = ResolverClientConfig::new("token").with_base_url("uptobox.com/api");
        assert!(matches!(
            DefaultResolverClient::new(&config),
            Err(RemotePortError::Configuration { .. })
        ));
    }
}
