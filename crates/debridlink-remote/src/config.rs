//! Public configuration for the remote clients.
//!
//! The internal per-service configuration is derived from these at client
//! construction, where base URLs are parsed and the proxy URL is built.

use std::fmt;
use std::time::Duration;

use debridlink_core::config::{DEFAULT_ALLDEBRID_BASE_URL, DEFAULT_UPTOBOX_BASE_URL};
use debridlink_core::{ProxySettings, RelayConfig};

/// Connection pool and timeout settings shared by both clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransportConfig {
    /// How long an idle pooled connection is kept
    pub(crate) idle_timeout: Duration,
    /// Idle connections kept per host
    pub(crate) max_idle_per_host: usize,
    /// Whole-request timeout; unset leaves only the pool's idle timeout
    pub(crate) timeout: Option<Duration>,
    pub(crate) user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30),
            max_idle_per_host: 10,
            timeout: None,
            user_agent: concat!("debridlink/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Configuration for the AllDebrid client.
///
/// # Example
///
/// ```
/// use debridlink_remote::DebridClientConfig;
/// use std::time::Duration;
///
/// let config = DebridClientConfig::new("myagent", "secret")
///     .with_base_url("http://localhost:8080/v4")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Clone)]
pub struct DebridClientConfig {
    pub(crate) base_url: String,
    /// Value of the `agent` query parameter
    pub(crate) agent: String,
    pub(crate) api_key: String,
    pub(crate) proxy: ProxySettings,
    pub(crate) transport: TransportConfig,
}

impl DebridClientConfig {
    /// Create a configuration for the public API with no proxy.
    #[must_use]
    pub fn new(agent: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_ALLDEBRID_BASE_URL.to_string(),
            agent: agent.into(),
            api_key: api_key.into(),
            proxy: ProxySettings::default(),
            transport: TransportConfig::default(),
        }
    }

    /// Agent, key, base URL and proxy taken from the run configuration.
    #[must_use]
    pub fn from_relay_config(config: &RelayConfig) -> Self {
        Self::new(&config.alldebrid_agent, &config.alldebrid_api_key)
            .with_base_url(&config.alldebrid_base_url)
            .with_proxy(config.alldebrid_proxy.clone())
    }

    /// Defaults to `https://api.alldebrid.com/v4`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Route every request through this proxy when it is enabled.
    #[must_use]
    pub fn with_proxy(mut self, proxy: ProxySettings) -> Self {
        self.proxy = proxy;
        self
    }

    /// Bound each request. There is no bound by default.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for DebridClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebridClientConfig")
            .field("base_url", &self.base_url)
            .field("agent", &self.agent)
            .field("api_key", &"<redacted>")
            .field("proxy", &self.proxy)
            .field("transport", &self.transport)
            .finish()
    }
}

/// Configuration for the Uptobox link resolver.
#[derive(Clone)]
pub struct ResolverClientConfig {
    pub(crate) base_url: String,
    pub(crate) token: String,
    pub(crate) transport: TransportConfig,
}

impl ResolverClientConfig {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_UPTOBOX_BASE_URL.to_string(),
            token: token.into(),
            transport: TransportConfig::default(),
        }
    }

    #[must_use]
    pub fn from_relay_config(config: &RelayConfig) -> Self {
        Self::new(&config.utb_api_key).with_base_url(&config.uptobox_base_url)
    }

    /// Defaults to `https://uptobox.com/api`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for ResolverClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("transport", &self.transport)
            .finish()
    }
}
