//! Run configuration.
//!
//! The configuration is a JSON file read once at startup. Any problem with it
//! is fatal before the reclaimer or the pipeline touch anything.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Default base URL of the debrid API.
pub const DEFAULT_ALLDEBRID_BASE_URL: &str = "https://api.alldebrid.com/v4";

/// Default base URL of the hosting service API.
pub const DEFAULT_UPTOBOX_BASE_URL: &str = "https://uptobox.com/api";

/// Errors from loading or validating the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Config file {path} is invalid: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Proxy protocols supported for the debrid client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyKind {
    #[default]
    Socks5,
}

/// Optional proxy for debrid API traffic.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: ProxyKind,
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl ProxySettings {
    /// `server:port` of the proxy.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }

    /// Username and password, only when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.username.is_empty() || self.password.is_empty() {
            None
        } else {
            Some((self.username.as_str(), self.password.as_str()))
        }
    }
}

impl fmt::Debug for ProxySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxySettings")
            .field("enabled", &self.enabled)
            .field("kind", &self.kind)
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

/// Everything a run needs to know.
#[derive(Clone, Deserialize)]
pub struct RelayConfig {
    pub alldebrid_agent: String,
    pub alldebrid_api_key: String,
    pub utb_api_key: String,
    pub torrent_directory: PathBuf,
    pub finished_directory: PathBuf,
    pub error_directory: PathBuf,
    pub expired_directory: PathBuf,
    /// How long a torrent may stay pending with no progress.
    #[serde(rename = "expiration_time", deserialize_with = "deserialize_duration")]
    pub expiration: Duration,
    /// Resolved links are appended here, one per line.
    pub output_file: PathBuf,
    #[serde(default)]
    pub alldebrid_proxy: ProxySettings,
    #[serde(default = "default_alldebrid_base_url")]
    pub alldebrid_base_url: String,
    #[serde(default = "default_uptobox_base_url")]
    pub uptobox_base_url: String,
}

fn default_alldebrid_base_url() -> String {
    DEFAULT_ALLDEBRID_BASE_URL.to_string()
}

fn default_uptobox_base_url() -> String {
    DEFAULT_UPTOBOX_BASE_URL.to_string()
}

impl RelayConfig {
    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check the fields serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_text("alldebrid_agent", &self.alldebrid_agent)?;
        require_text("alldebrid_api_key", &self.alldebrid_api_key)?;
        require_text("utb_api_key", &self.utb_api_key)?;
        require_text("alldebrid_base_url", &self.alldebrid_base_url)?;
        require_text("uptobox_base_url", &self.uptobox_base_url)?;

        for (field, path) in [
            ("torrent_directory", &self.torrent_directory),
            ("finished_directory", &self.finished_directory),
            ("error_directory", &self.error_directory),
            ("expired_directory", &self.expired_directory),
            ("output_file", &self.output_file),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidField {
                    field,
                    reason: "path cannot be empty".to_string(),
                });
            }
        }

        if self.expiration.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "expiration_time",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.alldebrid_proxy.enabled {
            require_text("alldebrid_proxy.server", &self.alldebrid_proxy.server)?;
            if self.alldebrid_proxy.port == 0 {
                return Err(ConfigError::InvalidField {
                    field: "alldebrid_proxy.port",
                    reason: "must be set when the proxy is enabled".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("alldebrid_agent", &self.alldebrid_agent)
            .field("alldebrid_api_key", &redacted(&self.alldebrid_api_key))
            .field("utb_api_key", &redacted(&self.utb_api_key))
            .field("torrent_directory", &self.torrent_directory)
            .field("finished_directory", &self.finished_directory)
            .field("error_directory", &self.error_directory)
            .field("expired_directory", &self.expired_directory)
            .field("expiration", &self.expiration)
            .field("output_file", &self.output_file)
            .field("alldebrid_proxy", &self.alldebrid_proxy)
            .field("alldebrid_base_url", &self.alldebrid_base_url)
            .field("uptobox_base_url", &self.uptobox_base_url)
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            field,
            reason: "cannot be empty".to_string(),
        });
    }
    Ok(())
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_duration(&raw).map_err(serde::de::Error::custom)
}

/// Parse a compound duration string such as `"72h"`, `"1h30m"` or `"1.5h"`.
///
/// Accepted units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare
/// `"0"` is zero. Negative durations are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidDuration {
        value: input.to_string(),
        reason: reason.to_string(),
    };

    let mut rest = input.trim();
    if rest.starts_with('-') {
        return Err(invalid("negative durations are not allowed"));
    }
    rest = rest.strip_prefix('+').unwrap_or(rest);

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total_nanos = 0f64;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, after_number) = rest.split_at(number_len);
        if number.is_empty() || number == "." {
            return Err(invalid("expected a number"));
        }
        let value: f64 = number.parse().map_err(|_| invalid("malformed number"))?;

        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, after_unit) = after_number.split_at(unit_len);
        let scale = match unit {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            "" => return Err(invalid("missing unit")),
            _ => return Err(invalid(&format!("unknown unit '{unit}'"))),
        };

        total_nanos += value * scale;
        rest = after_unit;
    }

    #[allow(clippy::cast_precision_loss)]
    let max_nanos = u64::MAX as f64;
    if !total_nanos.is_finite() || total_nanos > max_nanos {
        return Err(invalid("duration out of range"));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let nanos = total_nanos.round() as u64;
    Ok(Duration::from_nanos(nanos))
}
