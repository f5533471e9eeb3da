//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Attempts per request unless configured otherwise.
pub const DEFAULT_RETRIES: u32 = 1;

/// Request timeout unless configured otherwise.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for one FortiGate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Management address, `host[:port]` or a full `http(s)://` URL
    pub hostname: String,

    /// REST API administrator token
    pub token: String,

    /// Virtual domain appended to every request
    #[serde(default)]
    pub vdom: Option<String>,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,

    /// Extra PEM bundle to trust
    #[serde(default)]
    pub cabundlefile: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total attempts per request, transport failures only
    #[serde(default = "default_retries")]
    pub retries: u32,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            token: String::new(),
            vdom: None,
            insecure: false,
            cabundlefile: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
        }
    }
}

impl ClientConfig {
    pub fn new(hostname: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            token: token.into(),
            ..Default::default()
        }
    }

    pub fn with_vdom(mut self, vdom: impl Into<String>) -> Self {
        self.vdom = Some(vdom.into());
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Reject configurations no request could succeed with
    pub fn validate(&self) -> Result<()> {
        if self.hostname.trim().is_empty() {
            return Err(Error::InvalidConfig("hostname is required".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(Error::InvalidConfig("token is required".to_string()));
        }
        Ok(())
    }

    /// Base URL without trailing slash; bare hosts default to https.
    pub fn base_url(&self) -> String {
        let host = self.hostname.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        }
    }

    /// Attempts actually made; zero is treated as one.
    pub fn attempts(&self) -> u32 {
        self.retries.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_defaults_to_https() {
        let config = ClientConfig::new("192.168.1.99", "tok");
        assert_eq!(config.base_url(), "https://192.168.1.99");
    }

    #[test]
    fn test_base_url_keeps_explicit_scheme() {
        let config = ClientConfig::new("http://127.0.0.1:8080/", "tok");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_validate_requires_hostname_and_token() {
        assert!(ClientConfig::new("", "tok").validate().is_err());
        assert!(ClientConfig::new("fgt", " ").validate().is_err());
        assert!(ClientConfig::new("fgt", "tok").validate().is_ok());
    }

    #[test]
    fn test_retries_default_to_single_attempt() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"hostname": "fgt", "token": "tok"}"#).unwrap();
        assert_eq!(config.retries, 1);
        assert_eq!(config.attempts(), 1);
        assert_eq!(config.with_retries(0).attempts(), 1);
    }
}
