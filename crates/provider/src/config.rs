//! Provider configuration
//!
//! Settings come from a TOML file; environment variables fill in whatever
//! the file leaves unset.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fortios_sdk::config::{DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS};
use fortios_sdk::ClientConfig;
use serde::{Deserialize, Serialize};

pub const ENV_HOSTNAME: &str = "FORTIOS_ACCESS_HOSTNAME";
pub const ENV_TOKEN: &str = "FORTIOS_ACCESS_TOKEN";
pub const ENV_INSECURE: &str = "FORTIOS_INSECURE";
pub const ENV_CABUNDLE: &str = "FORTIOS_CA_CABUNDLE";
pub const ENV_VDOM: &str = "FORTIOS_VDOM";
pub const ENV_RETRIES: &str = "FORTIOS_RETRIES";

/// Provider configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// FortiGate management address
    pub hostname: Option<String>,

    /// REST API administrator token
    pub token: Option<String>,

    /// Skip TLS certificate verification
    pub insecure: Option<bool>,

    /// Extra CA bundle in PEM format
    pub cabundlefile: Option<PathBuf>,

    /// Virtual domain
    pub vdom: Option<String>,

    /// Attempts per request
    pub retries: Option<u32>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Default configuration file location
pub fn default_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("fortios")
        .join("provider.toml")
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got {:?}", name, other),
    }
}

impl ProviderConfig {
    /// Load configuration from file; a missing file is an empty config
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Fill unset fields from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Fill unset fields from `lookup`
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.hostname.is_none() {
            self.hostname = lookup(ENV_HOSTNAME);
        }
        if self.token.is_none() {
            self.token = lookup(ENV_TOKEN);
        }
        if self.vdom.is_none() {
            self.vdom = lookup(ENV_VDOM).filter(|v| !v.is_empty());
        }
        if self.cabundlefile.is_none() {
            self.cabundlefile = lookup(ENV_CABUNDLE).filter(|v| !v.is_empty()).map(PathBuf::from);
        }
        if self.insecure.is_none() {
            if let Some(value) = lookup(ENV_INSECURE) {
                self.insecure = Some(parse_bool(ENV_INSECURE, &value)?);
            }
        }
        if self.retries.is_none() {
            if let Some(value) = lookup(ENV_RETRIES) {
                let retries = value
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a non-negative integer", ENV_RETRIES))?;
                self.retries = Some(retries);
            }
        }
        Ok(self)
    }

    /// Client settings; unset fields take the client defaults
    pub fn into_client_config(self) -> ClientConfig {
        ClientConfig {
            hostname: self.hostname.unwrap_or_default(),
            token: self.token.unwrap_or_default(),
            vdom: self.vdom,
            insecure: self.insecure.unwrap_or(false),
            cabundlefile: self.cabundlefile,
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            retries: self.retries.unwrap_or(DEFAULT_RETRIES),
        }
    }
}
