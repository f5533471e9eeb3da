//! FortiOS SDK
//!
//! A thin client for the FortiGate CMDB REST API: one call per HTTP verb,
//! JSON in, response envelope out.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod path;

pub use client::FortiClient;
pub use config::ClientConfig;
pub use envelope::{Envelope, ReadOutcome};
pub use error::{Error, Result};
pub use path::CmdbPath;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
