//! FortiOS Terraform Provider
//!
//! Declarative field tables for FortiOS configuration objects and one
//! generic engine that maps them onto the CMDB REST API.

pub mod config;
pub mod crud;
pub mod expand;
pub mod flatten;
pub mod provider;
pub mod resources;
pub mod schema;
pub mod state;

pub use config::ProviderConfig;
pub use provider::FortiosProvider;
pub use state::ResourceData;
