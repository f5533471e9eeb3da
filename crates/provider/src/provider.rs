//! FortiOS Terraform Provider Implementation
//!
//! Routes lifecycle calls to the registered resources by type name.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use fortios_sdk::{ClientConfig, FortiClient};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::resources::{self, Resource};
use crate::schema::{Diagnostic, ResourceSchema};
use crate::state::ResourceData;

/// FortiOS Terraform Provider
pub struct FortiosProvider {
    /// Client for the FortiGate, set by `configure`
    client: Arc<RwLock<Option<FortiClient>>>,
    resources: BTreeMap<&'static str, Box<dyn Resource>>,
}

impl Default for FortiosProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FortiosProvider {
    pub fn new() -> Self {
        let resources = resources::all()
            .into_iter()
            .map(|r| (r.type_name(), r))
            .collect();

        Self {
            client: Arc::new(RwLock::new(None)),
            resources,
        }
    }

    /// Build the FortiGate client
    pub async fn configure(&self, config: ClientConfig) -> Result<()> {
        info!(
            "Configuring provider for {} (vdom: {})",
            config.base_url(),
            config.vdom.as_deref().unwrap_or("default")
        );

        let client = FortiClient::new(config)?;
        *self.client.write().await = Some(client);
        Ok(())
    }

    async fn get_client(&self) -> Result<FortiClient> {
        self.client
            .read()
            .await
            .clone()
            .ok_or_else(|| anyhow!("Provider is not configured"))
    }

    /// Registered type names, sorted
    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    pub fn resource(&self, type_name: &str) -> Result<&dyn Resource> {
        self.resources
            .get(type_name)
            .map(|r| r.as_ref())
            .ok_or_else(|| anyhow!("Unknown resource type: {}", type_name))
    }

    pub fn schema(&self, type_name: &str) -> Result<&'static ResourceSchema> {
        Ok(self.resource(type_name)?.schema())
    }

    pub fn validate(&self, type_name: &str, data: &ResourceData) -> Result<Vec<Diagnostic>> {
        debug!("ValidateResourceConfig called for {}", type_name);
        Ok(self.schema(type_name)?.validate(data))
    }

    fn ensure_valid(&self, type_name: &str, data: &ResourceData) -> Result<()> {
        let errors: Vec<String> = self
            .validate(type_name, data)?
            .into_iter()
            .filter(Diagnostic::is_error)
            .map(|d| d.summary)
            .collect();

        if !errors.is_empty() {
            bail!("Invalid {} configuration: {}", type_name, errors.join("; "));
        }
        Ok(())
    }

    pub async fn create(&self, type_name: &str, data: &mut ResourceData) -> Result<()> {
        info!("Create called for {}", type_name);
        self.ensure_valid(type_name, data)?;
        let client = self.get_client().await?;
        self.resource(type_name)?.create(&client, data).await?;
        Ok(())
    }

    pub async fn read(&self, type_name: &str, data: &mut ResourceData) -> Result<()> {
        info!("Read called for {}", type_name);
        let client = self.get_client().await?;
        self.resource(type_name)?.read(&client, data).await?;
        Ok(())
    }

    pub async fn update(&self, type_name: &str, data: &mut ResourceData) -> Result<()> {
        info!("Update called for {}", type_name);
        self.ensure_valid(type_name, data)?;
        let client = self.get_client().await?;
        self.resource(type_name)?.update(&client, data).await?;
        Ok(())
    }

    pub async fn delete(&self, type_name: &str, data: &mut ResourceData) -> Result<()> {
        info!("Delete called for {}", type_name);
        let client = self.get_client().await?;
        self.resource(type_name)?.delete(&client, data).await?;
        Ok(())
    }

    /// Import an existing object into fresh state
    pub async fn import(&self, type_name: &str, id: &str) -> Result<ResourceData> {
        info!("ImportResourceState called for {} with ID {}", type_name, id);
        let client = self.get_client().await?;
        let mut data = ResourceData::new();
        self.resource(type_name)?.import(&client, &mut data, id).await?;
        Ok(data)
    }
}
