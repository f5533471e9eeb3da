//! Resource Implementations
//!
//! Each resource is a static schema plus a unit struct implementing
//! [`Resource`]. Table and singleton resources use the default lifecycle
//! from [`crate::crud`]; only the generic JSON resource overrides it.

pub mod firewall_object_service;
pub mod json_generic_api;
pub mod log_customfield;
pub mod logfortianalyzer3_setting;
pub mod system_vdomsflow;
pub mod systemreplacemsg_http;
pub mod wirelesscontroller_vapgroup;

use fortios_sdk::FortiClient;

use crate::crud::{self, ResourceError};
use crate::flatten::FlattenMode;
use crate::schema::ResourceSchema;
use crate::state::ResourceData;

/// Trait for resource operations
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    /// Field table and endpoint
    fn schema(&self) -> &'static ResourceSchema;

    /// Resource type name
    fn type_name(&self) -> &'static str {
        self.schema().type_name
    }

    /// Create a new object and refresh state from the server
    async fn create(&self, client: &FortiClient, data: &mut ResourceData) -> Result<(), ResourceError> {
        crud::create(client, self.schema(), data).await
    }

    /// Refresh state; clears the identifier when the object is gone
    async fn read(&self, client: &FortiClient, data: &mut ResourceData) -> Result<(), ResourceError> {
        crud::read(client, self.schema(), data, FlattenMode::Refresh).await
    }

    /// Push the configuration to an existing object
    async fn update(&self, client: &FortiClient, data: &mut ResourceData) -> Result<(), ResourceError> {
        crud::update(client, self.schema(), data).await
    }

    /// Delete the object and clear the identifier
    async fn delete(&self, client: &FortiClient, data: &mut ResourceData) -> Result<(), ResourceError> {
        crud::delete(client, self.schema(), data).await
    }

    /// Adopt an existing object by mkey
    async fn import(&self, client: &FortiClient, data: &mut ResourceData, id: &str) -> Result<(), ResourceError> {
        crud::import(client, self.schema(), data, id).await
    }
}

/// Every resource this provider serves
pub fn all() -> Vec<Box<dyn Resource>> {
    vec![
        Box::new(firewall_object_service::FirewallObjectService),
        Box::new(json_generic_api::JsonGenericApi),
        Box::new(log_customfield::LogCustomField),
        Box::new(logfortianalyzer3_setting::LogFortianalyzer3Setting),
        Box::new(system_vdomsflow::SystemVdomSflow),
        Box::new(systemreplacemsg_http::SystemReplacemsgHttp),
        Box::new(wirelesscontroller_vapgroup::WirelessControllerVapGroup),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_type_names_are_unique() {
        let resources = all();
        let names: HashSet<&str> = resources.iter().map(|r| r.type_name()).collect();
        assert_eq!(names.len(), resources.len());
        assert!(names.iter().all(|n| n.starts_with("fortios_")));
    }

    #[test]
    fn test_field_names_are_unique_per_schema() {
        for resource in all() {
            let schema = resource.schema();
            let names: HashSet<&str> = schema.fields.iter().map(|f| f.name).collect();
            assert_eq!(names.len(), schema.fields.len(), "{}", schema.type_name);
        }
    }
}
