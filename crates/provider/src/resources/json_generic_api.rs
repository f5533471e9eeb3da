//! Generic JSON API requests
//!
//! Sends an arbitrary request to any FortiOS API path and keeps the raw
//! reply in `response`. There is no object to read back or delete.

use fortios_sdk::FortiClient;
use serde_json::Value;
use tracing::{debug, info};

use super::Resource;
use crate::crud::ResourceError;
use crate::schema::{FieldSchema, ResourceKind, ResourceSchema};
use crate::state::ResourceData;

static FIELDS: [FieldSchema; 5] = [
    FieldSchema::string("path").required(),
    FieldSchema::string("method").required(),
    FieldSchema::string("specialparams"),
    FieldSchema::string("json"),
    FieldSchema::string("response").computed_only(),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "fortios_json_generic_api",
    literal: "JsonGenericApi",
    description: "FortiAPI Generic Interface.",
    path: None,
    kind: ResourceKind::Generic,
    fields: &FIELDS,
};

pub struct JsonGenericApi;

impl JsonGenericApi {
    async fn send(client: &FortiClient, data: &mut ResourceData) -> fortios_sdk::Result<()> {
        let path = data.get_string("path");
        let method = data.get_string("method");
        let specialparams = data.get_optional_string("specialparams");
        let json = data.get_optional_string("json");

        let response = client
            .raw(&method, &path, specialparams.as_deref(), json.as_deref())
            .await?;

        info!("{} {} sent through {}", method, path, SCHEMA.type_name);
        data.set_id(SCHEMA.literal);
        data.set("response", Value::String(response));
        Ok(())
    }
}

#[async_trait::async_trait]
impl Resource for JsonGenericApi {
    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }

    async fn create(&self, client: &FortiClient, data: &mut ResourceData) -> Result<(), ResourceError> {
        Self::send(client, data)
            .await
            .map_err(|source| ResourceError::Create {
                resource: SCHEMA.literal,
                source,
            })
    }

    async fn read(&self, _client: &FortiClient, _data: &mut ResourceData) -> Result<(), ResourceError> {
        Ok(())
    }

    async fn update(&self, client: &FortiClient, data: &mut ResourceData) -> Result<(), ResourceError> {
        Self::send(client, data)
            .await
            .map_err(|source| ResourceError::Update {
                resource: SCHEMA.literal,
                source,
            })
    }

    async fn delete(&self, _client: &FortiClient, data: &mut ResourceData) -> Result<(), ResourceError> {
        // no API for this
        debug!("dropping {} from state", SCHEMA.type_name);
        data.clear_id();
        Ok(())
    }

    async fn import(&self, _client: &FortiClient, _data: &mut ResourceData, _id: &str) -> Result<(), ResourceError> {
        Err(ResourceError::ImportUnsupported {
            resource: SCHEMA.literal,
        })
    }
}
