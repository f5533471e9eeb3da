//! Generic lifecycle operations
//!
//! Create, read, update, delete and import for any table or singleton
//! resource, driven entirely by its [`ResourceSchema`].

use fortios_sdk::{CmdbPath, FortiClient, ReadOutcome};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::expand::{expand, ExpandError};
use crate::flatten::{flatten, FlattenError, FlattenMode};
use crate::schema::{ResourceKind, ResourceSchema};
use crate::state::ResourceData;

/// Lifecycle failure, prefixed with the operation and resource
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Error creating {resource} resource while getting object: {source}")]
    CreateObject {
        resource: &'static str,
        source: ExpandError,
    },

    #[error("Error creating {resource} resource: {source}")]
    Create {
        resource: &'static str,
        source: fortios_sdk::Error,
    },

    #[error("Error updating {resource} resource while getting object: {source}")]
    UpdateObject {
        resource: &'static str,
        source: ExpandError,
    },

    #[error("Error updating {resource} resource: {source}")]
    Update {
        resource: &'static str,
        source: fortios_sdk::Error,
    },

    #[error("Error deleting {resource} resource: {source}")]
    Delete {
        resource: &'static str,
        source: fortios_sdk::Error,
    },

    #[error("Error reading {resource} resource: {source}")]
    Read {
        resource: &'static str,
        source: fortios_sdk::Error,
    },

    #[error("Error reading {resource} resource from API: {source}")]
    ReadFromApi {
        resource: &'static str,
        source: FlattenError,
    },

    #[error("Error reading {resource} resource: no identifier in state")]
    MissingId { resource: &'static str },

    #[error("Cannot import non-existent remote object {resource} ({id})")]
    ImportNotFound { resource: &'static str, id: String },

    #[error("{resource} resource does not support import")]
    ImportUnsupported { resource: &'static str },

    #[error("{resource} resource has no CMDB endpoint")]
    NoEndpoint { resource: &'static str },
}

fn endpoint(schema: &ResourceSchema) -> Result<&CmdbPath, ResourceError> {
    schema.path.as_ref().ok_or(ResourceError::NoEndpoint {
        resource: schema.literal,
    })
}

/// The mkey used in item paths; singletons have none
fn mkey<'a>(schema: &ResourceSchema, data: &'a ResourceData) -> Result<Option<&'a str>, ResourceError> {
    match schema.kind {
        ResourceKind::Singleton => Ok(None),
        _ => data
            .id()
            .filter(|id| !id.is_empty())
            .map(Some)
            .ok_or(ResourceError::MissingId {
                resource: schema.literal,
            }),
    }
}

fn set_identifier(schema: &ResourceSchema, data: &mut ResourceData, mkey: Option<String>) {
    data.set_id(mkey.unwrap_or_else(|| schema.literal.to_string()));
}

/// absent -> present. Singletons have no create endpoint and are updated.
pub async fn create(
    client: &FortiClient,
    schema: &ResourceSchema,
    data: &mut ResourceData,
) -> Result<(), ResourceError> {
    if schema.kind == ResourceKind::Singleton {
        return update(client, schema, data).await;
    }

    let path = endpoint(schema)?;
    let object = expand(schema, data).map_err(|source| ResourceError::CreateObject {
        resource: schema.literal,
        source,
    })?;

    let envelope = client
        .create(path, &object)
        .await
        .map_err(|source| ResourceError::Create {
            resource: schema.literal,
            source,
        })?;

    set_identifier(schema, data, envelope.mkey);
    info!("created {} ({})", schema.type_name, data.id().unwrap_or_default());

    read(client, schema, data, FlattenMode::Refresh).await
}

/// present -> present, or present -> absent when the object is gone.
pub async fn read(
    client: &FortiClient,
    schema: &ResourceSchema,
    data: &mut ResourceData,
    mode: FlattenMode,
) -> Result<(), ResourceError> {
    let path = endpoint(schema)?;
    let mkey = mkey(schema, data)?;

    let outcome = client
        .read(path, mkey)
        .await
        .map_err(|source| ResourceError::Read {
            resource: schema.literal,
            source,
        })?;

    match outcome {
        ReadOutcome::Missing => {
            warn!(
                "resource ({}) not found, removing from state",
                data.id().unwrap_or_default()
            );
            data.clear_id();
            Ok(())
        }
        ReadOutcome::Empty => {
            debug!("{} returned no results, keeping state", schema.type_name);
            Ok(())
        }
        ReadOutcome::Found(object) => {
            flatten(schema, &object, data, mode).map_err(|source| ResourceError::ReadFromApi {
                resource: schema.literal,
                source,
            })
        }
    }
}

/// present -> present
pub async fn update(
    client: &FortiClient,
    schema: &ResourceSchema,
    data: &mut ResourceData,
) -> Result<(), ResourceError> {
    let path = endpoint(schema)?;
    let mkey = mkey(schema, data)?.map(str::to_string);
    let object = expand(schema, data).map_err(|source| ResourceError::UpdateObject {
        resource: schema.literal,
        source,
    })?;

    let envelope = client
        .update(path, mkey.as_deref(), &object)
        .await
        .map_err(|source| ResourceError::Update {
            resource: schema.literal,
            source,
        })?;

    debug!(
        "updated {} ({} attempt(s) allowed)",
        schema.type_name,
        client.config().attempts()
    );
    set_identifier(schema, data, envelope.mkey.or(mkey));

    read(client, schema, data, FlattenMode::Refresh).await
}

/// present -> absent. Objects without a delete endpoint are only
/// dropped from state.
pub async fn delete(
    client: &FortiClient,
    schema: &ResourceSchema,
    data: &mut ResourceData,
) -> Result<(), ResourceError> {
    match (schema.kind, data.id().filter(|id| !id.is_empty())) {
        (ResourceKind::Table, Some(mkey)) => {
            let path = endpoint(schema)?;
            client
                .delete(path, mkey)
                .await
                .map_err(|source| ResourceError::Delete {
                    resource: schema.literal,
                    source,
                })?;
            info!("deleted {} ({})", schema.type_name, mkey);
        }
        (ResourceKind::Table, None) => debug!("{} has no identifier, nothing to delete", schema.type_name),
        _ => debug!("{} has no delete endpoint, removing from state", schema.type_name),
    }

    data.clear_id();
    Ok(())
}

/// Adopt an existing object by its mkey
pub async fn import(
    client: &FortiClient,
    schema: &ResourceSchema,
    data: &mut ResourceData,
    id: &str,
) -> Result<(), ResourceError> {
    data.set_id(id);
    read(client, schema, data, FlattenMode::Import).await?;

    if !data.is_present() {
        return Err(ResourceError::ImportNotFound {
            resource: schema.literal,
            id: id.to_string(),
        });
    }
    Ok(())
}
