//! API payload to state conversion

use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::warn;

use crate::expand::value_kind;
use crate::schema::{FieldSchema, FieldType, ResourceSchema};
use crate::state::ResourceData;

/// Whether list fields the user never configured are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenMode {
    /// Regular refresh: lists are only refreshed when already in state
    Refresh,
    /// Import: every field is taken from the server
    Import,
}

/// Structural mismatch in an API payload
#[derive(Error, Debug, PartialEq)]
pub enum FlattenError {
    #[error("Error reading {path}: expected a list, got {found}")]
    NotAList { path: String, found: &'static str },

    #[error("Error reading {path}: expected an object, got {found}")]
    NotAnObject { path: String, found: &'static str },
}

/// Write the fields of an API object back into `data`.
///
/// Absent or null values leave the stored value alone: FortiOS does not
/// echo every field it accepted.
pub fn flatten(
    schema: &ResourceSchema,
    object: &Map<String, Value>,
    data: &mut ResourceData,
    mode: FlattenMode,
) -> Result<(), FlattenError> {
    for field in schema.fields {
        let wire = field.wire_name();
        let Some(raw) = object.get(wire.as_ref()).filter(|v| !v.is_null()) else {
            continue;
        };

        if let FieldType::List { elem } = field.kind {
            if mode == FlattenMode::Refresh && data.get_ok(field.name).is_none() {
                continue;
            }
            match flatten_list(elem, raw, field.name)? {
                Some(items) => data.set(field.name, items),
                None => {
                    data.remove(field.name);
                }
            }
            continue;
        }

        match flatten_scalar(field, raw) {
            Some(value) => data.set(field.name, value),
            None => warn!(
                "ignoring {} value for {}: expected {:?}",
                value_kind(raw),
                field.name,
                field.kind
            ),
        }
    }

    Ok(())
}

fn flatten_scalar(field: &FieldSchema, raw: &Value) -> Option<Value> {
    match (field.kind, raw) {
        (FieldType::Int, Value::Number(_)) => Some(raw.clone()),
        (FieldType::Int, Value::String(s)) => s.trim().parse::<i64>().ok().map(|n| Value::Number(Number::from(n))),
        (FieldType::String, Value::String(_)) => Some(raw.clone()),
        (FieldType::String, Value::Number(n)) => Some(Value::String(n.to_string())),
        (FieldType::String | FieldType::Int, Value::Bool(_)) => Some(raw.clone()),
        _ => None,
    }
}

fn flatten_list(elem: &[FieldSchema], raw: &Value, path: &str) -> Result<Option<Value>, FlattenError> {
    let Value::Array(items) = raw else {
        return Err(FlattenError::NotAList {
            path: path.to_string(),
            found: value_kind(raw),
        });
    };
    if items.first().map_or(true, Value::is_null) {
        return Ok(None);
    }

    let mut result = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Value::Object(element) = item else {
            return Err(FlattenError::NotAnObject {
                path: format!("{}.{}", path, i),
                found: value_kind(item),
            });
        };

        let mut entry = Map::new();
        for field in elem {
            let Some(raw) = element.get(field.wire_name().as_ref()).filter(|v| !v.is_null()) else {
                continue;
            };
            if let FieldType::List { elem: nested } = field.kind {
                let nested_path = format!("{}.{}.{}", path, i, field.name);
                if let Some(items) = flatten_list(nested, raw, &nested_path)? {
                    entry.insert(field.name.to_string(), items);
                }
            } else if let Some(value) = flatten_scalar(field, raw) {
                entry.insert(field.name.to_string(), value);
            }
        }
        result.push(Value::Object(entry));
    }

    Ok(Some(Value::Array(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ResourceKind;
    use fortios_sdk::CmdbPath;
    use serde_json::json;

    static VAP_FIELDS: [FieldSchema; 1] = [FieldSchema::string("name").computed()];

    static FIELDS: [FieldSchema; 5] = [
        FieldSchema::string("name").required(),
        FieldSchema::string("fosid").with_wire_name("id"),
        FieldSchema::int("collector_port").int_between(0, 65535),
        FieldSchema::string("comment"),
        FieldSchema::list("vaps", &VAP_FIELDS),
    ];

    static SCHEMA: ResourceSchema = ResourceSchema {
        type_name: "fortios_test_object",
        literal: "TestObject",
        description: "Test object.",
        path: Some(CmdbPath::new("test", "object")),
        kind: ResourceKind::Table,
        fields: &FIELDS,
    };

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_flatten_translates_wire_names() {
        let mut data = ResourceData::new();
        flatten(
            &SCHEMA,
            &object(json!({"name": "grp", "id": "7", "collector-port": 6343, "q_origin_key": "grp"})),
            &mut data,
            FlattenMode::Refresh,
        )
        .unwrap();

        assert_eq!(data.get("name"), Some(&json!("grp")));
        assert_eq!(data.get("fosid"), Some(&json!("7")));
        assert_eq!(data.get("collector_port"), Some(&json!(6343)));
        assert!(data.get("q_origin_key").is_none());
    }

    #[test]
    fn test_flatten_keeps_value_when_server_omits_it() {
        let mut data = ResourceData::new().with("comment", "written once");
        flatten(
            &SCHEMA,
            &object(json!({"name": "grp", "comment": null})),
            &mut data,
            FlattenMode::Refresh,
        )
        .unwrap();

        assert_eq!(data.get("comment"), Some(&json!("written once")));
    }

    #[test]
    fn test_flatten_coerces_numeric_strings() {
        let mut data = ResourceData::new().with("collector_port", 1);
        flatten(
            &SCHEMA,
            &object(json!({"collector-port": "6343", "id": 12})),
            &mut data,
            FlattenMode::Refresh,
        )
        .unwrap();

        assert_eq!(data.get("collector_port"), Some(&json!(6343)));
        assert_eq!(data.get("fosid"), Some(&json!("12")));
    }

    #[test]
    fn test_flatten_ignores_mistyped_scalar() {
        let mut data = ResourceData::new().with("collector_port", 1);
        flatten(
            &SCHEMA,
            &object(json!({"collector-port": "not a port"})),
            &mut data,
            FlattenMode::Refresh,
        )
        .unwrap();

        assert_eq!(data.get("collector_port"), Some(&json!(1)));
    }

    #[test]
    fn test_flatten_passes_booleans_through() {
        let mut data = ResourceData::new();
        flatten(&SCHEMA, &object(json!({"comment": true})), &mut data, FlattenMode::Import).unwrap();
        assert_eq!(data.get("comment"), Some(&json!(true)));
    }

    #[test]
    fn test_flatten_list_only_when_configured() {
        let payload = object(json!({"vaps": [{"name": "b", "q_origin_key": "b"}, {"name": "a"}]}));

        let mut unconfigured = ResourceData::new();
        flatten(&SCHEMA, &payload, &mut unconfigured, FlattenMode::Refresh).unwrap();
        assert!(unconfigured.get("vaps").is_none());

        let mut imported = ResourceData::new();
        flatten(&SCHEMA, &payload, &mut imported, FlattenMode::Import).unwrap();
        assert_eq!(imported.get("vaps"), Some(&json!([{"name": "b"}, {"name": "a"}])));

        let mut configured = ResourceData::new().with("vaps", json!([{"name": "a"}]));
        flatten(&SCHEMA, &payload, &mut configured, FlattenMode::Refresh).unwrap();
        assert_eq!(configured.get("vaps"), Some(&json!([{"name": "b"}, {"name": "a"}])));
    }

    #[test]
    fn test_flatten_empty_list_clears_configured_list() {
        let mut data = ResourceData::new().with("vaps", json!([{"name": "a"}]));
        flatten(&SCHEMA, &object(json!({"vaps": []})), &mut data, FlattenMode::Refresh).unwrap();
        assert!(data.get("vaps").is_none());
    }

    #[test]
    fn test_flatten_rejects_malformed_list() {
        let mut data = ResourceData::new();
        let err = flatten(
            &SCHEMA,
            &object(json!({"vaps": [{"name": "a"}, 5]})),
            &mut data,
            FlattenMode::Import,
        )
        .unwrap_err();

        assert_eq!(
            err,
            FlattenError::NotAnObject {
                path: "vaps.1".to_string(),
                found: "number"
            }
        );
    }
}
