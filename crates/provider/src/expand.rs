//! State to API payload conversion

use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::{FieldSchema, FieldType, ResourceSchema};
use crate::state::{is_zero, ResourceData};

/// Structural mismatch in the configuration
#[derive(Error, Debug, PartialEq)]
pub enum ExpandError {
    #[error("{path}: expected a list, got {found}")]
    NotAList { path: String, found: &'static str },

    #[error("{path}: expected an object, got {found}")]
    NotAnObject { path: String, found: &'static str },
}

/// Build the API object for `data`, keyed by wire names
pub fn expand(schema: &ResourceSchema, data: &ResourceData) -> Result<Map<String, Value>, ExpandError> {
    expand_fields(schema.fields, data.attributes(), "")
}

fn expand_fields(
    fields: &[FieldSchema],
    source: &Map<String, Value>,
    prefix: &str,
) -> Result<Map<String, Value>, ExpandError> {
    let mut object = Map::new();

    for field in fields {
        if field.is_computed_only() {
            continue;
        }
        let Some(value) = source.get(field.name).filter(|v| is_set(field, v)) else {
            continue;
        };

        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };

        if let Some(wire_value) = expand_value(field, value, &path)? {
            object.insert(field.wire_name().into_owned(), wire_value);
        }
    }

    Ok(object)
}

fn is_set(field: &FieldSchema, value: &Value) -> bool {
    if matches!(field.kind, FieldType::List { .. }) && !value.is_array() {
        // non-lists go on to be rejected
        return !value.is_null();
    }
    if field.zero_is_set() {
        !value.is_null()
    } else {
        !is_zero(value)
    }
}

fn expand_value(field: &FieldSchema, value: &Value, path: &str) -> Result<Option<Value>, ExpandError> {
    let FieldType::List { elem } = field.kind else {
        return Ok(Some(value.clone()));
    };

    let Value::Array(items) = value else {
        return Err(ExpandError::NotAList {
            path: path.to_string(),
            found: value_kind(value),
        });
    };
    if items.first().map_or(true, Value::is_null) {
        return Ok(None);
    }

    let mut result = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let item_path = format!("{}.{}", path, i);
        let Value::Object(element) = item else {
            return Err(ExpandError::NotAnObject {
                path: item_path,
                found: value_kind(item),
            });
        };
        result.push(Value::Object(expand_fields(elem, element, &item_path)?));
    }

    Ok(Some(Value::Array(result)))
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ResourceKind;
    use fortios_sdk::CmdbPath;
    use serde_json::json;

    static VAP_FIELDS: [FieldSchema; 2] = [
        FieldSchema::string("name").computed(),
        FieldSchema::int("vlan_id").int_between(0, 4094),
    ];

    static FIELDS: [FieldSchema; 6] = [
        FieldSchema::string("name").required(),
        FieldSchema::string("fosid").with_wire_name("id"),
        FieldSchema::int("conn_timeout").int_between(1, 3600),
        FieldSchema::int("collector_port").int_between(0, 65535),
        FieldSchema::list("vaps", &VAP_FIELDS),
        FieldSchema::string("response").computed_only(),
    ];

    static SCHEMA: ResourceSchema = ResourceSchema {
        type_name: "fortios_test_object",
        literal: "TestObject",
        description: "Test object.",
        path: Some(CmdbPath::new("test", "object")),
        kind: ResourceKind::Table,
        fields: &FIELDS,
    };

    #[test]
    fn test_expand_translates_wire_names() {
        let data = ResourceData::new()
            .with("name", "grp")
            .with("fosid", "7")
            .with("conn_timeout", 30);

        let object = expand(&SCHEMA, &data).unwrap();
        assert_eq!(
            Value::Object(object),
            json!({"name": "grp", "id": "7", "conn-timeout": 30})
        );
    }

    #[test]
    fn test_expand_skips_unset_values() {
        let data = ResourceData::new()
            .with("name", "")
            .with("conn_timeout", 0)
            .with("collector_port", 0)
            .with("response", "server owned");

        let object = expand(&SCHEMA, &data).unwrap();
        // zero is a legal port, so it is sent
        assert_eq!(Value::Object(object), json!({"collector-port": 0}));
    }

    #[test]
    fn test_expand_list_preserves_order_and_skips_unset_nested() {
        let data = ResourceData::new().with(
            "vaps",
            json!([
                {"name": "zeta", "vlan_id": 0},
                {"name": "", "vlan_id": 20},
                {"name": "alpha"}
            ]),
        );

        let object = expand(&SCHEMA, &data).unwrap();
        assert_eq!(
            object["vaps"],
            json!([
                {"name": "zeta", "vlan-id": 0},
                {"vlan-id": 20},
                {"name": "alpha"}
            ])
        );
    }

    #[test]
    fn test_expand_list_with_null_head_is_omitted() {
        let data = ResourceData::new().with("vaps", json!([null, {"name": "a"}]));
        let object = expand(&SCHEMA, &data).unwrap();
        assert!(!object.contains_key("vaps"));
    }

    #[test]
    fn test_expand_rejects_malformed_lists() {
        let data = ResourceData::new().with("vaps", json!({"name": "a"}));
        assert_eq!(
            expand(&SCHEMA, &data).unwrap_err(),
            ExpandError::NotAList {
                path: "vaps".to_string(),
                found: "object"
            }
        );

        let data = ResourceData::new().with("vaps", json!([{"name": "a"}, "b"]));
        let err = expand(&SCHEMA, &data).unwrap_err();
        assert_eq!(
            err,
            ExpandError::NotAnObject {
                path: "vaps.1".to_string(),
                found: "string"
            }
        );
        assert_eq!(err.to_string(), "vaps.1: expected an object, got string");
    }

    #[test]
    fn test_expand_rejects_empty_object_for_list() {
        for value in [json!({}), json!(""), json!(0)] {
            let data = ResourceData::new().with("vaps", value.clone());
            assert!(
                matches!(expand(&SCHEMA, &data), Err(ExpandError::NotAList { .. })),
                "{}",
                value
            );
        }
    }
}
