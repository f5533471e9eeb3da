//! Custom log fields

use fortios_sdk::CmdbPath;

use super::Resource;
use crate::schema::{FieldSchema, ResourceKind, ResourceSchema};

static FIELDS: [FieldSchema; 3] = [
    FieldSchema::string("fosid")
        .with_wire_name("id")
        .string_len(0, 35)
        .required()
        .force_new(),
    FieldSchema::string("name").string_len(0, 15).required(),
    FieldSchema::string("value").string_len(0, 15).required(),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "fortios_log_customfield",
    literal: "LogCustomField",
    description: "Configure custom log fields.",
    path: Some(CmdbPath::new("log", "custom-field")),
    kind: ResourceKind::Table,
    fields: &FIELDS,
};

pub struct LogCustomField;

impl Resource for LogCustomField {
    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }
}
