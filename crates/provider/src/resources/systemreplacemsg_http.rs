//! HTTP replacement messages

use fortios_sdk::CmdbPath;

use super::Resource;
use crate::schema::{FieldSchema, ResourceKind, ResourceSchema};

static FIELDS: [FieldSchema; 4] = [
    FieldSchema::string("msg_type")
        .string_len(0, 28)
        .required()
        .force_new(),
    FieldSchema::string("buffer").string_len(0, 32768),
    FieldSchema::string("header").computed(),
    FieldSchema::string("format").computed(),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "fortios_systemreplacemsg_http",
    literal: "SystemReplacemsgHttp",
    description: "Replacement messages.",
    path: Some(CmdbPath::new("system.replacemsg", "http")),
    kind: ResourceKind::Table,
    fields: &FIELDS,
};

pub struct SystemReplacemsgHttp;

impl Resource for SystemReplacemsgHttp {
    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }
}
