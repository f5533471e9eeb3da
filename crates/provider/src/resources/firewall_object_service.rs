//! Custom firewall services

use fortios_sdk::CmdbPath;

use super::Resource;
use crate::schema::{FieldSchema, ResourceKind, ResourceSchema};

static FIELDS: [FieldSchema; 6] = [
    FieldSchema::string("name")
        .string_len(0, 79)
        .required()
        .force_new(),
    FieldSchema::string("category").string_len(0, 63).computed(),
    FieldSchema::string("protocol").computed(),
    FieldSchema::string("fqdn").string_len(0, 255),
    FieldSchema::string("iprange"),
    FieldSchema::string("comment").string_len(0, 255),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "fortios_firewall_object_service",
    literal: "FirewallObjectService",
    description: "Configure custom services.",
    path: Some(CmdbPath::new("firewall.service", "custom")),
    kind: ResourceKind::Table,
    fields: &FIELDS,
};

pub struct FirewallObjectService;

impl Resource for FirewallObjectService {
    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }
}
