//! Virtual Access Point (VAP) groups

use fortios_sdk::CmdbPath;

use super::Resource;
use crate::schema::{FieldSchema, ResourceKind, ResourceSchema};

static VAP_FIELDS: [FieldSchema; 1] = [FieldSchema::string("name").string_len(0, 35).computed()];

static FIELDS: [FieldSchema; 3] = [
    FieldSchema::string("name")
        .string_len(0, 35)
        .required()
        .force_new(),
    FieldSchema::string("comment").string_len(0, 255),
    FieldSchema::list("vaps", &VAP_FIELDS),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "fortios_wirelesscontroller_vapgroup",
    literal: "WirelessControllerVapGroup",
    description: "Configure virtual Access Point (VAP) groups.",
    path: Some(CmdbPath::new("wireless-controller", "vap-group")),
    kind: ResourceKind::Table,
    fields: &FIELDS,
};

pub struct WirelessControllerVapGroup;

impl Resource for WirelessControllerVapGroup {
    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }
}
