//! Per-VDOM sFlow collector settings

use fortios_sdk::CmdbPath;

use super::Resource;
use crate::schema::{FieldSchema, ResourceKind, ResourceSchema};

static FIELDS: [FieldSchema; 4] = [
    FieldSchema::string("vdom_sflow").computed(),
    FieldSchema::string("collector_ip").computed(),
    FieldSchema::int("collector_port").int_between(0, 65535).computed(),
    FieldSchema::string("source_ip").computed(),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "fortios_system_vdomsflow",
    literal: "SystemVdomSflow",
    description: "Configure sFlow per VDOM to add or change the IP address and UDP port that FortiGate sFlow agents in this VDOM use to send sFlow datagrams to an sFlow collector.",
    path: Some(CmdbPath::new("system", "vdom-sflow")),
    kind: ResourceKind::Singleton,
    fields: &FIELDS,
};

pub struct SystemVdomSflow;

impl Resource for SystemVdomSflow {
    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }
}
