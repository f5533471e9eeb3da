//! Global settings of the third FortiAnalyzer

use fortios_sdk::CmdbPath;

use super::Resource;
use crate::schema::{FieldSchema, ResourceKind, ResourceSchema};

static FIELDS: [FieldSchema; 19] = [
    FieldSchema::string("status").computed(),
    FieldSchema::string("ips_archive").computed(),
    FieldSchema::string("server").string_len(0, 63).computed(),
    FieldSchema::string("hmac_algorithm").computed(),
    FieldSchema::string("enc_algorithm").computed(),
    FieldSchema::string("ssl_min_proto_version").computed(),
    FieldSchema::int("conn_timeout").int_between(1, 3600).computed(),
    FieldSchema::int("monitor_keepalive_period").int_between(1, 120).computed(),
    FieldSchema::int("monitor_failure_retry_period").int_between(1, 86400).computed(),
    FieldSchema::string("mgmt_name").string_len(0, 35).computed(),
    FieldSchema::int("faz_type").computed(),
    FieldSchema::string("certificate").string_len(0, 35).computed(),
    FieldSchema::string("source_ip").string_len(0, 63).computed(),
    FieldSchema::int("__change_ip")
        .with_wire_name("__change_ip")
        .int_between(0, 255)
        .computed(),
    FieldSchema::string("upload_option").computed(),
    FieldSchema::string("upload_interval").computed(),
    FieldSchema::string("upload_day").computed(),
    FieldSchema::string("upload_time").computed(),
    FieldSchema::string("reliable").computed(),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "fortios_logfortianalyzer3_setting",
    literal: "LogFortianalyzer3Setting",
    description: "Global FortiAnalyzer settings.",
    path: Some(CmdbPath::new("log.fortianalyzer3", "setting")),
    kind: ResourceKind::Singleton,
    fields: &FIELDS,
};

pub struct LogFortianalyzer3Setting;

impl Resource for LogFortianalyzer3Setting {
    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }
}
