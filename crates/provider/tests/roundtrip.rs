//! Property tests: converting a configuration to an API object and back
//! yields the configuration again.

use fortios_provider::expand::expand;
use fortios_provider::flatten::{flatten, FlattenMode};
use fortios_provider::resources::{logfortianalyzer3_setting, log_customfield, wirelesscontroller_vapgroup};
use fortios_provider::schema::ResourceSchema;
use fortios_provider::ResourceData;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn roundtrip(schema: &ResourceSchema, data: &ResourceData) -> ResourceData {
    let object = expand(schema, data).expect("expand");
    let mut back = ResourceData::new();
    flatten(schema, &object, &mut back, FlattenMode::Import).expect("flatten");
    back
}

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,14}"
}

proptest! {
    #[test]
    fn custom_field_roundtrips(fosid in "[0-9]{1,4}", field in name(), value in name()) {
        let data = ResourceData::new()
            .with("fosid", fosid)
            .with("name", field)
            .with("value", value);

        prop_assert_eq!(roundtrip(&log_customfield::SCHEMA, &data), data);
    }

    #[test]
    fn vap_group_roundtrips_in_order(
        group in name(),
        comment in proptest::option::of("[ -~]{1,40}"),
        vaps in proptest::collection::vec(name(), 1..6),
    ) {
        let mut data = ResourceData::new()
            .with("name", group)
            .with("vaps", Value::Array(vaps.iter().map(|v| json!({"name": v})).collect()));
        if let Some(comment) = comment {
            data.set("comment", Value::String(comment));
        }

        prop_assert_eq!(roundtrip(&wirelesscontroller_vapgroup::SCHEMA, &data), data);
    }

    #[test]
    fn faz_setting_roundtrips(
        status in prop_oneof![Just("enable"), Just("disable")],
        conn_timeout in 1i64..=3600,
        faz_type in 0i64..10,
        change_ip in proptest::option::of(0i64..=255),
        server in proptest::option::of("[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}"),
    ) {
        let mut attributes = Map::new();
        attributes.insert("status".to_string(), json!(status));
        attributes.insert("conn_timeout".to_string(), json!(conn_timeout));
        attributes.insert("faz_type".to_string(), json!(faz_type));
        if let Some(change_ip) = change_ip {
            attributes.insert("__change_ip".to_string(), json!(change_ip));
        }
        if let Some(server) = server {
            attributes.insert("server".to_string(), json!(server));
        }
        let data = ResourceData::from_attributes(attributes);

        prop_assert_eq!(roundtrip(&logfortianalyzer3_setting::SCHEMA, &data), data);
    }
}

#[test]
fn empty_list_is_not_sent_and_not_restored() {
    let data = ResourceData::new()
        .with("name", "guests")
        .with("vaps", json!([]));

    let object = expand(&wirelesscontroller_vapgroup::SCHEMA, &data).unwrap();
    assert!(!object.contains_key("vaps"));

    let back = roundtrip(&wirelesscontroller_vapgroup::SCHEMA, &data);
    assert!(back.get("vaps").is_none());
}
