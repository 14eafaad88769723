use serde_json::json;
use wellview_storage::documents::{
    decode_alarm_configuration, decode_asset_master, decode_lookup, decode_parameter,
};
use wellview_storage::{
    AlarmCategory, AlarmDetail, LookupDocument, LookupKey, ParameterScope,
};

#[test]
fn asset_without_configuration_defaults() {
    let document = json!({
        "LegacyId": {
            "AssetGUID": "61e72096-72d4-4878-afb7-f042e0a30118",
            "NodeID": "Well 1",
            "CustomerGUID": "0b0d5e33-6b59-4b73-9d89-4d6f0f7b1a10"
        },
        "Name": "Well 1"
    });
    let record = decode_asset_master(&document).expect("decode");
    assert_eq!(record.node_id.as_str(), "Well 1");
    assert_eq!(record.poc_type, 0);
    assert!(record.application_id.is_none());
    assert!(!record.is_facility);
    assert!(record.customer_id.is_some());
}

#[test]
fn asset_reads_nested_configuration() {
    let document = json!({
        "LegacyId": {
            "AssetGUID": "61e72096-72d4-4878-afb7-f042e0a30118",
            "NodeID": "Well 1"
        },
        "Document": { "POCType": 8, "ApplicationId": 3 }
    });
    let record = decode_asset_master(&document).expect("decode");
    assert_eq!(record.poc_type, 8);
    assert_eq!(record.application_id, Some(3));
    assert!(record.customer_id.is_none());
}

#[test]
fn asset_requires_node_id() {
    let document = json!({
        "LegacyId": { "AssetGUID": "61e72096-72d4-4878-afb7-f042e0a30118" }
    });
    let err = decode_asset_master(&document).expect_err("node id required");
    assert_eq!(err.to_string(), "asset_master: missing legacy key NodeID");
}

#[test]
fn detail_variant_follows_category() {
    let host = json!({
        "AlarmCategory": "Host",
        "LegacyId": { "AlarmID": "h-1", "NodeID": "Well 1" },
        "Register": 2005,
        "LoLimit": 10.0,
        "HiLimit": 90.0,
        "Document": { "LoLoLimit": 5.0, "HiHiLimit": 95.0, "AlarmState": 1, "HostAlarmTypeId": 2 }
    });
    let rtu = json!({
        "AlarmCategory": "RTU",
        "LegacyId": { "AlarmID": "r-1", "POCType": "8" },
        "Register": 10001,
        "Bit": 3,
        "Document": { "CalloutEnabled": true, "NormalState": 0, "Locked": false }
    });
    let facility_tag = json!({
        "AlarmCategory": "FacilityTag",
        "LegacyId": { "AlarmID": "f-1", "NodeID": "Pad 7" },
        "Register": 40001,
        "Document": { "AlarmState": 2, "GroupNodeId": "Pad" }
    });

    let host = decode_alarm_configuration(&host).expect("host");
    assert_eq!(host.category(), AlarmCategory::Host);
    assert!(matches!(
        host.detail,
        AlarmDetail::Host(ref detail) if detail.hihi_limit == Some(95.0) && detail.host_alarm_type_id == 2
    ));
    assert_eq!(host.bit, 0);

    let rtu = decode_alarm_configuration(&rtu).expect("rtu");
    assert_eq!(rtu.category(), AlarmCategory::Rtu);
    assert!(matches!(rtu.detail, AlarmDetail::Rtu(ref detail) if detail.poc_type == 8 && detail.callout_enabled));
    assert_eq!(rtu.bit, 3);

    let facility_tag = decode_alarm_configuration(&facility_tag).expect("facility tag");
    assert_eq!(facility_tag.category(), AlarmCategory::FacilityTag);
    match facility_tag.detail {
        AlarmDetail::FacilityTag(detail) => {
            assert_eq!(detail.node_id.as_str(), "Pad 7");
            assert_eq!(detail.group_node_id.as_ref().map(|id| id.as_str()), Some("Pad"));
            assert_eq!(detail.alarm_state, 2);
        }
        other => panic!("unexpected detail {other:?}"),
    }
}

#[test]
fn rtu_without_document_uses_defaults() {
    let rtu = json!({
        "AlarmCategory": "RTU",
        "LegacyId": { "AlarmID": "r-2", "POCType": "8" },
        "Register": 10002
    });
    let record = decode_alarm_configuration(&rtu).expect("rtu");
    match record.detail {
        AlarmDetail::Rtu(detail) => {
            assert!(!detail.callout_enabled);
            assert!(!detail.locked);
            assert!(detail.normal_state.is_none());
        }
        other => panic!("unexpected detail {other:?}"),
    }
}

#[test]
fn host_alarm_requires_type() {
    let host = json!({
        "AlarmCategory": "Host",
        "LegacyId": { "AlarmID": "h-1", "NodeID": "Well 1" },
        "Register": 2005,
        "Document": { "AlarmState": 1 }
    });
    assert!(decode_alarm_configuration(&host).is_err());
}

#[test]
fn unknown_category_is_rejected() {
    let document = json!({
        "AlarmCategory": "Satellite",
        "LegacyId": { "AlarmID": "x-1", "NodeID": "Well 1" },
        "Register": 1
    });
    assert!(decode_alarm_configuration(&document).is_err());

    let camera = json!({
        "AlarmCategory": "Camera",
        "LegacyId": { "AlarmID": "c-1", "NodeID": "Well 1" },
        "Register": 1
    });
    assert!(decode_alarm_configuration(&camera).is_err());
}

#[test]
fn state_lookup_uses_composite_key() {
    let document = json!({
        "LookupType": "States",
        "LegacyId": { "StatesId": "5", "Value": "1" },
        "Document": { "Text": "Open", "PhraseId": 301 }
    });
    let record = decode_lookup(&document).expect("decode");
    assert_eq!(record.key, LookupKey::State { states_id: 5, value: 1 });
    match record.document {
        LookupDocument::State(entry) => {
            assert_eq!(entry.text, "Open");
            assert_eq!(entry.phrase_id, Some(301));
        }
        other => panic!("unexpected document {other:?}"),
    }
}

#[test]
fn state_lookup_without_value_is_rejected() {
    let document = json!({
        "LookupType": "States",
        "LegacyId": { "StatesId": "5" },
        "Document": { "Text": "Open" }
    });
    let err = decode_lookup(&document).expect_err("value required");
    assert_eq!(err.to_string(), "lookups: missing legacy key Value");
}

#[test]
fn non_numeric_lookup_key_is_rejected() {
    let document = json!({
        "LookupType": "UnitTypes",
        "LegacyId": { "UnitTypeId": "psi" },
        "Document": { "Description": "Pounds per square inch" }
    });
    let err = decode_lookup(&document).expect_err("numeric key");
    assert_eq!(err.to_string(), "lookups: invalid legacy key UnitTypeId: psi");
}

#[test]
fn parameter_scope_follows_parameter_type() {
    let register = json!({
        "ParameterType": "Register",
        "LegacyId": { "POCType": "8", "Address": "2005" },
        "Description": "Tubing pressure",
        "UnitType": 4,
        "StateId": 7
    });
    let tag = json!({
        "ParameterType": "FacilityTag",
        "LegacyId": { "NodeID": "Pad 7", "Address": "40001", "Bit": "2" },
        "Description": "Tank level",
        "Document": { "FacilityTagGroupID": 11 }
    });

    let register = decode_parameter(&register).expect("register");
    assert_eq!(register.key.scope, ParameterScope::PocType(8));
    assert_eq!(register.key.address, 2005);
    assert!(register.key.bit.is_none());
    assert_eq!(register.unit_type_id, Some(4));
    assert_eq!(register.states_id, Some(7));

    let tag = decode_parameter(&tag).expect("tag");
    assert_eq!(tag.key.scope, ParameterScope::Node("Pad 7".into()));
    assert_eq!(tag.key.bit, Some(2));
    assert_eq!(tag.facility_tag_group_id, Some(11));
}
