mod support;

use serde_json::json;
use support::{Fixture, POC_TYPE, UNKNOWN, WELL, asset_id, ctx};
use wellview_alarms::{AlarmViewDetail, RtuAlarmQuery};
use wellview_storage::AlarmCategory;

#[tokio::test]
async fn single_rtu_alarm_for_well() {
    let fixture = Fixture::well();
    fixture.rtu_alarm("rtu-10001", POC_TYPE, 10001, 0);
    let service = fixture.service();

    let alarms = service
        .get_rtu_alarm_configuration(&ctx(), &asset_id(WELL), RtuAlarmQuery::default())
        .await
        .expect("rtu alarms");

    assert_eq!(alarms.len(), 1);
    assert_eq!(alarms[0].register, 10001);
    assert_eq!(alarms[0].category, AlarmCategory::Rtu);
    assert_eq!(fixture.missing_node_events(), 0);
}

#[tokio::test]
async fn unknown_asset_logs_missing_node() {
    let fixture = Fixture::well();
    fixture.rtu_alarm("rtu-10001", POC_TYPE, 10001, 0);
    let service = fixture.service();

    let alarms = service
        .get_rtu_alarm_configuration(&ctx(), &asset_id(UNKNOWN), RtuAlarmQuery::default())
        .await
        .expect("rtu alarms");

    assert!(alarms.is_empty());
    assert_eq!(fixture.missing_node_events(), 1);
    assert_eq!(fixture.log.events()[0].correlation_id(), "corr-test");
}

#[tokio::test]
async fn poc_type_filter_overrides_asset() {
    let fixture = Fixture::well();
    fixture.rtu_alarm("rtu-own", POC_TYPE, 10001, 0);
    fixture.rtu_alarm("rtu-sub-1", 17, 10005, 0);
    fixture.rtu_alarm("rtu-sub-2", 17, 10003, 2);
    let service = fixture.service();

    let query = RtuAlarmQuery {
        poc_type: Some(17),
        ..RtuAlarmQuery::default()
    };
    let alarms = service
        .get_rtu_alarm_configuration(&ctx(), &asset_id(WELL), query)
        .await
        .expect("rtu alarms");

    let ids: Vec<&str> = alarms.iter().map(|alarm| alarm.alarm_id.as_str()).collect();
    assert_eq!(ids, vec!["rtu-sub-2", "rtu-sub-1"]);
}

#[tokio::test]
async fn register_and_bit_filters() {
    let fixture = Fixture::well();
    fixture.rtu_alarm("bit-0", POC_TYPE, 10001, 0);
    fixture.rtu_alarm("bit-1", POC_TYPE, 10001, 1);
    fixture.rtu_alarm("other", POC_TYPE, 10002, 1);
    let service = fixture.service();

    let query = RtuAlarmQuery {
        register: Some(10001),
        bit: Some(1),
        ..RtuAlarmQuery::default()
    };
    let alarms = service
        .get_rtu_alarm_configuration(&ctx(), &asset_id(WELL), query)
        .await
        .expect("rtu alarms");

    assert_eq!(alarms.len(), 1);
    assert_eq!(alarms[0].alarm_id, "bit-1");
}

#[tokio::test]
async fn parameter_metadata_and_state_text() {
    let fixture = Fixture::well();
    fixture.rtu_alarm("rtu-10001", POC_TYPE, 10001, 0);
    fixture.rtu_alarm("rtu-10002", POC_TYPE, 10002, 0);
    fixture.register_parameter(
        POC_TYPE,
        10001,
        json!({ "Description": "Motor run status", "DataType": 2, "UnitType": 5, "StateId": 40 }),
    );
    fixture.lookup("DataTypes", json!({ "DataTypeId": "2" }), json!({ "Description": "Boolean" }));
    fixture.lookup(
        "UnitTypes",
        json!({ "UnitTypeId": "5" }),
        json!({ "Description": "State", "Abbreviation": "st" }),
    );
    fixture.lookup(
        "States",
        json!({ "StatesId": "40", "Value": "0" }),
        json!({ "Text": "Stopped" }),
    );
    fixture.lookup(
        "States",
        json!({ "StatesId": "40", "Value": "1" }),
        json!({ "Text": "Running" }),
    );
    let service = fixture.service();

    let alarms = service
        .get_rtu_alarm_configuration(&ctx(), &asset_id(WELL), RtuAlarmQuery::default())
        .await
        .expect("rtu alarms");
    assert_eq!(alarms.len(), 2);

    let enriched = &alarms[0];
    assert_eq!(enriched.description.as_deref(), Some("Motor run status"));
    assert_eq!(enriched.units.as_deref(), Some("st"));
    assert_eq!(enriched.data_type.as_deref(), Some("Boolean"));
    match &enriched.detail {
        AlarmViewDetail::Rtu {
            callout_enabled,
            normal_state,
            normal_state_text,
            ..
        } => {
            assert!(*callout_enabled);
            assert_eq!(*normal_state, Some(0));
            assert_eq!(normal_state_text.as_deref(), Some("Stopped"));
        }
        other => panic!("unexpected detail {other:?}"),
    }

    // 没有参数行的告警只保留自身字段
    let bare = &alarms[1];
    assert!(bare.description.is_none());
    assert!(bare.units.is_none());
    assert!(matches!(
        &bare.detail,
        AlarmViewDetail::Rtu { normal_state_text: None, .. }
    ));
    assert!(!bare.notification.active);
}
