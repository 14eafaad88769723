mod support;

use domain::CustomerId;
use serde_json::json;
use support::{Fixture, POC_TYPE, UNKNOWN, WELL, asset_id, ctx};
use wellview_alarms::AlarmViewDetail;
use wellview_storage::AlarmCategory;

#[tokio::test]
async fn host_and_facility_tags_are_merged_in_register_order() {
    let fixture = Fixture::well();
    fixture.host_alarm("host-2008", 2008, 1);
    fixture.facility_tag_alarm("tag-3001", 3001, 0);
    fixture.host_alarm("host-2005", 2005, 1);
    fixture.facility_tag_alarm("tag-1001", 1001, 0);
    let service = fixture.service();

    let alarms = service
        .get_host_alarms(&ctx(), &asset_id(WELL))
        .await
        .expect("host alarms");

    let registers: Vec<i32> = alarms.iter().map(|alarm| alarm.register).collect();
    assert_eq!(registers, vec![1001, 2005, 2008, 3001]);
    let categories: Vec<AlarmCategory> = alarms.iter().map(|alarm| alarm.category).collect();
    assert_eq!(
        categories,
        vec![
            AlarmCategory::FacilityTag,
            AlarmCategory::Host,
            AlarmCategory::Host,
            AlarmCategory::FacilityTag,
        ]
    );
}

#[tokio::test]
async fn duplicate_alarm_ids_collapse() {
    let fixture = Fixture::well();
    fixture.host_alarm("host-2005", 2005, 1);
    fixture.host_alarm("host-2005", 2005, 1);
    fixture.facility_tag_alarm("host-2005", 2005, 0);
    let service = fixture.service();

    let alarms = service
        .get_host_alarms(&ctx(), &asset_id(WELL))
        .await
        .expect("host alarms");

    // 同 ID 不同类别各保留一条，Host 在前
    assert_eq!(alarms.len(), 2);
    assert_eq!(alarms[0].category, AlarmCategory::Host);
    assert_eq!(alarms[1].category, AlarmCategory::FacilityTag);
}

#[tokio::test]
async fn shared_alarm_id_shares_notification_state() {
    let fixture = Fixture::well();
    fixture.host_alarm("shared", 2005, 1);
    fixture.facility_tag_alarm("shared", 2005, 0);
    fixture.notification("shared", 80, 1_700_000_000_000, false);
    let service = fixture.service();

    let alarms = service
        .get_host_alarms(&ctx(), &asset_id(WELL))
        .await
        .expect("host alarms");

    // 通知行不带类别，按 (节点, 告警 ID) 合并
    assert_eq!(alarms.len(), 2);
    assert!(alarms.iter().all(|alarm| alarm.notification.active));
    assert!(
        alarms
            .iter()
            .all(|alarm| alarm.notification.last_transaction_id == Some(80))
    );
}

#[tokio::test]
async fn malformed_alarm_of_other_node_does_not_fail_accessor() {
    let fixture = Fixture::well();
    fixture.host_alarm("host-2005", 2005, 1);
    fixture
        .alarms
        .insert(json!({
            "AlarmCategory": "Host",
            "LegacyId": { "AlarmID": "host-bad", "NodeID": "Well 99" },
            "Register": 2005
        }))
        .expect("insert");
    let service = fixture.service();

    let alarms = service
        .get_host_alarms(&ctx(), &asset_id(WELL))
        .await
        .expect("host alarms");

    assert_eq!(alarms.len(), 1);
    assert_eq!(alarms[0].alarm_id, "host-2005");
}

#[tokio::test]
async fn unknown_asset_returns_empty_and_logs_once() {
    let fixture = Fixture::well();
    fixture.host_alarm("host-2005", 2005, 1);
    let service = fixture.service();

    let alarms = service
        .get_host_alarms(&ctx(), &asset_id(UNKNOWN))
        .await
        .expect("host alarms");

    assert!(alarms.is_empty());
    assert_eq!(fixture.missing_node_events(), 1);
}

#[tokio::test]
async fn other_customer_sees_missing_node() {
    let fixture = Fixture::well();
    fixture.host_alarm("host-2005", 2005, 1);
    let service = fixture.service();
    let other = domain::RequestContext::new(
        CustomerId::parse("9a3f3c4e-2b1d-4c55-8e0a-7c6d5b4a3f21").expect("uuid"),
        "corr-other",
    );

    let alarms = service
        .get_host_alarms(&other, &asset_id(WELL))
        .await
        .expect("host alarms");

    assert!(alarms.is_empty());
    assert_eq!(fixture.missing_node_events(), 1);
}

#[tokio::test]
async fn notifications_mark_latest_state() {
    let fixture = Fixture::well();
    fixture.host_alarm("host-2005", 2005, 1);
    fixture.host_alarm("host-2008", 2008, 1);
    fixture.notification("host-2005", 70, 1_700_000_000_000, true);
    fixture.notification("host-2005", 71, 1_700_000_060_000, false);
    let service = fixture.service();

    let alarms = service
        .get_host_alarms(&ctx(), &asset_id(WELL))
        .await
        .expect("host alarms");

    let active = &alarms[0].notification;
    assert!(active.active);
    assert!(!active.acknowledged);
    assert_eq!(active.last_transaction_id, Some(71));
    assert_eq!(active.last_event_ts_ms, Some(1_700_000_060_000));

    let inactive = &alarms[1].notification;
    assert!(!inactive.active);
    assert!(inactive.last_transaction_id.is_none());
}

#[tokio::test]
async fn host_parameters_and_localized_type_names() {
    let fixture = Fixture::well();
    fixture.host_alarm("host-2005", 2005, 1);
    fixture.register_parameter(
        POC_TYPE,
        2005,
        json!({ "Description": "Tubing pressure", "PhraseId": 900, "UnitType": 4 }),
    );
    fixture.lookup(
        "UnitTypes",
        json!({ "UnitTypeId": "4" }),
        json!({ "Description": "Pounds per square inch", "Abbreviation": "psi" }),
    );
    fixture.lookup(
        "LocalePhrases",
        json!({ "PhraseId": "900" }),
        json!({ "Translations": { "en": "Tubing pressure", "es": "Presión de tubería" } }),
    );
    fixture.lookup(
        "HostAlarmTypes",
        json!({ "HostAlarmTypeId": "1" }),
        json!({ "Name": "Limit", "PhraseId": 901 }),
    );
    fixture.lookup(
        "LocalePhrases",
        json!({ "PhraseId": "901" }),
        json!({ "Translations": { "en": "Limit alarm" } }),
    );
    let service = fixture.service();

    let spanish = ctx().with_locale("es");
    let alarms = service
        .get_host_alarms(&spanish, &asset_id(WELL))
        .await
        .expect("host alarms");

    assert_eq!(alarms.len(), 1);
    assert_eq!(alarms[0].description.as_deref(), Some("Presión de tubería"));
    assert_eq!(alarms[0].units.as_deref(), Some("psi"));
    assert_eq!(alarms[0].lo_limit, Some(10.0));
    match &alarms[0].detail {
        AlarmViewDetail::Host {
            hihi_limit,
            host_alarm_type,
            ..
        } => {
            assert_eq!(*hihi_limit, Some(95.0));
            // 没有西班牙语译文时回退到 en
            assert_eq!(host_alarm_type.as_deref(), Some("Limit alarm"));
        }
        other => panic!("unexpected detail {other:?}"),
    }
}

#[tokio::test]
async fn xdiag_alarm_uses_output_description() {
    let fixture = Fixture::well();
    fixture.host_alarm("xdiag-12", 12, 7);
    fixture.register_parameter(POC_TYPE, 12, json!({ "Description": "Raw register 12" }));
    fixture.lookup(
        "HostAlarmTypes",
        json!({ "HostAlarmTypeId": "7" }),
        json!({ "Name": "XDiag", "IsXDiag": true }),
    );
    fixture.lookup(
        "XDiagOutputs",
        json!({ "OutputId": "12" }),
        json!({ "Name": "Pump fillage low" }),
    );
    let service = fixture.service();

    let alarms = service
        .get_host_alarms(&ctx(), &asset_id(WELL))
        .await
        .expect("host alarms");

    assert_eq!(alarms[0].description.as_deref(), Some("Pump fillage low"));
    assert!(matches!(
        &alarms[0].detail,
        AlarmViewDetail::Host { host_alarm_type: Some(name), .. } if name == "XDiag"
    ));
}
