mod support;

use async_trait::async_trait;
use domain::RequestContext;
use serde_json::json;
use std::sync::Arc;
use support::{Fixture, WELL, asset_id, ctx};
use wellview_alarms::{AlarmError, AlarmViewService, RtuAlarmQuery};
use wellview_storage::{
    AlarmConfigurationFilter, AlarmConfigurationRecord, AlarmConfigurationStore, LookupDocument,
    LookupKey, StorageError,
};
use wellview_telemetry::MemoryDiagnosticLog;

struct FailingAlarmStore;

#[async_trait]
impl AlarmConfigurationStore for FailingAlarmStore {
    async fn list_alarm_configurations(
        &self,
        _ctx: &RequestContext,
        _filter: &AlarmConfigurationFilter,
    ) -> Result<Vec<AlarmConfigurationRecord>, StorageError> {
        Err(StorageError::new("connection reset"))
    }
}

#[test]
fn builder_requires_every_collaborator() {
    let fixture = Fixture::empty();
    let result = AlarmViewService::builder()
        .asset_master(fixture.assets.clone())
        .customers(fixture.customers.clone())
        .lookups(fixture.lookups.clone())
        .alarm_configurations(fixture.alarms.clone())
        .parameters(fixture.parameters.clone())
        .notifications(fixture.notifications.clone())
        .diagnostic_log(Arc::new(MemoryDiagnosticLog::new()))
        .build();

    assert!(matches!(
        result,
        Err(AlarmError::MissingCollaborator("cameras"))
    ));
}

#[tokio::test]
async fn store_fault_aborts_accessor() {
    let fixture = Fixture::well();
    let service = AlarmViewService::builder()
        .asset_master(fixture.assets.clone())
        .customers(fixture.customers.clone())
        .lookups(fixture.lookups.clone())
        .alarm_configurations(Arc::new(FailingAlarmStore))
        .parameters(fixture.parameters.clone())
        .notifications(fixture.notifications.clone())
        .cameras(fixture.cameras.clone())
        .diagnostic_log(fixture.log.clone())
        .build()
        .expect("service");

    let err = service
        .get_host_alarms(&ctx(), &asset_id(WELL))
        .await
        .expect_err("fault");
    assert_eq!(err.to_string(), "storage error: connection reset");

    let err = service
        .get_facility(&ctx(), &asset_id(WELL))
        .await
        .expect_err("fault");
    assert!(matches!(err, AlarmError::Storage(_)));
}

#[tokio::test]
async fn malformed_document_is_a_store_fault() {
    let fixture = Fixture::well();
    fixture
        .alarms
        .insert(json!({
            "AlarmCategory": "RTU",
            "LegacyId": { "AlarmID": "bad", "POCType": "eight" },
            "Register": 10001
        }))
        .expect("insert");
    let service = fixture.service();

    let err = service
        .get_rtu_alarm_configuration(&ctx(), &asset_id(WELL), RtuAlarmQuery::default())
        .await
        .expect_err("decode failure");
    assert!(matches!(err, AlarmError::Storage(_)));
}

#[tokio::test]
async fn repeated_lookups_are_idempotent() {
    let fixture = Fixture::well();
    fixture.lookup(
        "States",
        json!({ "StatesId": "40", "Value": "1" }),
        json!({ "Text": "Running", "PhraseId": 77 }),
    );
    fixture.lookup(
        "LocalePhrases",
        json!({ "PhraseId": "77" }),
        json!({ "Translations": { "en": "Running", "es": "En marcha" } }),
    );
    let service = fixture.service();
    let references = service.references();
    let key = LookupKey::State {
        states_id: 40,
        value: 1,
    };

    let first = references.lookup(&ctx(), &key).await.expect("lookup");
    let second = references.lookup(&ctx(), &key).await.expect("lookup");
    assert_eq!(first, second);
    assert!(matches!(first, Some(LookupDocument::State(ref state)) if state.text == "Running"));

    let spanish = ctx().with_locale("es");
    let text = references
        .state_text(&spanish, 40, 1)
        .await
        .expect("state text");
    assert_eq!(text.as_deref(), Some("En marcha"));
    assert_eq!(
        references.state_text(&spanish, 40, 1).await.expect("state text"),
        text
    );

    let missing = references
        .state_text(&ctx(), 40, 9)
        .await
        .expect("state text");
    assert!(missing.is_none());
}
