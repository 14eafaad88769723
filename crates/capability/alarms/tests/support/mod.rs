#![allow(dead_code)]

use domain::{AssetId, CustomerId, RequestContext};
use serde_json::{Value, json};
use std::sync::Arc;
use wellview_alarms::AlarmViewService;
use wellview_storage::{
    InMemoryAlarmConfigurationStore, InMemoryAssetMasterStore, InMemoryCameraStore,
    InMemoryCustomerStore, InMemoryLookupStore, InMemoryNotificationStore, InMemoryParameterStore,
};
use wellview_telemetry::MemoryDiagnosticLog;

pub const CUSTOMER: &str = "0b0d5e33-6b59-4b73-9d89-4d6f0f7b1a10";
pub const WELL: &str = "61e72096-72d4-4878-afb7-f042e0a30118";
pub const UNKNOWN: &str = "5d0c7a1e-93b2-4f0e-a7c4-2e8b1f6d9a33";
pub const NODE: &str = "Well 1";
pub const POC_TYPE: i32 = 8;

pub fn asset_id(value: &str) -> AssetId {
    AssetId::parse(value).expect("asset id")
}

pub fn ctx() -> RequestContext {
    RequestContext::new(CustomerId::parse(CUSTOMER).expect("customer id"), "corr-test")
}

/// 内存存储 + 内存诊断日志。
pub struct Fixture {
    pub assets: Arc<InMemoryAssetMasterStore>,
    pub customers: Arc<InMemoryCustomerStore>,
    pub lookups: Arc<InMemoryLookupStore>,
    pub alarms: Arc<InMemoryAlarmConfigurationStore>,
    pub parameters: Arc<InMemoryParameterStore>,
    pub notifications: Arc<InMemoryNotificationStore>,
    pub cameras: Arc<InMemoryCameraStore>,
    pub log: Arc<MemoryDiagnosticLog>,
}

impl Fixture {
    pub fn empty() -> Self {
        Self {
            assets: Arc::new(InMemoryAssetMasterStore::new()),
            customers: Arc::new(InMemoryCustomerStore::new()),
            lookups: Arc::new(InMemoryLookupStore::new()),
            alarms: Arc::new(InMemoryAlarmConfigurationStore::new()),
            parameters: Arc::new(InMemoryParameterStore::new()),
            notifications: Arc::new(InMemoryNotificationStore::new()),
            cameras: Arc::new(InMemoryCameraStore::new()),
            log: Arc::new(MemoryDiagnosticLog::new()),
        }
    }

    /// 一个客户名下的一口井（节点 "Well 1"，POCType 8）。
    pub fn well() -> Self {
        let fixture = Self::empty();
        fixture
            .customers
            .insert(json!({
                "LegacyId": { "CustomerGUID": CUSTOMER },
                "Name": "Permian Operating"
            }))
            .expect("customer");
        fixture
            .assets
            .insert(json!({
                "LegacyId": { "AssetGUID": WELL, "NodeID": NODE, "CustomerGUID": CUSTOMER },
                "Name": "Well 1",
                "Document": { "POCType": POC_TYPE, "ApplicationId": 3, "IsFacility": true }
            }))
            .expect("asset");
        fixture
    }

    pub fn service(&self) -> AlarmViewService {
        AlarmViewService::builder()
            .asset_master(self.assets.clone())
            .customers(self.customers.clone())
            .lookups(self.lookups.clone())
            .alarm_configurations(self.alarms.clone())
            .parameters(self.parameters.clone())
            .notifications(self.notifications.clone())
            .cameras(self.cameras.clone())
            .diagnostic_log(self.log.clone())
            .build()
            .expect("service")
    }

    pub fn missing_node_events(&self) -> usize {
        self.log.count("Missing node")
    }

    pub fn host_alarm(&self, alarm_id: &str, register: i32, host_alarm_type_id: i32) {
        self.alarms
            .insert(json!({
                "AlarmCategory": "Host",
                "LegacyId": { "AlarmID": alarm_id, "NodeID": NODE },
                "Register": register,
                "LoLimit": 10.0,
                "HiLimit": 90.0,
                "Document": {
                    "LoLoLimit": 5.0,
                    "HiHiLimit": 95.0,
                    "AlarmState": 1,
                    "HostAlarmTypeId": host_alarm_type_id
                }
            }))
            .expect("host alarm");
    }

    pub fn facility_tag_alarm(&self, alarm_id: &str, register: i32, alarm_state: i32) {
        self.alarms
            .insert(json!({
                "AlarmCategory": "FacilityTag",
                "LegacyId": { "AlarmID": alarm_id, "NodeID": NODE },
                "Register": register,
                "Document": { "AlarmState": alarm_state, "GroupNodeId": "Pad 7" }
            }))
            .expect("facility tag alarm");
    }

    pub fn rtu_alarm(&self, alarm_id: &str, poc_type: i32, register: i32, bit: i32) {
        self.alarms
            .insert(json!({
                "AlarmCategory": "RTU",
                "LegacyId": { "AlarmID": alarm_id, "POCType": poc_type.to_string() },
                "Register": register,
                "Bit": bit,
                "Document": { "CalloutEnabled": true, "NormalState": 0, "Locked": false }
            }))
            .expect("rtu alarm");
    }

    pub fn register_parameter(&self, poc_type: i32, address: i32, extra: Value) {
        let mut document = json!({
            "ParameterType": "Register",
            "LegacyId": { "POCType": poc_type.to_string(), "Address": address.to_string() }
        });
        merge(&mut document, extra);
        self.parameters.insert(document).expect("parameter");
    }

    pub fn tag_parameter(&self, address: i32, extra: Value) {
        let mut document = json!({
            "ParameterType": "FacilityTag",
            "LegacyId": { "NodeID": NODE, "Address": address.to_string() }
        });
        merge(&mut document, extra);
        self.parameters.insert(document).expect("parameter");
    }

    pub fn lookup(&self, lookup_type: &str, legacy_id: Value, document: Value) {
        self.lookups
            .insert(json!({
                "LookupType": lookup_type,
                "LegacyId": legacy_id,
                "Document": document
            }))
            .expect("lookup");
    }

    pub fn notification(&self, alarm_id: &str, transaction_id: i64, event_ts_ms: i64, acked: bool) {
        let mut document = json!({
            "LegacyId": {
                "AlarmID": alarm_id,
                "NodeID": NODE,
                "TransactionID": transaction_id.to_string()
            },
            "EventTimeMs": event_ts_ms
        });
        if acked {
            merge(&mut document, json!({ "AcknowledgedTimeMs": event_ts_ms + 1_000 }));
        }
        self.notifications.insert(document).expect("notification");
    }
}

fn merge(target: &mut Value, extra: Value) {
    if let (Value::Object(target), Value::Object(extra)) = (target, extra) {
        target.extend(extra);
    }
}
