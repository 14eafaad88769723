//! 视图模型（输出给外部映射层，camelCase 序列化）。

use domain::LegacyNodeId;
use serde::Serialize;
use wellview_storage::AlarmCategory;

/// 通知状态；没有匹配通知时为未激活。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationState {
    pub active: bool,
    pub acknowledged: bool,
    pub last_transaction_id: Option<i64>,
    pub last_event_ts_ms: Option<i64>,
}

/// 类别专属字段。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AlarmViewDetail {
    #[serde(rename_all = "camelCase")]
    Host {
        lolo_limit: Option<f64>,
        hihi_limit: Option<f64>,
        alarm_state: i32,
        host_alarm_type_id: i32,
        host_alarm_type: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Rtu {
        callout_enabled: bool,
        normal_state: Option<i32>,
        normal_state_text: Option<String>,
        locked: bool,
    },
    #[serde(rename_all = "camelCase")]
    FacilityTag {
        node_id: LegacyNodeId,
        group_node_id: Option<LegacyNodeId>,
        alarm_state: i32,
        alarm_state_text: Option<String>,
        group_id: Option<i32>,
        group_name: Option<String>,
    },
}

/// 富化后的告警视图。
///
/// 显示字段（description / units / dataType）只在参考数据命中时填充。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmView {
    pub alarm_id: String,
    pub category: AlarmCategory,
    pub register: i32,
    pub bit: i32,
    pub description: Option<String>,
    pub units: Option<String>,
    pub data_type: Option<String>,
    pub lo_limit: Option<f64>,
    pub hi_limit: Option<f64>,
    pub detail: AlarmViewDetail,
    pub notification: NotificationState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraAlarmView {
    pub camera_id: String,
    pub camera_name: String,
    pub alarm_type_id: i32,
    pub alarm_type: Option<String>,
    pub enabled: bool,
    pub active: bool,
    pub acknowledged: bool,
    pub last_event_id: Option<String>,
    pub last_event_ts_ms: Option<i64>,
}

/// 设施标签分组；`group_id` 为空表示未分组。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityTagGroupView {
    pub group_id: Option<i32>,
    pub name: Option<String>,
    pub display_order: Option<i32>,
    pub alarms: Vec<AlarmView>,
}

/// 设施头部与明细。资产不存在时 `node_id` 为空，其余字段为缺省值。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityView {
    pub node_id: Option<LegacyNodeId>,
    pub asset_name: Option<String>,
    pub customer_name: Option<String>,
    pub application_id: Option<i32>,
    pub is_facility: bool,
    pub groups: Vec<FacilityTagGroupView>,
    pub host_alarms: Vec<AlarmView>,
}
