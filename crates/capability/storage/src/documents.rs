//! 文档解码
//!
//! 所有集合都以 JSON 文档保存（内存实现为 `serde_json::Value`，Postgres 为 jsonb）。
//! 本模块是唯一的解码边界：
//! 1. 先读取判别字段（`LookupType` / `AlarmCategory` / `ParameterType`）
//! 2. 再把 `Document` 载荷解析为该判别值对应的封闭变体
//! 3. `LegacyId` 字符串字典在这里一次性转换为类型化键
//!
//! 判别值未知、必需遗留键缺失或数字键无法解析都视为存储故障。

use crate::error::StorageError;
use crate::models::{
    AlarmCategory, AlarmConfigurationRecord, AlarmDetail, AssetMasterRecord,
    CameraAlarmConfigRecord, CameraAlarmEventRecord, CameraRecord, CustomerRecord,
    FacilityTagAlarmDetail, HostAlarmDetail, LookupDocument, LookupKey, LookupRecord, LookupType,
    NotificationRecord, ParameterKey, ParameterRecord, ParameterScope, RtuAlarmDetail,
};
use domain::{AssetId, CustomerId, LegacyNodeId};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

pub const ASSET_MASTER: &str = "asset_master";
pub const CUSTOMERS: &str = "customers";
pub const LOOKUPS: &str = "lookups";
pub const ALARM_CONFIGURATIONS: &str = "alarm_configurations";
pub const PARAMETERS: &str = "parameters";
pub const NOTIFICATIONS: &str = "notifications";
pub const CAMERAS: &str = "cameras";
pub const CAMERA_ALARM_CONFIGS: &str = "camera_alarm_configs";
pub const CAMERA_ALARM_EVENTS: &str = "camera_alarm_events";

/// 遗留键字典字段名。
pub const LEGACY_ID: &str = "LegacyId";

type LegacyId = HashMap<String, String>;

// ============================================================================
// 原始文档辅助
// ============================================================================

/// 读取顶层判别字段（解码前过滤用）。
pub fn discriminator<'a>(document: &'a Value, field: &str) -> Option<&'a str> {
    document.get(field).and_then(Value::as_str)
}

/// 读取 `LegacyId` 中的字段（解码前过滤用）。
pub fn legacy_value<'a>(document: &'a Value, field: &str) -> Option<&'a str> {
    document
        .get(LEGACY_ID)
        .and_then(|legacy| legacy.get(field))
        .and_then(Value::as_str)
}

fn parse<T: DeserializeOwned>(collection: &str, document: &Value) -> Result<T, StorageError> {
    T::deserialize(document).map_err(|err| StorageError::decode(collection, err))
}

/// 解析 `Document` 载荷；缺失的载荷按空对象处理，由各字段默认值兜底。
fn payload<T: DeserializeOwned>(collection: &str, value: Value) -> Result<T, StorageError> {
    let value = match value {
        Value::Null => Value::Object(serde_json::Map::new()),
        value => value,
    };
    serde_json::from_value(value).map_err(|err| StorageError::decode(collection, err))
}

fn legacy<'a>(collection: &str, legacy_id: &'a LegacyId, field: &str) -> Result<&'a str, StorageError> {
    legacy_id
        .get(field)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| StorageError::decode(collection, format!("missing legacy key {field}")))
}

fn legacy_opt<'a>(legacy_id: &'a LegacyId, field: &str) -> Option<&'a str> {
    legacy_id
        .get(field)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn parse_number<T: std::str::FromStr>(
    collection: &str,
    field: &str,
    value: &str,
) -> Result<T, StorageError> {
    value.parse::<T>().map_err(|_| {
        StorageError::decode(collection, format!("invalid legacy key {field}: {value}"))
    })
}

fn legacy_i32(collection: &str, legacy_id: &LegacyId, field: &str) -> Result<i32, StorageError> {
    parse_number(collection, field, legacy(collection, legacy_id, field)?)
}

fn legacy_opt_i32(
    collection: &str,
    legacy_id: &LegacyId,
    field: &str,
) -> Result<Option<i32>, StorageError> {
    legacy_opt(legacy_id, field)
        .map(|value| parse_number(collection, field, value))
        .transpose()
}

// ============================================================================
// 资产与客户
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AssetMasterDocument {
    legacy_id: LegacyId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    document: Option<AssetConfigurationDocument>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
struct AssetConfigurationDocument {
    #[serde(default, rename = "POCType")]
    poc_type: Option<i32>,
    #[serde(default)]
    application_id: Option<i32>,
    #[serde(default)]
    is_facility: Option<bool>,
}

pub fn decode_asset_master(document: &Value) -> Result<AssetMasterRecord, StorageError> {
    let raw: AssetMasterDocument = parse(ASSET_MASTER, document)?;
    let asset_id = legacy(ASSET_MASTER, &raw.legacy_id, "AssetGUID")?;
    let asset_id = AssetId::parse(asset_id)
        .map_err(|err| StorageError::decode(ASSET_MASTER, format!("AssetGUID: {err}")))?;
    let customer_id = legacy_opt(&raw.legacy_id, "CustomerGUID")
        .map(|value| {
            CustomerId::parse(value)
                .map_err(|err| StorageError::decode(ASSET_MASTER, format!("CustomerGUID: {err}")))
        })
        .transpose()?;
    let node_id = LegacyNodeId::new(legacy(ASSET_MASTER, &raw.legacy_id, "NodeID")?);
    let configuration = raw.document.unwrap_or_default();

    Ok(AssetMasterRecord {
        asset_id,
        customer_id,
        node_id,
        name: raw.name,
        poc_type: configuration.poc_type.unwrap_or(0),
        application_id: configuration.application_id,
        is_facility: configuration.is_facility.unwrap_or(false),
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CustomerDocument {
    legacy_id: LegacyId,
    name: String,
}

pub fn decode_customer(document: &Value) -> Result<CustomerRecord, StorageError> {
    let raw: CustomerDocument = parse(CUSTOMERS, document)?;
    let customer_id = CustomerId::parse(legacy(CUSTOMERS, &raw.legacy_id, "CustomerGUID")?)
        .map_err(|err| StorageError::decode(CUSTOMERS, format!("CustomerGUID: {err}")))?;
    Ok(CustomerRecord {
        customer_id,
        name: raw.name,
    })
}

// ============================================================================
// 参考数据
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LookupEnvelope {
    lookup_type: LookupType,
    legacy_id: LegacyId,
    #[serde(default)]
    document: Value,
}

pub fn decode_lookup(document: &Value) -> Result<LookupRecord, StorageError> {
    let raw: LookupEnvelope = parse(LOOKUPS, document)?;
    let primary = legacy_i32(LOOKUPS, &raw.legacy_id, raw.lookup_type.primary_field())?;
    let body = raw.document;

    let (key, document) = match raw.lookup_type {
        LookupType::States => (
            LookupKey::State {
                states_id: primary,
                value: legacy_i32(LOOKUPS, &raw.legacy_id, "Value")?,
            },
            LookupDocument::State(payload(LOOKUPS, body)?),
        ),
        LookupType::LocalePhrases => (
            LookupKey::Phrase { phrase_id: primary },
            LookupDocument::Phrase(payload(LOOKUPS, body)?),
        ),
        LookupType::DataTypes => (
            LookupKey::DataType {
                data_type_id: primary,
            },
            LookupDocument::DataType(payload(LOOKUPS, body)?),
        ),
        LookupType::UnitTypes => (
            LookupKey::UnitType {
                unit_type_id: primary,
            },
            LookupDocument::UnitType(payload(LOOKUPS, body)?),
        ),
        LookupType::HostAlarmTypes => (
            LookupKey::HostAlarmType {
                host_alarm_type_id: primary,
            },
            LookupDocument::HostAlarmType(payload(LOOKUPS, body)?),
        ),
        LookupType::XDiagOutputs => (
            LookupKey::XDiagOutput { output_id: primary },
            LookupDocument::XDiagOutput(payload(LOOKUPS, body)?),
        ),
        LookupType::CameraAlarmTypes => (
            LookupKey::CameraAlarmType {
                alarm_type_id: primary,
            },
            LookupDocument::CameraAlarmType(payload(LOOKUPS, body)?),
        ),
        LookupType::FacilityTagGroups => (
            LookupKey::FacilityTagGroup { group_id: primary },
            LookupDocument::FacilityTagGroup(payload(LOOKUPS, body)?),
        ),
    };

    Ok(LookupRecord { key, document })
}

// ============================================================================
// 告警配置
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AlarmConfigurationEnvelope {
    alarm_category: AlarmCategory,
    legacy_id: LegacyId,
    register: i32,
    #[serde(default)]
    bit: i32,
    #[serde(default)]
    lo_limit: Option<f64>,
    #[serde(default)]
    hi_limit: Option<f64>,
    #[serde(default)]
    document: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HostAlarmDocument {
    #[serde(default, rename = "LoLoLimit")]
    lolo_limit: Option<f64>,
    #[serde(default, rename = "HiHiLimit")]
    hihi_limit: Option<f64>,
    #[serde(default)]
    alarm_state: i32,
    host_alarm_type_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RtuAlarmDocument {
    #[serde(default)]
    callout_enabled: bool,
    #[serde(default)]
    normal_state: Option<i32>,
    #[serde(default)]
    locked: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FacilityTagAlarmDocument {
    #[serde(default)]
    alarm_state: i32,
    #[serde(default)]
    group_node_id: Option<String>,
}

pub fn decode_alarm_configuration(document: &Value) -> Result<AlarmConfigurationRecord, StorageError> {
    let raw: AlarmConfigurationEnvelope = parse(ALARM_CONFIGURATIONS, document)?;
    let alarm_id = legacy(ALARM_CONFIGURATIONS, &raw.legacy_id, "AlarmID")?.to_string();

    let detail = match raw.alarm_category {
        AlarmCategory::Host => {
            let body: HostAlarmDocument = payload(ALARM_CONFIGURATIONS, raw.document)?;
            AlarmDetail::Host(HostAlarmDetail {
                node_id: LegacyNodeId::new(legacy(ALARM_CONFIGURATIONS, &raw.legacy_id, "NodeID")?),
                lolo_limit: body.lolo_limit,
                hihi_limit: body.hihi_limit,
                alarm_state: body.alarm_state,
                host_alarm_type_id: body.host_alarm_type_id,
            })
        }
        AlarmCategory::Rtu => {
            let body: RtuAlarmDocument = payload(ALARM_CONFIGURATIONS, raw.document)?;
            AlarmDetail::Rtu(RtuAlarmDetail {
                poc_type: legacy_i32(ALARM_CONFIGURATIONS, &raw.legacy_id, "POCType")?,
                callout_enabled: body.callout_enabled,
                normal_state: body.normal_state,
                locked: body.locked,
            })
        }
        AlarmCategory::FacilityTag => {
            let body: FacilityTagAlarmDocument = payload(ALARM_CONFIGURATIONS, raw.document)?;
            AlarmDetail::FacilityTag(FacilityTagAlarmDetail {
                node_id: LegacyNodeId::new(legacy(ALARM_CONFIGURATIONS, &raw.legacy_id, "NodeID")?),
                group_node_id: body
                    .group_node_id
                    .filter(|value| !value.trim().is_empty())
                    .map(LegacyNodeId::new),
                alarm_state: body.alarm_state,
            })
        }
        AlarmCategory::Camera => {
            return Err(StorageError::decode(
                ALARM_CONFIGURATIONS,
                "camera alarms are configured per device",
            ));
        }
    };

    Ok(AlarmConfigurationRecord {
        alarm_id,
        register: raw.register,
        bit: raw.bit,
        lo_limit: raw.lo_limit,
        hi_limit: raw.hi_limit,
        detail,
    })
}

// ============================================================================
// 参数元数据
// ============================================================================

#[derive(Deserialize)]
enum ParameterType {
    Register,
    FacilityTag,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParameterEnvelope {
    parameter_type: ParameterType,
    legacy_id: LegacyId,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    phrase_id: Option<i32>,
    #[serde(default)]
    data_type: Option<i32>,
    #[serde(default)]
    unit_type: Option<i32>,
    #[serde(default)]
    state_id: Option<i32>,
    #[serde(default)]
    document: Value,
}

#[derive(Deserialize)]
struct ParameterCategoryDocument {
    #[serde(default, rename = "FacilityTagGroupID")]
    facility_tag_group_id: Option<i32>,
}

pub fn decode_parameter(document: &Value) -> Result<ParameterRecord, StorageError> {
    let raw: ParameterEnvelope = parse(PARAMETERS, document)?;
    let scope = match raw.parameter_type {
        ParameterType::Register => {
            ParameterScope::PocType(legacy_i32(PARAMETERS, &raw.legacy_id, "POCType")?)
        }
        ParameterType::FacilityTag => {
            ParameterScope::Node(LegacyNodeId::new(legacy(PARAMETERS, &raw.legacy_id, "NodeID")?))
        }
    };
    let category: ParameterCategoryDocument = payload(PARAMETERS, raw.document)?;

    Ok(ParameterRecord {
        key: ParameterKey {
            scope,
            address: legacy_i32(PARAMETERS, &raw.legacy_id, "Address")?,
            bit: legacy_opt_i32(PARAMETERS, &raw.legacy_id, "Bit")?,
        },
        description: raw.description.filter(|value| !value.trim().is_empty()),
        phrase_id: raw.phrase_id,
        data_type_id: raw.data_type,
        unit_type_id: raw.unit_type,
        states_id: raw.state_id,
        facility_tag_group_id: category.facility_tag_group_id,
    })
}

// ============================================================================
// 通知
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NotificationDocument {
    legacy_id: LegacyId,
    event_time_ms: i64,
    #[serde(default)]
    acknowledged_time_ms: Option<i64>,
}

pub fn decode_notification(document: &Value) -> Result<NotificationRecord, StorageError> {
    let raw: NotificationDocument = parse(NOTIFICATIONS, document)?;
    let transaction_id = legacy(NOTIFICATIONS, &raw.legacy_id, "TransactionID")?;
    Ok(NotificationRecord {
        alarm_id: legacy(NOTIFICATIONS, &raw.legacy_id, "AlarmID")?.to_string(),
        node_id: LegacyNodeId::new(legacy(NOTIFICATIONS, &raw.legacy_id, "NodeID")?),
        transaction_id: parse_number(NOTIFICATIONS, "TransactionID", transaction_id)?,
        event_ts_ms: raw.event_time_ms,
        acknowledged_at_ms: raw.acknowledged_time_ms,
    })
}

// ============================================================================
// 摄像头
// ============================================================================

fn enabled_by_default() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CameraDocument {
    legacy_id: LegacyId,
    #[serde(default)]
    name: String,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
}

pub fn decode_camera(document: &Value) -> Result<CameraRecord, StorageError> {
    let raw: CameraDocument = parse(CAMERAS, document)?;
    Ok(CameraRecord {
        camera_id: legacy(CAMERAS, &raw.legacy_id, "CameraID")?.to_string(),
        node_id: LegacyNodeId::new(legacy(CAMERAS, &raw.legacy_id, "NodeID")?),
        name: raw.name,
        enabled: raw.enabled,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CameraAlarmConfigDocument {
    legacy_id: LegacyId,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
}

pub fn decode_camera_alarm_config(document: &Value) -> Result<CameraAlarmConfigRecord, StorageError> {
    let raw: CameraAlarmConfigDocument = parse(CAMERA_ALARM_CONFIGS, document)?;
    Ok(CameraAlarmConfigRecord {
        camera_id: legacy(CAMERA_ALARM_CONFIGS, &raw.legacy_id, "CameraID")?.to_string(),
        alarm_type_id: legacy_i32(CAMERA_ALARM_CONFIGS, &raw.legacy_id, "AlarmTypeID")?,
        enabled: raw.enabled,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CameraAlarmEventDocument {
    legacy_id: LegacyId,
    event_time_ms: i64,
    #[serde(default)]
    acknowledged: bool,
}

pub fn decode_camera_alarm_event(document: &Value) -> Result<CameraAlarmEventRecord, StorageError> {
    let raw: CameraAlarmEventDocument = parse(CAMERA_ALARM_EVENTS, document)?;
    Ok(CameraAlarmEventRecord {
        event_id: legacy(CAMERA_ALARM_EVENTS, &raw.legacy_id, "EventID")?.to_string(),
        camera_id: legacy(CAMERA_ALARM_EVENTS, &raw.legacy_id, "CameraID")?.to_string(),
        alarm_type_id: legacy_i32(CAMERA_ALARM_EVENTS, &raw.legacy_id, "AlarmTypeID")?,
        event_ts_ms: raw.event_time_ms,
        acknowledged: raw.acknowledged,
    })
}
