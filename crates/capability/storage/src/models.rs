//! 数据模型
//!
//! 存储层对外只暴露类型化记录，文档里的遗留字符串键在解码时一次性转换为以下结构：
//! - 资产模型：AssetMasterRecord, CustomerRecord
//! - 参考数据：LookupType, LookupKey, LookupDocument, LookupRecord
//! - 告警配置：AlarmCategory, AlarmConfigurationRecord, AlarmDetail, AlarmConfigurationFilter
//! - 参数元数据：ParameterScope, ParameterKey, ParameterRecord
//! - 通知：NotificationRecord
//! - 摄像头：CameraRecord, CameraAlarmConfigRecord, CameraAlarmEventRecord

use domain::{AssetId, CustomerId, LegacyNodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// 资产与客户
// ============================================================================

/// 资产主记录（身份解析结果）。
#[derive(Debug, Clone, PartialEq)]
pub struct AssetMasterRecord {
    pub asset_id: AssetId,
    pub customer_id: Option<CustomerId>,
    pub node_id: LegacyNodeId,
    pub name: Option<String>,
    /// 控制器类型；配置子文档缺失时为 0。
    pub poc_type: i32,
    pub application_id: Option<i32>,
    pub is_facility: bool,
}

/// 客户记录。
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub name: String,
}

// ============================================================================
// 参考数据（通用代码表）
// ============================================================================

/// 参考数据判别类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum LookupType {
    States,
    LocalePhrases,
    DataTypes,
    UnitTypes,
    HostAlarmTypes,
    XDiagOutputs,
    CameraAlarmTypes,
    FacilityTagGroups,
}

impl LookupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupType::States => "States",
            LookupType::LocalePhrases => "LocalePhrases",
            LookupType::DataTypes => "DataTypes",
            LookupType::UnitTypes => "UnitTypes",
            LookupType::HostAlarmTypes => "HostAlarmTypes",
            LookupType::XDiagOutputs => "XDiagOutputs",
            LookupType::CameraAlarmTypes => "CameraAlarmTypes",
            LookupType::FacilityTagGroups => "FacilityTagGroups",
        }
    }

    /// 批量查询使用的主键字段（`LegacyId` 内）。
    pub fn primary_field(&self) -> &'static str {
        match self {
            LookupType::States => "StatesId",
            LookupType::LocalePhrases => "PhraseId",
            LookupType::DataTypes => "DataTypeId",
            LookupType::UnitTypes => "UnitTypeId",
            LookupType::HostAlarmTypes => "HostAlarmTypeId",
            LookupType::XDiagOutputs => "OutputId",
            LookupType::CameraAlarmTypes => "AlarmTypeId",
            LookupType::FacilityTagGroups => "GroupId",
        }
    }
}

/// 类型化的参考数据键。
///
/// 状态表需要 `StatesId + Value` 复合匹配，其余类型为单字段键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKey {
    State { states_id: i32, value: i32 },
    Phrase { phrase_id: i32 },
    DataType { data_type_id: i32 },
    UnitType { unit_type_id: i32 },
    HostAlarmType { host_alarm_type_id: i32 },
    XDiagOutput { output_id: i32 },
    CameraAlarmType { alarm_type_id: i32 },
    FacilityTagGroup { group_id: i32 },
}

impl LookupKey {
    pub fn lookup_type(&self) -> LookupType {
        match self {
            LookupKey::State { .. } => LookupType::States,
            LookupKey::Phrase { .. } => LookupType::LocalePhrases,
            LookupKey::DataType { .. } => LookupType::DataTypes,
            LookupKey::UnitType { .. } => LookupType::UnitTypes,
            LookupKey::HostAlarmType { .. } => LookupType::HostAlarmTypes,
            LookupKey::XDiagOutput { .. } => LookupType::XDiagOutputs,
            LookupKey::CameraAlarmType { .. } => LookupType::CameraAlarmTypes,
            LookupKey::FacilityTagGroup { .. } => LookupType::FacilityTagGroups,
        }
    }

    /// 主键值（批量查询按此匹配）。
    pub fn primary_id(&self) -> i32 {
        match *self {
            LookupKey::State { states_id, .. } => states_id,
            LookupKey::Phrase { phrase_id } => phrase_id,
            LookupKey::DataType { data_type_id } => data_type_id,
            LookupKey::UnitType { unit_type_id } => unit_type_id,
            LookupKey::HostAlarmType { host_alarm_type_id } => host_alarm_type_id,
            LookupKey::XDiagOutput { output_id } => output_id,
            LookupKey::CameraAlarmType { alarm_type_id } => alarm_type_id,
            LookupKey::FacilityTagGroup { group_id } => group_id,
        }
    }

    /// 状态表的第二个键（`Value`）；其余类型为 None。
    pub fn state_value(&self) -> Option<i32> {
        match *self {
            LookupKey::State { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// 状态表条目。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateEntry {
    pub text: String,
    #[serde(default)]
    pub phrase_id: Option<i32>,
}

/// 多语言短语。
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhraseEntry {
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataTypeEntry {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitTypeEntry {
    pub description: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostAlarmTypeEntry {
    pub name: String,
    #[serde(default)]
    pub phrase_id: Option<i32>,
    /// 该类型的主机告警寄存器指向 XDiag 输出而非控制器参数。
    #[serde(default, rename = "IsXDiag")]
    pub is_xdiag: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XDiagOutputEntry {
    pub name: String,
    #[serde(default)]
    pub phrase_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CameraAlarmTypeEntry {
    pub name: String,
    #[serde(default)]
    pub phrase_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FacilityTagGroupEntry {
    pub name: String,
    #[serde(default)]
    pub display_order: i32,
}

/// 参考数据载荷：每个判别值对应一个封闭变体。
#[derive(Debug, Clone, PartialEq)]
pub enum LookupDocument {
    State(StateEntry),
    Phrase(PhraseEntry),
    DataType(DataTypeEntry),
    UnitType(UnitTypeEntry),
    HostAlarmType(HostAlarmTypeEntry),
    XDiagOutput(XDiagOutputEntry),
    CameraAlarmType(CameraAlarmTypeEntry),
    FacilityTagGroup(FacilityTagGroupEntry),
}

/// 参考数据记录。
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRecord {
    pub key: LookupKey,
    pub document: LookupDocument,
}

// ============================================================================
// 告警配置
// ============================================================================

/// 告警类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlarmCategory {
    Host,
    #[serde(rename = "RTU")]
    Rtu,
    FacilityTag,
    Camera,
}

impl AlarmCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmCategory::Host => "Host",
            AlarmCategory::Rtu => "RTU",
            AlarmCategory::FacilityTag => "FacilityTag",
            AlarmCategory::Camera => "Camera",
        }
    }
}

/// 主机告警明细。
#[derive(Debug, Clone, PartialEq)]
pub struct HostAlarmDetail {
    pub node_id: LegacyNodeId,
    pub lolo_limit: Option<f64>,
    pub hihi_limit: Option<f64>,
    pub alarm_state: i32,
    pub host_alarm_type_id: i32,
}

/// RTU（寄存器/位）告警明细。按控制器类型定义，不属于单个资产。
#[derive(Debug, Clone, PartialEq)]
pub struct RtuAlarmDetail {
    pub poc_type: i32,
    pub callout_enabled: bool,
    pub normal_state: Option<i32>,
    pub locked: bool,
}

/// 场站标签告警明细。
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityTagAlarmDetail {
    pub node_id: LegacyNodeId,
    pub group_node_id: Option<LegacyNodeId>,
    pub alarm_state: i32,
}

/// 类别明细：恰好一个变体，类别由变体决定。
#[derive(Debug, Clone, PartialEq)]
pub enum AlarmDetail {
    Host(HostAlarmDetail),
    Rtu(RtuAlarmDetail),
    FacilityTag(FacilityTagAlarmDetail),
}

/// 告警配置记录。
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmConfigurationRecord {
    /// 遗留告警 ID（通知按此关联）。
    pub alarm_id: String,
    pub register: i32,
    pub bit: i32,
    pub lo_limit: Option<f64>,
    pub hi_limit: Option<f64>,
    pub detail: AlarmDetail,
}

impl AlarmConfigurationRecord {
    pub fn category(&self) -> AlarmCategory {
        match self.detail {
            AlarmDetail::Host(_) => AlarmCategory::Host,
            AlarmDetail::Rtu(_) => AlarmCategory::Rtu,
            AlarmDetail::FacilityTag(_) => AlarmCategory::FacilityTag,
        }
    }
}

/// 告警配置查询条件：每个变体对应一次按判别字段过滤的查询。
#[derive(Debug, Clone, PartialEq)]
pub enum AlarmConfigurationFilter {
    Host {
        node_id: LegacyNodeId,
    },
    FacilityTag {
        node_id: LegacyNodeId,
    },
    Rtu {
        poc_type: i32,
        register: Option<i32>,
        bit: Option<i32>,
    },
}

impl AlarmConfigurationFilter {
    pub fn category(&self) -> AlarmCategory {
        match self {
            AlarmConfigurationFilter::Host { .. } => AlarmCategory::Host,
            AlarmConfigurationFilter::FacilityTag { .. } => AlarmCategory::FacilityTag,
            AlarmConfigurationFilter::Rtu { .. } => AlarmCategory::Rtu,
        }
    }

    /// 判断记录是否满足条件（类别 + 键）。
    pub fn matches(&self, record: &AlarmConfigurationRecord) -> bool {
        match (self, &record.detail) {
            (AlarmConfigurationFilter::Host { node_id }, AlarmDetail::Host(detail)) => {
                &detail.node_id == node_id
            }
            (AlarmConfigurationFilter::FacilityTag { node_id }, AlarmDetail::FacilityTag(detail)) => {
                &detail.node_id == node_id
            }
            (
                AlarmConfigurationFilter::Rtu {
                    poc_type,
                    register,
                    bit,
                },
                AlarmDetail::Rtu(detail),
            ) => {
                detail.poc_type == *poc_type
                    && register.is_none_or(|register| record.register == register)
                    && bit.is_none_or(|bit| record.bit == bit)
            }
            _ => false,
        }
    }
}

// ============================================================================
// 参数元数据
// ============================================================================

/// 参数作用域：控制器寄存器按 POCType，场站标签按节点。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterScope {
    PocType(i32),
    Node(LegacyNodeId),
}

/// 参数复合键 (作用域, 地址[, 位])。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterKey {
    pub scope: ParameterScope,
    pub address: i32,
    pub bit: Option<i32>,
}

/// 参数元数据记录。
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    pub key: ParameterKey,
    pub description: Option<String>,
    pub phrase_id: Option<i32>,
    pub data_type_id: Option<i32>,
    pub unit_type_id: Option<i32>,
    pub states_id: Option<i32>,
    /// 类别文档中的场站标签分组。
    pub facility_tag_group_id: Option<i32>,
}

// ============================================================================
// 通知
// ============================================================================

/// 通知记录：存在即表示告警当前处于激活状态。
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub alarm_id: String,
    pub node_id: LegacyNodeId,
    pub transaction_id: i64,
    pub event_ts_ms: i64,
    pub acknowledged_at_ms: Option<i64>,
}

// ============================================================================
// 摄像头
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRecord {
    pub camera_id: String,
    pub node_id: LegacyNodeId,
    pub name: String,
    pub enabled: bool,
}

/// 单台摄像头的告警类型配置。
#[derive(Debug, Clone, PartialEq)]
pub struct CameraAlarmConfigRecord {
    pub camera_id: String,
    pub alarm_type_id: i32,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraAlarmEventRecord {
    pub event_id: String,
    pub camera_id: String,
    pub alarm_type_id: i32,
    pub event_ts_ms: i64,
    pub acknowledged: bool,
}
