//! 存储接口 Trait 定义
//!
//! 定义所有集合的只读异步接口：
//! - AssetMasterStore：资产主数据
//! - CustomerStore：客户
//! - LookupStore：通用参考数据表
//! - AlarmConfigurationStore：告警配置（Host / RTU / FacilityTag 共用一个集合）
//! - ParameterStore：参数元数据
//! - NotificationStore：通知（告警激活状态）
//! - CameraStore：摄像头、摄像头告警配置与事件
//!
//! 设计原则：
//! - 所有接口显式接收 RequestContext
//! - 所有接口返回 StorageError
//! - "查无数据"返回空集合或 None，不是错误
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{
    AlarmConfigurationFilter, AlarmConfigurationRecord, AssetMasterRecord,
    CameraAlarmConfigRecord, CameraAlarmEventRecord, CameraRecord, CustomerRecord, LookupKey,
    LookupRecord, LookupType, NotificationRecord, ParameterRecord, ParameterScope,
};
use async_trait::async_trait;
use domain::{AssetId, LegacyNodeId, RequestContext};

/// 资产主数据存储接口
#[async_trait]
pub trait AssetMasterStore: Send + Sync {
    /// 按资产 ID 查找当前客户名下的资产主记录
    ///
    /// 多条匹配时返回第一条（内存实现按插入顺序，Postgres 按行 ID）。
    async fn find_asset(
        &self,
        ctx: &RequestContext,
        asset_id: &AssetId,
    ) -> Result<Option<AssetMasterRecord>, StorageError>;
}

/// 客户存储接口
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// 查找当前上下文的客户
    async fn find_customer(&self, ctx: &RequestContext) -> Result<Option<CustomerRecord>, StorageError>;
}

/// 参考数据存储接口
#[async_trait]
pub trait LookupStore: Send + Sync {
    /// 按完整键（含复合键）查找单条参考数据
    async fn find_lookup(
        &self,
        ctx: &RequestContext,
        key: &LookupKey,
    ) -> Result<Option<LookupRecord>, StorageError>;

    /// 按主键集合批量查找同一类型的参考数据
    ///
    /// 状态表按 `StatesId` 匹配，返回这些状态表的全部取值。
    async fn list_lookups(
        &self,
        ctx: &RequestContext,
        lookup_type: LookupType,
        ids: &[i32],
    ) -> Result<Vec<LookupRecord>, StorageError>;
}

/// 告警配置存储接口
#[async_trait]
pub trait AlarmConfigurationStore: Send + Sync {
    /// 按判别字段过滤查询一个类别的告警配置（寄存器、位升序）
    async fn list_alarm_configurations(
        &self,
        ctx: &RequestContext,
        filter: &AlarmConfigurationFilter,
    ) -> Result<Vec<AlarmConfigurationRecord>, StorageError>;
}

/// 参数元数据存储接口
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// 批量查找作用域内指定地址的参数（包含带位与不带位的行）
    async fn list_parameters(
        &self,
        ctx: &RequestContext,
        scope: &ParameterScope,
        addresses: &[i32],
    ) -> Result<Vec<ParameterRecord>, StorageError>;
}

/// 通知存储接口
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// 列出节点上指定告警的通知
    async fn list_notifications(
        &self,
        ctx: &RequestContext,
        node_id: &LegacyNodeId,
        alarm_ids: &[String],
    ) -> Result<Vec<NotificationRecord>, StorageError>;
}

/// 摄像头存储接口
#[async_trait]
pub trait CameraStore: Send + Sync {
    /// 列出节点下的摄像头
    async fn list_cameras(
        &self,
        ctx: &RequestContext,
        node_id: &LegacyNodeId,
    ) -> Result<Vec<CameraRecord>, StorageError>;

    /// 列出摄像头的告警类型配置
    async fn list_camera_alarm_configs(
        &self,
        ctx: &RequestContext,
        camera_ids: &[String],
    ) -> Result<Vec<CameraAlarmConfigRecord>, StorageError>;

    /// 每个 (摄像头, 告警类型) 的最近一次事件
    async fn list_latest_camera_alarm_events(
        &self,
        ctx: &RequestContext,
        camera_ids: &[String],
    ) -> Result<Vec<CameraAlarmEventRecord>, StorageError>;
}
