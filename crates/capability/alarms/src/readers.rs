//! 告警源读取
//!
//! Host 与 FacilityTag 共用一个物理集合，只靠 `AlarmCategory` 判别字段区分，
//! 因此同一节点读取两类告警是两次独立的判别过滤查询。

use domain::{LegacyNodeId, RequestContext};
use std::sync::Arc;
use wellview_storage::{
    AlarmConfigurationFilter, AlarmConfigurationRecord, AlarmConfigurationStore, StorageError,
};

/// RTU 告警查询条件。
///
/// `poc_type` 存在时替代资产自身的 POCType（子控制器视图）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RtuAlarmQuery {
    pub poc_type: Option<i32>,
    pub register: Option<i32>,
    pub bit: Option<i32>,
}

#[derive(Clone)]
pub struct AlarmSourceReader {
    alarms: Arc<dyn AlarmConfigurationStore>,
}

impl AlarmSourceReader {
    pub fn new(alarms: Arc<dyn AlarmConfigurationStore>) -> Self {
        Self { alarms }
    }

    pub async fn host(
        &self,
        ctx: &RequestContext,
        node_id: &LegacyNodeId,
    ) -> Result<Vec<AlarmConfigurationRecord>, StorageError> {
        self.read(
            ctx,
            AlarmConfigurationFilter::Host {
                node_id: node_id.clone(),
            },
        )
        .await
    }

    pub async fn facility_tags(
        &self,
        ctx: &RequestContext,
        node_id: &LegacyNodeId,
    ) -> Result<Vec<AlarmConfigurationRecord>, StorageError> {
        self.read(
            ctx,
            AlarmConfigurationFilter::FacilityTag {
                node_id: node_id.clone(),
            },
        )
        .await
    }

    pub async fn rtu(
        &self,
        ctx: &RequestContext,
        poc_type: i32,
        register: Option<i32>,
        bit: Option<i32>,
    ) -> Result<Vec<AlarmConfigurationRecord>, StorageError> {
        self.read(
            ctx,
            AlarmConfigurationFilter::Rtu {
                poc_type,
                register,
                bit,
            },
        )
        .await
    }

    async fn read(
        &self,
        ctx: &RequestContext,
        filter: AlarmConfigurationFilter,
    ) -> Result<Vec<AlarmConfigurationRecord>, StorageError> {
        let mut records = self.alarms.list_alarm_configurations(ctx, &filter).await?;
        records.retain(|record| filter.matches(record));
        // 稳定排序：同一寄存器/位保持存储顺序
        records.sort_by_key(|record| (record.register, record.bit));
        Ok(records)
    }
}
