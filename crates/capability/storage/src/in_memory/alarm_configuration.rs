//! 告警配置内存存储实现
//!
//! Host / RTU / FacilityTag 三类告警共用一个集合，每次查询只按一个
//! `AlarmCategory` 判别值过滤。

use super::{DocumentCollection, legacy_i32_eq, legacy_text_eq};
use crate::documents::{decode_alarm_configuration, discriminator};
use crate::error::StorageError;
use crate::models::{AlarmConfigurationFilter, AlarmConfigurationRecord};
use crate::traits::AlarmConfigurationStore;
use crate::validation::{ensure_customer, ensure_node};
use domain::RequestContext;
use serde_json::Value;

/// 告警配置内存存储
pub struct InMemoryAlarmConfigurationStore {
    documents: DocumentCollection,
}

impl InMemoryAlarmConfigurationStore {
    pub fn new() -> Self {
        Self {
            documents: DocumentCollection::new(),
        }
    }

    pub fn insert(&self, document: Value) -> Result<(), StorageError> {
        self.documents.insert(document)
    }
}

impl Default for InMemoryAlarmConfigurationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AlarmConfigurationStore for InMemoryAlarmConfigurationStore {
    async fn list_alarm_configurations(
        &self,
        ctx: &RequestContext,
        filter: &AlarmConfigurationFilter,
    ) -> Result<Vec<AlarmConfigurationRecord>, StorageError> {
        match filter {
            AlarmConfigurationFilter::Host { node_id }
            | AlarmConfigurationFilter::FacilityTag { node_id } => ensure_node(ctx, node_id)?,
            AlarmConfigurationFilter::Rtu { .. } => ensure_customer(ctx)?,
        }
        let category = filter.category();
        // 先按原始键过滤再解码，其他资产的文档不参与解码
        let documents = self.documents.select(|document| {
            discriminator(document, "AlarmCategory") == Some(category.as_str())
                && match filter {
                    AlarmConfigurationFilter::Host { node_id }
                    | AlarmConfigurationFilter::FacilityTag { node_id } => {
                        legacy_text_eq(document, "NodeID", node_id.as_str())
                    }
                    AlarmConfigurationFilter::Rtu { poc_type, .. } => {
                        legacy_i32_eq(document, "POCType", *poc_type)
                    }
                }
        })?;

        let mut records = Vec::with_capacity(documents.len());
        for document in &documents {
            let record = decode_alarm_configuration(document)?;
            if filter.matches(&record) {
                records.push(record);
            }
        }
        records.sort_by_key(|record| (record.register, record.bit));
        Ok(records)
    }
}
