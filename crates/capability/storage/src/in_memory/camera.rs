//! 摄像头内存存储实现
//!
//! 三个集合：摄像头、摄像头告警配置、摄像头告警事件。

use super::DocumentCollection;
use crate::documents::{
    decode_camera, decode_camera_alarm_config, decode_camera_alarm_event, legacy_value,
};
use crate::error::StorageError;
use crate::models::{CameraAlarmConfigRecord, CameraAlarmEventRecord, CameraRecord};
use crate::traits::CameraStore;
use crate::validation::{ensure_customer, ensure_node};
use domain::{LegacyNodeId, RequestContext};
use serde_json::Value;
use std::collections::BTreeMap;

/// 摄像头内存存储
pub struct InMemoryCameraStore {
    cameras: DocumentCollection,
    alarm_configs: DocumentCollection,
    alarm_events: DocumentCollection,
}

impl InMemoryCameraStore {
    pub fn new() -> Self {
        Self {
            cameras: DocumentCollection::new(),
            alarm_configs: DocumentCollection::new(),
            alarm_events: DocumentCollection::new(),
        }
    }

    pub fn insert_camera(&self, document: Value) -> Result<(), StorageError> {
        self.cameras.insert(document)
    }

    pub fn insert_alarm_config(&self, document: Value) -> Result<(), StorageError> {
        self.alarm_configs.insert(document)
    }

    pub fn insert_alarm_event(&self, document: Value) -> Result<(), StorageError> {
        self.alarm_events.insert(document)
    }
}

impl Default for InMemoryCameraStore {
    fn default() -> Self {
        Self::new()
    }
}

fn camera_in(document: &Value, camera_ids: &[String]) -> bool {
    legacy_value(document, "CameraID")
        .is_some_and(|camera_id| camera_ids.iter().any(|id| id == camera_id))
}

#[async_trait::async_trait]
impl CameraStore for InMemoryCameraStore {
    async fn list_cameras(
        &self,
        ctx: &RequestContext,
        node_id: &LegacyNodeId,
    ) -> Result<Vec<CameraRecord>, StorageError> {
        ensure_node(ctx, node_id)?;
        let documents = self
            .cameras
            .select(|document| legacy_value(document, "NodeID") == Some(node_id.as_str()))?;
        documents.iter().map(decode_camera).collect()
    }

    async fn list_camera_alarm_configs(
        &self,
        ctx: &RequestContext,
        camera_ids: &[String],
    ) -> Result<Vec<CameraAlarmConfigRecord>, StorageError> {
        ensure_customer(ctx)?;
        if camera_ids.is_empty() {
            return Ok(Vec::new());
        }
        let documents = self
            .alarm_configs
            .select(|document| camera_in(document, camera_ids))?;
        documents.iter().map(decode_camera_alarm_config).collect()
    }

    async fn list_latest_camera_alarm_events(
        &self,
        ctx: &RequestContext,
        camera_ids: &[String],
    ) -> Result<Vec<CameraAlarmEventRecord>, StorageError> {
        ensure_customer(ctx)?;
        if camera_ids.is_empty() {
            return Ok(Vec::new());
        }
        let documents = self
            .alarm_events
            .select(|document| camera_in(document, camera_ids))?;

        let mut latest: BTreeMap<(String, i32), CameraAlarmEventRecord> = BTreeMap::new();
        for document in &documents {
            let event = decode_camera_alarm_event(document)?;
            let key = (event.camera_id.clone(), event.alarm_type_id);
            let newer = latest
                .get(&key)
                .is_none_or(|current| event.event_ts_ms >= current.event_ts_ms);
            if newer {
                latest.insert(key, event);
            }
        }
        Ok(latest.into_values().collect())
    }
}
