//! 通知内存存储实现

use super::DocumentCollection;
use crate::documents::{decode_notification, legacy_value};
use crate::error::StorageError;
use crate::models::NotificationRecord;
use crate::traits::NotificationStore;
use crate::validation::ensure_node;
use domain::{LegacyNodeId, RequestContext};
use serde_json::Value;

/// 通知内存存储
pub struct InMemoryNotificationStore {
    documents: DocumentCollection,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self {
            documents: DocumentCollection::new(),
        }
    }

    pub fn insert(&self, document: Value) -> Result<(), StorageError> {
        self.documents.insert(document)
    }
}

impl Default for InMemoryNotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn list_notifications(
        &self,
        ctx: &RequestContext,
        node_id: &LegacyNodeId,
        alarm_ids: &[String],
    ) -> Result<Vec<NotificationRecord>, StorageError> {
        ensure_node(ctx, node_id)?;
        if alarm_ids.is_empty() {
            return Ok(Vec::new());
        }
        let documents = self.documents.select(|document| {
            legacy_value(document, "NodeID") == Some(node_id.as_str())
                && legacy_value(document, "AlarmID")
                    .is_some_and(|alarm_id| alarm_ids.iter().any(|id| id == alarm_id))
        })?;
        documents.iter().map(decode_notification).collect()
    }
}
