//! 通知状态合并：按告警 ID 索引通知行，附加激活标记与最近事务。

use crate::models::NotificationState;
use domain::{LegacyNodeId, RequestContext};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use wellview_storage::{NotificationRecord, NotificationStore, StorageError};

#[derive(Debug, Clone, Default)]
pub struct NotificationIndex {
    states: HashMap<String, NotificationState>,
}

impl NotificationIndex {
    /// 没有匹配通知时返回未激活状态。
    pub fn state(&self, alarm_id: &str) -> NotificationState {
        self.states.get(alarm_id).copied().unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct NotificationMerger {
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationMerger {
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    pub async fn merge(
        &self,
        ctx: &RequestContext,
        node_id: &LegacyNodeId,
        alarm_ids: &[String],
    ) -> Result<NotificationIndex, StorageError> {
        let alarm_ids: Vec<String> = alarm_ids
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if alarm_ids.is_empty() {
            return Ok(NotificationIndex::default());
        }

        let rows = self
            .notifications
            .list_notifications(ctx, node_id, &alarm_ids)
            .await?;

        // 最近一条（事件时间，其次事务号）胜出
        let mut latest: HashMap<String, NotificationRecord> = HashMap::new();
        for row in rows {
            let newer = latest.get(&row.alarm_id).is_none_or(|current| {
                (row.event_ts_ms, row.transaction_id)
                    > (current.event_ts_ms, current.transaction_id)
            });
            if newer {
                latest.insert(row.alarm_id.clone(), row);
            }
        }

        let states = latest
            .into_iter()
            .map(|(alarm_id, row)| {
                let state = NotificationState {
                    active: true,
                    acknowledged: row.acknowledged_at_ms.is_some(),
                    last_transaction_id: Some(row.transaction_id),
                    last_event_ts_ms: Some(row.event_ts_ms),
                };
                (alarm_id, state)
            })
            .collect();
        Ok(NotificationIndex { states })
    }
}
