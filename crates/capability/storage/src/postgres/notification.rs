//! Postgres 通知存储实现

use super::decode_rows;
use crate::documents::{NOTIFICATIONS, decode_notification};
use crate::error::StorageError;
use crate::models::NotificationRecord;
use crate::traits::NotificationStore;
use crate::validation::ensure_node;
use domain::{LegacyNodeId, RequestContext};
use sqlx::PgPool;

pub struct PgNotificationStore {
    pub pool: PgPool,
}

impl PgNotificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl NotificationStore for PgNotificationStore {
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
        tracing::debug!(
            correlation_id = %ctx.correlation_id,
            collection = NOTIFICATIONS,
            node_id = %node_id,
            count = alarm_ids.len(),
            "list notifications"
        );
        let rows = sqlx::query(
            "select document from notifications \
             where document->'LegacyId'->>'NodeID' = $1 \
             and document->'LegacyId'->>'AlarmID' = any($2) \
             order by id",
        )
        .bind(node_id.as_str())
        .bind(alarm_ids)
        .fetch_all(&self.pool)
        .await?;
        decode_rows(rows, decode_notification)
    }
}
