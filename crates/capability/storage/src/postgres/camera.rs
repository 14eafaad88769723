//! Postgres 摄像头存储实现

use super::decode_rows;
use crate::documents::{
    CAMERAS, decode_camera, decode_camera_alarm_config, decode_camera_alarm_event,
};
use crate::error::StorageError;
use crate::models::{CameraAlarmConfigRecord, CameraAlarmEventRecord, CameraRecord};
use crate::traits::CameraStore;
use crate::validation::{ensure_customer, ensure_node};
use domain::{LegacyNodeId, RequestContext};
use sqlx::PgPool;

pub struct PgCameraStore {
    pub pool: PgPool,
}

impl PgCameraStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CameraStore for PgCameraStore {
    async fn list_cameras(
        &self,
        ctx: &RequestContext,
        node_id: &LegacyNodeId,
    ) -> Result<Vec<CameraRecord>, StorageError> {
        ensure_node(ctx, node_id)?;
        tracing::debug!(
            correlation_id = %ctx.correlation_id,
            collection = CAMERAS,
            node_id = %node_id,
            "list cameras"
        );
        let rows = sqlx::query(
            "select document from cameras \
             where document->'LegacyId'->>'NodeID' = $1 order by id",
        )
        .bind(node_id.as_str())
        .fetch_all(&self.pool)
        .await?;
        decode_rows(rows, decode_camera)
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
        let rows = sqlx::query(
            "select document from camera_alarm_configs \
             where document->'LegacyId'->>'CameraID' = any($1) order by id",
        )
        .bind(camera_ids)
        .fetch_all(&self.pool)
        .await?;
        decode_rows(rows, decode_camera_alarm_config)
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
        let rows = sqlx::query(
            "select distinct on (document->'LegacyId'->>'CameraID', \
             document->'LegacyId'->>'AlarmTypeID') document \
             from camera_alarm_events \
             where document->'LegacyId'->>'CameraID' = any($1) \
             order by document->'LegacyId'->>'CameraID', \
             document->'LegacyId'->>'AlarmTypeID', \
             (document->>'EventTimeMs')::bigint desc, id desc",
        )
        .bind(camera_ids)
        .fetch_all(&self.pool)
        .await?;
        decode_rows(rows, decode_camera_alarm_event)
    }
}
