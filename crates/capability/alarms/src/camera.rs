//! 摄像头告警装配
//!
//! 设备 → 每设备告警配置 → 最近一次事件 → 告警类型 → 本地化短语。

use crate::models::CameraAlarmView;
use crate::reference::ReferenceResolver;
use domain::{LegacyNodeId, RequestContext};
use std::collections::HashMap;
use std::sync::Arc;
use wellview_storage::{CameraAlarmConfigRecord, CameraAlarmEventRecord, CameraStore, StorageError};

#[derive(Clone)]
pub struct CameraAlarmAssembler {
    cameras: Arc<dyn CameraStore>,
    references: ReferenceResolver,
}

impl CameraAlarmAssembler {
    pub fn new(cameras: Arc<dyn CameraStore>, references: ReferenceResolver) -> Self {
        Self {
            cameras,
            references,
        }
    }

    /// 按摄像头存储顺序、告警类型升序输出。
    pub async fn assemble(
        &self,
        ctx: &RequestContext,
        node_id: &LegacyNodeId,
    ) -> Result<Vec<CameraAlarmView>, StorageError> {
        let cameras = self.cameras.list_cameras(ctx, node_id).await?;
        if cameras.is_empty() {
            return Ok(Vec::new());
        }
        let camera_ids: Vec<String> = cameras
            .iter()
            .map(|camera| camera.camera_id.clone())
            .collect();

        let (configs, events) = tokio::try_join!(
            self.cameras.list_camera_alarm_configs(ctx, &camera_ids),
            self.cameras.list_latest_camera_alarm_events(ctx, &camera_ids),
        )?;

        let type_ids: Vec<i32> = configs.iter().map(|config| config.alarm_type_id).collect();
        let alarm_types = self.references.camera_alarm_types(ctx, &type_ids).await?;
        let phrase_ids: Vec<i32> = alarm_types
            .values()
            .filter_map(|entry| entry.phrase_id)
            .collect();
        let phrases = self.references.phrases(ctx, &phrase_ids).await?;

        let latest: HashMap<(&str, i32), &CameraAlarmEventRecord> = events
            .iter()
            .map(|event| ((event.camera_id.as_str(), event.alarm_type_id), event))
            .collect();

        let mut views = Vec::new();
        for camera in &cameras {
            let mut camera_configs: Vec<&CameraAlarmConfigRecord> = configs
                .iter()
                .filter(|config| config.camera_id == camera.camera_id)
                .collect();
            camera_configs.sort_by_key(|config| config.alarm_type_id);
            camera_configs.dedup_by_key(|config| config.alarm_type_id);

            for config in camera_configs {
                let event = latest
                    .get(&(camera.camera_id.as_str(), config.alarm_type_id))
                    .copied();
                let alarm_type = alarm_types
                    .get(&config.alarm_type_id)
                    .map(|entry| phrases.localize(entry.phrase_id, &ctx.locale, &entry.name));
                views.push(CameraAlarmView {
                    camera_id: camera.camera_id.clone(),
                    camera_name: camera.name.clone(),
                    alarm_type_id: config.alarm_type_id,
                    alarm_type,
                    enabled: camera.enabled && config.enabled,
                    active: event.is_some(),
                    acknowledged: event.is_some_and(|event| event.acknowledged),
                    last_event_id: event.map(|event| event.event_id.clone()),
                    last_event_ts_ms: event.map(|event| event.event_ts_ms),
                });
            }
        }
        Ok(views)
    }
}
