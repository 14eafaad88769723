//! 视图装配服务
//!
//! 每个访问器都是无状态流水线：解析身份 → 读取 → 关联 → 合并 → 成形。
//! 同一访问器内互不依赖的查询并发发出（`tokio::try_join!`），任一失败即中止。
//!
//! 查无资产时的行为按访问器区分：
//! - RTU / Host：记录 "Missing node"，返回空列表
//! - FacilityTag / Camera：直接返回空列表
//! - Facility：返回 `node_id` 为空的头部对象

use crate::camera::CameraAlarmAssembler;
use crate::error::AlarmError;
use crate::identity::{AssetIdentity, IdentityResolver};
use crate::models::{AlarmView, CameraAlarmView, FacilityView};
use crate::notifications::{NotificationIndex, NotificationMerger};
use crate::parameters::{ParameterIndex, ParameterJoiner};
use crate::readers::{AlarmSourceReader, RtuAlarmQuery};
use crate::reference::{HostAlarmCatalog, ReferenceResolver};
use crate::shape::{group_facility_tags, host_union, shape_alarm};
use domain::{AssetId, RequestContext};
use std::sync::Arc;
use tracing::debug;
use wellview_storage::{
    AlarmCategory, AlarmConfigurationRecord, AlarmConfigurationStore, AssetMasterStore,
    CameraStore, CustomerStore, LookupStore, NotificationStore, ParameterScope, ParameterStore,
    StorageError,
};
use wellview_telemetry::{DiagnosticEvent, DiagnosticLog};

/// 告警视图服务（只读）。
pub struct AlarmViewService {
    identity: IdentityResolver,
    references: ReferenceResolver,
    readers: AlarmSourceReader,
    parameters: ParameterJoiner,
    notifications: NotificationMerger,
    cameras: CameraAlarmAssembler,
    customers: Arc<dyn CustomerStore>,
    log: Arc<dyn DiagnosticLog>,
}

/// 服务构造器：所有协作者都是必需的。
#[derive(Default)]
pub struct AlarmViewServiceBuilder {
    assets: Option<Arc<dyn AssetMasterStore>>,
    customers: Option<Arc<dyn CustomerStore>>,
    lookups: Option<Arc<dyn LookupStore>>,
    alarms: Option<Arc<dyn AlarmConfigurationStore>>,
    parameters: Option<Arc<dyn ParameterStore>>,
    notifications: Option<Arc<dyn NotificationStore>>,
    cameras: Option<Arc<dyn CameraStore>>,
    log: Option<Arc<dyn DiagnosticLog>>,
}

impl AlarmViewServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asset_master(mut self, store: Arc<dyn AssetMasterStore>) -> Self {
        self.assets = Some(store);
        self
    }

    pub fn customers(mut self, store: Arc<dyn CustomerStore>) -> Self {
        self.customers = Some(store);
        self
    }

    pub fn lookups(mut self, store: Arc<dyn LookupStore>) -> Self {
        self.lookups = Some(store);
        self
    }

    pub fn alarm_configurations(mut self, store: Arc<dyn AlarmConfigurationStore>) -> Self {
        self.alarms = Some(store);
        self
    }

    pub fn parameters(mut self, store: Arc<dyn ParameterStore>) -> Self {
        self.parameters = Some(store);
        self
    }

    pub fn notifications(mut self, store: Arc<dyn NotificationStore>) -> Self {
        self.notifications = Some(store);
        self
    }

    pub fn cameras(mut self, store: Arc<dyn CameraStore>) -> Self {
        self.cameras = Some(store);
        self
    }

    pub fn diagnostic_log(mut self, log: Arc<dyn DiagnosticLog>) -> Self {
        self.log = Some(log);
        self
    }

    pub fn build(self) -> Result<AlarmViewService, AlarmError> {
        let assets = self
            .assets
            .ok_or(AlarmError::MissingCollaborator("asset_master"))?;
        let customers = self
            .customers
            .ok_or(AlarmError::MissingCollaborator("customers"))?;
        let lookups = self
            .lookups
            .ok_or(AlarmError::MissingCollaborator("lookups"))?;
        let alarms = self
            .alarms
            .ok_or(AlarmError::MissingCollaborator("alarm_configurations"))?;
        let parameters = self
            .parameters
            .ok_or(AlarmError::MissingCollaborator("parameters"))?;
        let notifications = self
            .notifications
            .ok_or(AlarmError::MissingCollaborator("notifications"))?;
        let cameras = self
            .cameras
            .ok_or(AlarmError::MissingCollaborator("cameras"))?;
        let log = self
            .log
            .ok_or(AlarmError::MissingCollaborator("diagnostic_log"))?;

        let references = ReferenceResolver::new(lookups);
        Ok(AlarmViewService {
            identity: IdentityResolver::new(assets),
            readers: AlarmSourceReader::new(alarms),
            parameters: ParameterJoiner::new(parameters, references.clone()),
            notifications: NotificationMerger::new(notifications),
            cameras: CameraAlarmAssembler::new(cameras, references.clone()),
            references,
            customers,
            log,
        })
    }
}

fn missing_node(
    ctx: &RequestContext,
    asset_id: &AssetId,
    accessor: &'static str,
) -> DiagnosticEvent {
    DiagnosticEvent::MissingNode {
        correlation_id: ctx.correlation_id.clone(),
        asset_id: *asset_id,
        accessor,
    }
}

fn split_categories(
    alarms: &[AlarmConfigurationRecord],
) -> (Vec<AlarmConfigurationRecord>, Vec<AlarmConfigurationRecord>) {
    alarms
        .iter()
        .cloned()
        .partition(|alarm| alarm.category() == AlarmCategory::Host)
}

impl AlarmViewService {
    pub fn builder() -> AlarmViewServiceBuilder {
        AlarmViewServiceBuilder::new()
    }

    /// 参考数据解析器（供调用方做单独的代码翻译）。
    pub fn references(&self) -> &ReferenceResolver {
        &self.references
    }

    pub async fn get_rtu_alarm_configuration(
        &self,
        ctx: &RequestContext,
        asset_id: &AssetId,
        query: RtuAlarmQuery,
    ) -> Result<Vec<AlarmView>, AlarmError> {
        self.rtu_pipeline(ctx, asset_id, query, self.log.as_ref())
            .await
    }

    pub async fn get_host_alarms(
        &self,
        ctx: &RequestContext,
        asset_id: &AssetId,
    ) -> Result<Vec<AlarmView>, AlarmError> {
        self.host_pipeline(ctx, asset_id, self.log.as_ref()).await
    }

    pub async fn get_facility_tag_alarms(
        &self,
        ctx: &RequestContext,
        asset_id: &AssetId,
    ) -> Result<Vec<AlarmView>, AlarmError> {
        let Some(identity) = self.identity.resolve(ctx, asset_id).await? else {
            return Ok(Vec::new());
        };
        let tags = self.readers.facility_tags(ctx, &identity.node_id).await?;
        let (views, _) = self.shape_node_alarms(ctx, &identity, &tags).await?;
        Ok(views)
    }

    pub async fn get_camera_alarms(
        &self,
        ctx: &RequestContext,
        asset_id: &AssetId,
    ) -> Result<Vec<CameraAlarmView>, AlarmError> {
        let Some(identity) = self.identity.resolve(ctx, asset_id).await? else {
            return Ok(Vec::new());
        };
        Ok(self.cameras.assemble(ctx, &identity.node_id).await?)
    }

    pub async fn get_facility(
        &self,
        ctx: &RequestContext,
        asset_id: &AssetId,
    ) -> Result<FacilityView, AlarmError> {
        let Some(identity) = self.identity.resolve(ctx, asset_id).await? else {
            return Ok(FacilityView::default());
        };

        let (customer, host, tags) = tokio::try_join!(
            self.customers.find_customer(ctx),
            self.readers.host(ctx, &identity.node_id),
            self.readers.facility_tags(ctx, &identity.node_id),
        )?;
        let alarms = host_union(host, tags);
        let (views, tag_parameters) = self.shape_node_alarms(ctx, &identity, &alarms).await?;
        let (host_alarms, tag_alarms): (Vec<AlarmView>, Vec<AlarmView>) = views
            .into_iter()
            .partition(|view| view.category == AlarmCategory::Host);

        Ok(FacilityView {
            node_id: Some(identity.node_id),
            asset_name: identity.name,
            customer_name: customer.map(|customer| customer.name),
            application_id: identity.application_id,
            is_facility: identity.is_facility,
            groups: group_facility_tags(tag_alarms, &tag_parameters),
            host_alarms,
        })
    }

    async fn rtu_pipeline(
        &self,
        ctx: &RequestContext,
        asset_id: &AssetId,
        query: RtuAlarmQuery,
        log: &dyn DiagnosticLog,
    ) -> Result<Vec<AlarmView>, AlarmError> {
        let Some(identity) = self.identity.resolve(ctx, asset_id).await? else {
            log.record(missing_node(ctx, asset_id, "rtu"));
            return Ok(Vec::new());
        };
        let poc_type = query.poc_type.unwrap_or(identity.poc_type);
        debug!(
            correlation_id = %ctx.correlation_id,
            node_id = %identity.node_id,
            poc_type,
            "reading rtu alarms"
        );

        let alarms = self
            .readers
            .rtu(ctx, poc_type, query.register, query.bit)
            .await?;
        let parameters = self
            .parameters
            .join(ctx, &ParameterScope::PocType(poc_type), &alarms)
            .await?;

        let notifications = NotificationIndex::default();
        let catalog = HostAlarmCatalog::default();
        Ok(alarms
            .iter()
            .map(|alarm| shape_alarm(alarm, &parameters, &notifications, &catalog))
            .collect())
    }

    async fn host_pipeline(
        &self,
        ctx: &RequestContext,
        asset_id: &AssetId,
        log: &dyn DiagnosticLog,
    ) -> Result<Vec<AlarmView>, AlarmError> {
        let Some(identity) = self.identity.resolve(ctx, asset_id).await? else {
            log.record(missing_node(ctx, asset_id, "host"));
            return Ok(Vec::new());
        };

        let (host, tags) = tokio::try_join!(
            self.readers.host(ctx, &identity.node_id),
            self.readers.facility_tags(ctx, &identity.node_id),
        )?;
        let alarms = host_union(host, tags);
        let (views, _) = self.shape_node_alarms(ctx, &identity, &alarms).await?;
        Ok(views)
    }

    /// 节点级告警（Host / FacilityTag）的关联与成形。
    ///
    /// Host 参数按资产 POCType 作用域解析，FacilityTag 参数按节点作用域解析。
    /// 输出顺序与输入一致；同时返回 FacilityTag 参数索引供分组使用。
    async fn shape_node_alarms(
        &self,
        ctx: &RequestContext,
        identity: &AssetIdentity,
        alarms: &[AlarmConfigurationRecord],
    ) -> Result<(Vec<AlarmView>, ParameterIndex), StorageError> {
        let (host, tags) = split_categories(alarms);
        let alarm_ids: Vec<String> = alarms.iter().map(|alarm| alarm.alarm_id.clone()).collect();
        let host_scope = ParameterScope::PocType(identity.poc_type);
        let tag_scope = ParameterScope::Node(identity.node_id.clone());

        let (host_parameters, tag_parameters, notifications, catalog) = tokio::try_join!(
            self.parameters.join(ctx, &host_scope, &host),
            self.parameters.join(ctx, &tag_scope, &tags),
            self.notifications.merge(ctx, &identity.node_id, &alarm_ids),
            self.references.host_alarm_catalog(ctx, &host),
        )?;

        let views = alarms
            .iter()
            .map(|alarm| {
                let parameters = match alarm.category() {
                    AlarmCategory::Host => &host_parameters,
                    _ => &tag_parameters,
                };
                shape_alarm(alarm, parameters, &notifications, &catalog)
            })
            .collect();
        Ok((views, tag_parameters))
    }
}
