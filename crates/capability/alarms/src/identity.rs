//! 资产身份解析：AssetId → 遗留节点标识。

use domain::{AssetId, LegacyNodeId, RequestContext};
use std::sync::Arc;
use wellview_storage::{AssetMasterStore, StorageError};

/// 已解析的资产身份。
#[derive(Debug, Clone, PartialEq)]
pub struct AssetIdentity {
    pub asset_id: AssetId,
    pub node_id: LegacyNodeId,
    pub poc_type: i32,
    pub name: Option<String>,
    pub application_id: Option<i32>,
    pub is_facility: bool,
}

#[derive(Clone)]
pub struct IdentityResolver {
    assets: Arc<dyn AssetMasterStore>,
}

impl IdentityResolver {
    pub fn new(assets: Arc<dyn AssetMasterStore>) -> Self {
        Self { assets }
    }

    /// 解析资产身份；资产不存在或不属于当前客户时返回 `None`。
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        asset_id: &AssetId,
    ) -> Result<Option<AssetIdentity>, StorageError> {
        let record = self.assets.find_asset(ctx, asset_id).await?;
        Ok(record.map(|record| AssetIdentity {
            asset_id: record.asset_id,
            node_id: record.node_id,
            poc_type: record.poc_type,
            name: record.name,
            application_id: record.application_id,
            is_facility: record.is_facility,
        }))
    }
}
