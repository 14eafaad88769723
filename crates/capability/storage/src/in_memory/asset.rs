//! 资产主数据内存存储实现

use super::DocumentCollection;
use crate::documents::{decode_asset_master, legacy_value};
use crate::error::StorageError;
use crate::models::AssetMasterRecord;
use crate::traits::AssetMasterStore;
use crate::validation::ensure_customer;
use domain::{AssetId, CustomerId, RequestContext};
use serde_json::Value;

/// 资产主数据内存存储
pub struct InMemoryAssetMasterStore {
    documents: DocumentCollection,
}

impl InMemoryAssetMasterStore {
    pub fn new() -> Self {
        Self {
            documents: DocumentCollection::new(),
        }
    }

    /// 写入一条原始资产文档
    pub fn insert(&self, document: Value) -> Result<(), StorageError> {
        self.documents.insert(document)
    }
}

impl Default for InMemoryAssetMasterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AssetMasterStore for InMemoryAssetMasterStore {
    async fn find_asset(
        &self,
        ctx: &RequestContext,
        asset_id: &AssetId,
    ) -> Result<Option<AssetMasterRecord>, StorageError> {
        ensure_customer(ctx)?;
        let matches = self.documents.select(|document| {
            let asset_matches = legacy_value(document, "AssetGUID")
                .and_then(|value| AssetId::parse(value).ok())
                .is_some_and(|id| &id == asset_id);
            let customer_matches = legacy_value(document, "CustomerGUID")
                .and_then(|value| CustomerId::parse(value).ok())
                .is_some_and(|id| id == ctx.customer_id);
            asset_matches && customer_matches
        })?;
        matches.first().map(decode_asset_master).transpose()
    }
}
