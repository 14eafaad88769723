//! Postgres 资产主数据存储实现

use super::decode_row;
use crate::documents::{ASSET_MASTER, decode_asset_master};
use crate::error::StorageError;
use crate::models::AssetMasterRecord;
use crate::traits::AssetMasterStore;
use crate::validation::ensure_customer;
use domain::{AssetId, RequestContext};
use sqlx::PgPool;

pub struct PgAssetMasterStore {
    pub pool: PgPool,
}

impl PgAssetMasterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AssetMasterStore for PgAssetMasterStore {
    async fn find_asset(
        &self,
        ctx: &RequestContext,
        asset_id: &AssetId,
    ) -> Result<Option<AssetMasterRecord>, StorageError> {
        ensure_customer(ctx)?;
        tracing::debug!(
            correlation_id = %ctx.correlation_id,
            collection = ASSET_MASTER,
            asset_id = %asset_id,
            "find asset"
        );
        let row = sqlx::query(
            "select document from asset_master \
             where lower(document->'LegacyId'->>'AssetGUID') = lower($1) \
             and lower(document->'LegacyId'->>'CustomerGUID') = lower($2) \
             order by id limit 1",
        )
        .bind(asset_id.to_string())
        .bind(ctx.customer_id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        decode_row(row, decode_asset_master)
    }
}
