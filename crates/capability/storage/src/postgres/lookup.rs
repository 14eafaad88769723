//! Postgres 参考数据存储实现
//!
//! 遗留键按数值比较（`legacy_int`，见 `migrations/`），与内存实现的 trim + parse 一致。
//! 状态表额外匹配 `Value`，批量查询按主键字段 `any($n)`。

use super::{decode_row, decode_rows};
use crate::documents::{LOOKUPS, decode_lookup};
use crate::error::StorageError;
use crate::models::{LookupKey, LookupRecord, LookupType};
use crate::traits::LookupStore;
use crate::validation::ensure_customer;
use domain::RequestContext;
use sqlx::PgPool;

pub struct PgLookupStore {
    pub pool: PgPool,
}

impl PgLookupStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LookupStore for PgLookupStore {
    async fn find_lookup(
        &self,
        ctx: &RequestContext,
        key: &LookupKey,
    ) -> Result<Option<LookupRecord>, StorageError> {
        ensure_customer(ctx)?;
        tracing::debug!(
            correlation_id = %ctx.correlation_id,
            collection = LOOKUPS,
            lookup_type = key.lookup_type().as_str(),
            "find lookup"
        );
        let row = sqlx::query(
            "select document from lookups \
             where document->>'LookupType' = $1 \
             and legacy_int(document->'LegacyId'->>$2) = $3::int \
             and ($4::int is null or legacy_int(document->'LegacyId'->>'Value') = $4) \
             order by id limit 1",
        )
        .bind(key.lookup_type().as_str())
        .bind(key.lookup_type().primary_field())
        .bind(key.primary_id())
        .bind(key.state_value())
        .fetch_optional(&self.pool)
        .await?;
        decode_row(row, decode_lookup)
    }

    async fn list_lookups(
        &self,
        ctx: &RequestContext,
        lookup_type: LookupType,
        ids: &[i32],
    ) -> Result<Vec<LookupRecord>, StorageError> {
        ensure_customer(ctx)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(
            correlation_id = %ctx.correlation_id,
            collection = LOOKUPS,
            lookup_type = lookup_type.as_str(),
            count = ids.len(),
            "list lookups"
        );
        let rows = sqlx::query(
            "select document from lookups \
             where document->>'LookupType' = $1 \
             and legacy_int(document->'LegacyId'->>$2) = any($3::int[]) \
             order by id",
        )
        .bind(lookup_type.as_str())
        .bind(lookup_type.primary_field())
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        decode_rows(rows, decode_lookup)
    }
}
