//! Postgres 客户存储实现

use super::decode_row;
use crate::documents::decode_customer;
use crate::error::StorageError;
use crate::models::CustomerRecord;
use crate::traits::CustomerStore;
use crate::validation::ensure_customer;
use domain::RequestContext;
use sqlx::PgPool;

pub struct PgCustomerStore {
    pub pool: PgPool,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CustomerStore for PgCustomerStore {
    async fn find_customer(&self, ctx: &RequestContext) -> Result<Option<CustomerRecord>, StorageError> {
        ensure_customer(ctx)?;
        let row = sqlx::query(
            "select document from customers \
             where lower(document->'LegacyId'->>'CustomerGUID') = lower($1) \
             order by id limit 1",
        )
        .bind(ctx.customer_id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        decode_row(row, decode_customer)
    }
}
