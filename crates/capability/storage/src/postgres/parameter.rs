//! Postgres 参数元数据存储实现

use super::decode_rows;
use crate::documents::{PARAMETERS, decode_parameter};
use crate::error::StorageError;
use crate::models::{ParameterRecord, ParameterScope};
use crate::traits::ParameterStore;
use crate::validation::{ensure_customer, ensure_node};
use domain::RequestContext;
use sqlx::PgPool;

pub struct PgParameterStore {
    pub pool: PgPool,
}

impl PgParameterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ParameterStore for PgParameterStore {
    async fn list_parameters(
        &self,
        ctx: &RequestContext,
        scope: &ParameterScope,
        addresses: &[i32],
    ) -> Result<Vec<ParameterRecord>, StorageError> {
        let parameter_type = match scope {
            ParameterScope::PocType(_) => {
                ensure_customer(ctx)?;
                "Register"
            }
            ParameterScope::Node(node_id) => {
                ensure_node(ctx, node_id)?;
                "FacilityTag"
            }
        };
        if addresses.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(
            correlation_id = %ctx.correlation_id,
            collection = PARAMETERS,
            parameter_type,
            count = addresses.len(),
            "list parameters"
        );
        let (poc_type, node_id) = match scope {
            ParameterScope::PocType(poc_type) => (Some(*poc_type), None),
            ParameterScope::Node(node_id) => (None, Some(node_id.as_str())),
        };
        let rows = sqlx::query(
            "select document from parameters \
             where document->>'ParameterType' = $1 \
             and ($2::int is null or legacy_int(document->'LegacyId'->>'POCType') = $2) \
             and ($3::text is null or legacy_text(document->'LegacyId'->>'NodeID') = $3) \
             and legacy_int(document->'LegacyId'->>'Address') = any($4::int[]) \
             order by id",
        )
        .bind(parameter_type)
        .bind(poc_type)
        .bind(node_id)
        .bind(addresses.to_vec())
        .fetch_all(&self.pool)
        .await?;
        let records = decode_rows(rows, decode_parameter)?;
        Ok(records
            .into_iter()
            .filter(|record| &record.key.scope == scope)
            .collect())
    }
}
