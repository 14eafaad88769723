//! Postgres 告警配置存储实现
//!
//! 每次查询只带一个 `AlarmCategory` 判别值；Host 与 FacilityTag 读取同一节点时
//! 是两次独立查询。

use super::decode_rows;
use crate::documents::{ALARM_CONFIGURATIONS, decode_alarm_configuration};
use crate::error::StorageError;
use crate::models::{AlarmConfigurationFilter, AlarmConfigurationRecord};
use crate::traits::AlarmConfigurationStore;
use crate::validation::{ensure_customer, ensure_node};
use domain::RequestContext;
use sqlx::PgPool;

pub struct PgAlarmConfigurationStore {
    pub pool: PgPool,
}

impl PgAlarmConfigurationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AlarmConfigurationStore for PgAlarmConfigurationStore {
    async fn list_alarm_configurations(
        &self,
        ctx: &RequestContext,
        filter: &AlarmConfigurationFilter,
    ) -> Result<Vec<AlarmConfigurationRecord>, StorageError> {
        let category = filter.category();
        tracing::debug!(
            correlation_id = %ctx.correlation_id,
            collection = ALARM_CONFIGURATIONS,
            category = category.as_str(),
            "list alarm configurations"
        );
        let rows = match filter {
            AlarmConfigurationFilter::Host { node_id }
            | AlarmConfigurationFilter::FacilityTag { node_id } => {
                ensure_node(ctx, node_id)?;
                sqlx::query(
                    "select document from alarm_configurations \
                     where document->>'AlarmCategory' = $1 \
                     and legacy_text(document->'LegacyId'->>'NodeID') = $2 \
                     order by (document->>'Register')::int, \
                     coalesce((document->>'Bit')::int, 0), id",
                )
                .bind(category.as_str())
                .bind(node_id.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            AlarmConfigurationFilter::Rtu {
                poc_type,
                register,
                bit,
            } => {
                ensure_customer(ctx)?;
                sqlx::query(
                    "select document from alarm_configurations \
                     where document->>'AlarmCategory' = $1 \
                     and legacy_int(document->'LegacyId'->>'POCType') = $2::int \
                     and ($3::int is null or (document->>'Register')::int = $3) \
                     and ($4::int is null or coalesce((document->>'Bit')::int, 0) = $4) \
                     order by (document->>'Register')::int, \
                     coalesce((document->>'Bit')::int, 0), id",
                )
                .bind(category.as_str())
                .bind(*poc_type)
                .bind(*register)
                .bind(*bit)
                .fetch_all(&self.pool)
                .await?
            }
        };
        let records = decode_rows(rows, decode_alarm_configuration)?;
        Ok(records
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect())
    }
}
