//! PostgreSQL 存储实现模块
//!
//! 每个集合一张表：`(id bigserial primary key, document jsonb not null)`，
//! 表结构见 `migrations/`。查询全部参数化，按 jsonb 路径过滤，
//! 取回的文档统一交给 `documents` 模块解码。
//!
//! 包含以下实现：
//! - AssetMasterStore: PgAssetMasterStore
//! - CustomerStore: PgCustomerStore
//! - LookupStore: PgLookupStore
//! - AlarmConfigurationStore: PgAlarmConfigurationStore
//! - ParameterStore: PgParameterStore
//! - NotificationStore: PgNotificationStore
//! - CameraStore: PgCameraStore

pub mod alarm_configuration;
pub mod asset;
pub mod camera;
pub mod customer;
pub mod lookup;
pub mod notification;
pub mod parameter;

pub use alarm_configuration::*;
pub use asset::*;
pub use camera::*;
pub use customer::*;
pub use lookup::*;
pub use notification::*;
pub use parameter::*;

use crate::error::StorageError;
use serde_json::Value;
use sqlx::Row;
use sqlx::postgres::PgRow;

/// 逐行取出 `document` 列并解码
pub(crate) fn decode_rows<T>(
    rows: Vec<PgRow>,
    decode: fn(&Value) -> Result<T, StorageError>,
) -> Result<Vec<T>, StorageError> {
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let document: Value = row.try_get("document")?;
        items.push(decode(&document)?);
    }
    Ok(items)
}

pub(crate) fn decode_row<T>(
    row: Option<PgRow>,
    decode: fn(&Value) -> Result<T, StorageError>,
) -> Result<Option<T>, StorageError> {
    let Some(row) = row else {
        return Ok(None);
    };
    let document: Value = row.try_get("document")?;
    decode(&document).map(Some)
}
