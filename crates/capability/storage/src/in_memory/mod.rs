//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。各集合保存原始 JSON 文档，读取时走与 Postgres
//! 相同的解码路径（`documents` 模块），因此测试覆盖真实的判别解码。
//!
//! 包含以下实现：
//! - AssetMasterStore: InMemoryAssetMasterStore
//! - CustomerStore: InMemoryCustomerStore
//! - LookupStore: InMemoryLookupStore
//! - AlarmConfigurationStore: InMemoryAlarmConfigurationStore
//! - ParameterStore: InMemoryParameterStore
//! - NotificationStore: InMemoryNotificationStore
//! - CameraStore: InMemoryCameraStore

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
use std::sync::RwLock;

/// 单个集合的文档容器
///
/// 使用 RwLock + Vec 保持插入顺序（"多条匹配取第一条"依赖该顺序）。
pub(crate) struct DocumentCollection {
    documents: RwLock<Vec<Value>>,
}

impl DocumentCollection {
    pub(crate) fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn insert(&self, document: Value) -> Result<(), StorageError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        documents.push(document);
        Ok(())
    }

    /// 复制满足条件的原始文档（按插入顺序）
    pub(crate) fn select<F>(&self, predicate: F) -> Result<Vec<Value>, StorageError>
    where
        F: Fn(&Value) -> bool,
    {
        let documents = self
            .documents
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(documents
            .iter()
            .filter(|document| predicate(document))
            .cloned()
            .collect())
    }
}

/// 遗留键按整数比较（文档里保存的是字符串）
pub(crate) fn legacy_i32_eq(document: &Value, field: &str, expected: i32) -> bool {
    crate::documents::legacy_value(document, field)
        .and_then(|value| value.trim().parse::<i32>().ok())
        == Some(expected)
}

/// 遗留文本键去除首尾空白后比较（与解码时的 trim 一致）
pub(crate) fn legacy_text_eq(document: &Value, field: &str, expected: &str) -> bool {
    crate::documents::legacy_value(document, field).map(str::trim) == Some(expected)
}
