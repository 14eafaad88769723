//! 参考数据内存存储实现
//!
//! 一个集合保存所有参考数据类型，先按 `LookupType` 判别字段过滤再解码。

use super::{DocumentCollection, legacy_i32_eq};
use crate::documents::{decode_lookup, discriminator};
use crate::error::StorageError;
use crate::models::{LookupKey, LookupRecord, LookupType};
use crate::traits::LookupStore;
use crate::validation::ensure_customer;
use domain::RequestContext;
use serde_json::Value;

/// 参考数据内存存储
pub struct InMemoryLookupStore {
    documents: DocumentCollection,
}

impl InMemoryLookupStore {
    pub fn new() -> Self {
        Self {
            documents: DocumentCollection::new(),
        }
    }

    pub fn insert(&self, document: Value) -> Result<(), StorageError> {
        self.documents.insert(document)
    }
}

impl Default for InMemoryLookupStore {
    fn default() -> Self {
        Self::new()
    }
}

fn is_type(document: &Value, lookup_type: LookupType) -> bool {
    discriminator(document, "LookupType") == Some(lookup_type.as_str())
}

#[async_trait::async_trait]
impl LookupStore for InMemoryLookupStore {
    async fn find_lookup(
        &self,
        ctx: &RequestContext,
        key: &LookupKey,
    ) -> Result<Option<LookupRecord>, StorageError> {
        ensure_customer(ctx)?;
        let lookup_type = key.lookup_type();
        let matches = self.documents.select(|document| {
            is_type(document, lookup_type)
                && legacy_i32_eq(document, lookup_type.primary_field(), key.primary_id())
                && key
                    .state_value()
                    .is_none_or(|value| legacy_i32_eq(document, "Value", value))
        })?;
        matches.first().map(decode_lookup).transpose()
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
        let field = lookup_type.primary_field();
        let matches = self.documents.select(|document| {
            is_type(document, lookup_type)
                && ids.iter().any(|id| legacy_i32_eq(document, field, *id))
        })?;
        matches.iter().map(decode_lookup).collect()
    }
}
