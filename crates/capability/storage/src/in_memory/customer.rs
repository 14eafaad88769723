//! 客户内存存储实现

use super::DocumentCollection;
use crate::documents::{decode_customer, legacy_value};
use crate::error::StorageError;
use crate::models::CustomerRecord;
use crate::traits::CustomerStore;
use crate::validation::ensure_customer;
use domain::{CustomerId, RequestContext};
use serde_json::Value;

/// 客户内存存储
pub struct InMemoryCustomerStore {
    documents: DocumentCollection,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self {
            documents: DocumentCollection::new(),
        }
    }

    pub fn insert(&self, document: Value) -> Result<(), StorageError> {
        self.documents.insert(document)
    }
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_customer(&self, ctx: &RequestContext) -> Result<Option<CustomerRecord>, StorageError> {
        ensure_customer(ctx)?;
        let matches = self.documents.select(|document| {
            legacy_value(document, "CustomerGUID")
                .and_then(|value| CustomerId::parse(value).ok())
                .is_some_and(|id| id == ctx.customer_id)
        })?;
        matches.first().map(decode_customer).transpose()
    }
}
