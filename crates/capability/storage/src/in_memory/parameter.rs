//! 参数元数据内存存储实现

use super::{DocumentCollection, legacy_i32_eq, legacy_text_eq};
use crate::documents::{decode_parameter, discriminator};
use crate::error::StorageError;
use crate::models::{ParameterRecord, ParameterScope};
use crate::traits::ParameterStore;
use crate::validation::{ensure_customer, ensure_node};
use domain::RequestContext;
use serde_json::Value;

/// 参数元数据内存存储
pub struct InMemoryParameterStore {
    documents: DocumentCollection,
}

impl InMemoryParameterStore {
    pub fn new() -> Self {
        Self {
            documents: DocumentCollection::new(),
        }
    }

    pub fn insert(&self, document: Value) -> Result<(), StorageError> {
        self.documents.insert(document)
    }
}

impl Default for InMemoryParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ParameterStore for InMemoryParameterStore {
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
        let documents = self.documents.select(|document| {
            discriminator(document, "ParameterType") == Some(parameter_type)
                && match scope {
                    ParameterScope::PocType(poc_type) => {
                        legacy_i32_eq(document, "POCType", *poc_type)
                    }
                    ParameterScope::Node(node_id) => {
                        legacy_text_eq(document, "NodeID", node_id.as_str())
                    }
                }
                && addresses
                    .iter()
                    .any(|address| legacy_i32_eq(document, "Address", *address))
        })?;

        let mut records = Vec::new();
        for document in &documents {
            let record = decode_parameter(document)?;
            if &record.key.scope == scope && addresses.contains(&record.key.address) {
                records.push(record);
            }
        }
        Ok(records)
    }
}
