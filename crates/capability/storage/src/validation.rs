//! 验证辅助函数
//!
//! 提供统一的验证逻辑：
//! - ensure_customer：验证客户 ID 非空
//! - ensure_node：验证节点作用域（客户 + 遗留节点 ID）
//!
//! 所有存储实现（内存 / Postgres）在查询前调用。

use crate::error::StorageError;
use domain::{LegacyNodeId, RequestContext};

/// 验证客户 ID 非空
///
/// 确保所有数据访问都有有效的客户上下文。
pub fn ensure_customer(ctx: &RequestContext) -> Result<(), StorageError> {
    if ctx.customer_id.is_nil() {
        return Err(StorageError::new("customer_id required"));
    }
    Ok(())
}

/// 验证节点作用域
///
/// 节点级集合（告警、通知、摄像头）必须带非空遗留节点 ID 查询。
pub fn ensure_node(ctx: &RequestContext, node_id: &LegacyNodeId) -> Result<(), StorageError> {
    ensure_customer(ctx)?;
    if node_id.is_empty() {
        return Err(StorageError::new("node_id required"));
    }
    Ok(())
}
