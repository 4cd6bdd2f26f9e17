//! 验证辅助函数
//!
//! - ensure_correlation：验证关联 ID 非空
//! - ensure_node_id：验证节点 ID 非空

use crate::error::StorageError;
use domain::RequestContext;

/// 验证关联 ID 非空
///
/// 所有数据访问都需要可追踪的关联 ID。
pub fn ensure_correlation(ctx: &RequestContext) -> Result<(), StorageError> {
    if ctx.correlation_id.is_empty() {
        return Err(StorageError::InvalidContext("correlation_id required"));
    }
    Ok(())
}

/// 验证节点 ID
pub fn ensure_node_id(ctx: &RequestContext, node_id: &str) -> Result<(), StorageError> {
    ensure_correlation(ctx)?;
    if node_id.trim().is_empty() {
        return Err(StorageError::InvalidContext("node_id required"));
    }
    Ok(())
}
