//! 存储层错误类型

/// 存储访问失败。
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// 查询或连接失败
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// 请求上下文不完整（缺关联 ID、节点 ID 等）
    #[error("invalid request context: {0}")]
    InvalidContext(&'static str),
    /// 内存存储锁中毒
    #[error("store lock poisoned: {0}")]
    LockPoisoned(&'static str),
}
