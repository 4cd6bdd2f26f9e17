//! 协议解码错误类型定义

/// 节点地址解析错误
///
/// 字段级解析失败不走错误通道，而是 `ParsedNodeAddress::success = false`。
#[derive(Debug, thiserror::Error)]
pub enum NodeAddressError {
    /// 节点地址缺失
    #[error("node address is required")]
    MissingAddress,

    /// 地址语法无法编译
    #[error("node address grammar error: {0}")]
    Grammar(String),
}
