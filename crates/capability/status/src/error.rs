/// 资产状态聚合错误。
///
/// 输入无效与数据缺失不走错误通道，返回空结果。
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("request cancelled")]
    Cancelled,
    #[error("storage error: {0}")]
    Storage(String),
}
