use api_contract::TransactionMessage;
use async_trait::async_trait;

/// 事务分发后的出站通知端口。
#[async_trait]
pub trait TransactionNotifier: Send + Sync {
    async fn notify(&self, message: &TransactionMessage);
}

/// 仅记录日志的通知器。
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl TransactionNotifier for LogNotifier {
    async fn notify(&self, message: &TransactionMessage) {
        tracing::info!(
            target: "apex.control",
            correlation_id = %message.correlation_id,
            transaction_id = message.transaction_id,
            node_id = %message.node_id,
            task = %message.task,
            "transaction_notified"
        );
    }
}
