//! # 井控事务分发
//!
//! 消费数据存储变更事件，校验后生成按需事务并按端口类型路由：
//!
//! ```text
//! Received ─► Validated ─► Deserialized ─► Prepared ─► Dispatched
//!     │            │             │              │
//!     └────────────┴─────────────┴──────────────┴──► Rejected
//! ```
//!
//! - 旧版端口：`LegacyDataStore` + `LegacyTransactionMonitor` 两次发布
//! - 其他端口：一次 `Microservice` 发布，路由键 `{base}.{port_id}`
//!
//! 不做去重，总线重投时会重复分发。

mod notifier;
mod prepare;
mod publisher;
mod service;

pub use notifier::{LogNotifier, TransactionNotifier};
pub use prepare::{build_payload, prepare_transaction, routing_key_for};
pub use publisher::{MqttPublisher, MqttPublisherConfig, Responsibility, TransactionPublisher};
pub use service::{DispatchConfig, ProcessingDataUpdatesService, TRANSACTIONS_PAYLOAD_TYPE};

/// 控制链路错误。
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("publish error: {0}")]
    Publish(String),
    #[error("payload error: {0}")]
    Payload(String),
}

/// 分发结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Dispatched { publishes: usize },
    Rejected(RejectReason),
}

impl DispatchOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched { .. })
    }
}

/// 拒绝原因（按校验顺序）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("payload type or payload missing")]
    MissingPayload,
    #[error("unexpected payload type: {0}")]
    UnexpectedPayloadType(String),
    #[error("unsupported action: {0}")]
    UnsupportedAction(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("node not found")]
    NodeNotFound,
    #[error("node disabled")]
    NodeDisabled,
    #[error("storage error: {0}")]
    Storage(String),
    /// 旧版路由中前序发布已送出时 `published > 0`（部分分发）。
    #[error("publish to {responsibility:?} failed after {published} publish(es): {message}")]
    PublishFailed {
        responsibility: Responsibility,
        published: usize,
        message: String,
    },
}
