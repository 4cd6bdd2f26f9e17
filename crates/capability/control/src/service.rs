use crate::notifier::TransactionNotifier;
use crate::prepare::prepare_transaction;
use crate::publisher::{Responsibility, TransactionPublisher};
use crate::{ControlError, DispatchOutcome, RejectReason};
use api_contract::{DataStoreUpdateMessage, TransactionMessage, WellControlChange};
use apex_ingest::{IngestError, UpdateHandler};
use apex_protocol::NodeAddressParser;
use apex_storage::{NodeStore, PortStore};
use apex_telemetry::{
    record_dispatch_accepted, record_dispatch_received, record_dispatch_rejected,
    record_publish_legacy, record_publish_modern,
};
use async_trait::async_trait;
use domain::RequestContext;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 井控事务所在的表名。
pub const TRANSACTIONS_PAYLOAD_TYPE: &str = "tblTransactions";

const LEGACY_ROUTE: [Responsibility; 2] = [
    Responsibility::LegacyDataStore,
    Responsibility::LegacyTransactionMonitor,
];
const MODERN_ROUTE: [Responsibility; 1] = [Responsibility::Microservice];

/// 分发参数。
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub comm_base_routing_key: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            comm_base_routing_key: "Edge.Comms.Config.Update".to_string(),
        }
    }
}

struct DispatchInner {
    nodes: Arc<dyn NodeStore>,
    ports: Arc<dyn PortStore>,
    parser: Arc<dyn NodeAddressParser>,
    publisher: Arc<dyn TransactionPublisher>,
    notifier: Arc<dyn TransactionNotifier>,
    config: DispatchConfig,
}

/// 数据存储变更处理服务（井控事务分发）。
#[derive(Clone)]
pub struct ProcessingDataUpdatesService {
    inner: Arc<DispatchInner>,
}

impl ProcessingDataUpdatesService {
    pub fn new(
        nodes: Arc<dyn NodeStore>,
        ports: Arc<dyn PortStore>,
        parser: Arc<dyn NodeAddressParser>,
        publisher: Arc<dyn TransactionPublisher>,
        notifier: Arc<dyn TransactionNotifier>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            inner: Arc::new(DispatchInner {
                nodes,
                ports,
                parser,
                publisher,
                notifier,
                config,
            }),
        }
    }

    /// 处理一条变更事件；任一校验失败即拒绝，不重试。
    pub async fn process(&self, message: &DataStoreUpdateMessage) -> DispatchOutcome {
        record_dispatch_received();
        match self.dispatch(message).await {
            Ok(publishes) => {
                record_dispatch_accepted();
                DispatchOutcome::Dispatched { publishes }
            }
            Err(reason) => {
                record_dispatch_rejected();
                match &reason {
                    RejectReason::PublishFailed { .. } | RejectReason::Storage(_) => error!(
                        target: "apex.control",
                        correlation_id = %message.correlation_id,
                        reason = %reason,
                        "dispatch_rejected"
                    ),
                    _ => warn!(
                        target: "apex.control",
                        correlation_id = %message.correlation_id,
                        reason = %reason,
                        "dispatch_rejected"
                    ),
                }
                DispatchOutcome::Rejected(reason)
            }
        }
    }

    async fn dispatch(&self, message: &DataStoreUpdateMessage) -> Result<usize, RejectReason> {
        let (Some(payload_type), Some(payload)) = (&message.payload_type, &message.payload) else {
            return Err(RejectReason::MissingPayload);
        };
        if payload_type != TRANSACTIONS_PAYLOAD_TYPE {
            return Err(RejectReason::UnexpectedPayloadType(payload_type.clone()));
        }
        let action = message.action.as_deref().unwrap_or_default();
        if !action.eq_ignore_ascii_case("insert") && !action.eq_ignore_ascii_case("update") {
            return Err(RejectReason::UnsupportedAction(action.to_string()));
        }
        let change: WellControlChange = serde_json::from_str(payload)
            .map_err(|err| RejectReason::MalformedPayload(err.to_string()))?;

        let ctx = RequestContext::system(&message.correlation_id);
        let node = self
            .inner
            .nodes
            .find_node_by_asset(&ctx, change.asset_id)
            .await
            .map_err(|err| RejectReason::Storage(err.to_string()))?
            .ok_or(RejectReason::NodeNotFound)?;
        if !node.enabled {
            return Err(RejectReason::NodeDisabled);
        }

        let port = match node.port_id {
            Some(port_id) => self
                .inner
                .ports
                .find_port(&ctx, port_id)
                .await
                .map_err(|err| RejectReason::Storage(err.to_string()))?,
            None => None,
        };

        let transaction = prepare_transaction(
            self.inner.parser.as_ref(),
            &message.correlation_id,
            &change,
            &node,
            port.as_ref(),
            &self.inner.config.comm_base_routing_key,
        );

        let legacy = port.as_ref().is_some_and(|port| port.legacy);
        let route: &[Responsibility] = if legacy { &LEGACY_ROUTE } else { &MODERN_ROUTE };
        for (published, responsibility) in route.iter().copied().enumerate() {
            if let Err(err) = self.publish(responsibility, &transaction).await {
                if published > 0 {
                    error!(
                        target: "apex.control",
                        correlation_id = %message.correlation_id,
                        transaction_id = transaction.transaction_id,
                        node_id = %transaction.node_id,
                        failed = ?responsibility,
                        published,
                        "dispatch_partially_published"
                    );
                }
                return Err(RejectReason::PublishFailed {
                    responsibility,
                    published,
                    message: err.to_string(),
                });
            }
        }

        info!(
            target: "apex.control",
            correlation_id = %message.correlation_id,
            transaction_id = transaction.transaction_id,
            node_id = %transaction.node_id,
            legacy,
            "transaction_dispatched"
        );
        self.inner.notifier.notify(&transaction).await;
        Ok(route.len())
    }

    async fn publish(
        &self,
        responsibility: Responsibility,
        transaction: &TransactionMessage,
    ) -> Result<(), ControlError> {
        self.inner
            .publisher
            .publish(responsibility, transaction)
            .await?;
        if responsibility.is_legacy() {
            record_publish_legacy();
        } else {
            record_publish_modern();
        }
        Ok(())
    }
}

#[async_trait]
impl UpdateHandler for ProcessingDataUpdatesService {
    async fn handle(&self, message: DataStoreUpdateMessage) -> Result<(), IngestError> {
        match self.process(&message).await {
            DispatchOutcome::Dispatched { .. } => Ok(()),
            DispatchOutcome::Rejected(reason) => Err(IngestError::Handler(reason.to_string())),
        }
    }
}
