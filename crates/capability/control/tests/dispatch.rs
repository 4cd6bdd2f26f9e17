use api_contract::{DataStoreUpdateMessage, TransactionMessage, TransactionPayload};
use apex_control::{
    ControlError, DispatchConfig, DispatchOutcome, ProcessingDataUpdatesService, RejectReason,
    Responsibility, TransactionNotifier, TransactionPublisher,
};
use apex_ingest::UpdateHandler;
use apex_protocol::RegexNodeAddressParser;
use apex_storage::{InMemoryNodeStore, InMemoryPortStore, NodeRecord, PortRecord};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct RecordingPublisher {
    published: Mutex<Vec<(Responsibility, TransactionMessage)>>,
    failing: Vec<Responsibility>,
}

impl RecordingPublisher {
    fn failing() -> Self {
        Self {
            failing: vec![
                Responsibility::LegacyDataStore,
                Responsibility::LegacyTransactionMonitor,
                Responsibility::Microservice,
            ],
            ..Self::default()
        }
    }

    fn failing_on(responsibility: Responsibility) -> Self {
        Self {
            failing: vec![responsibility],
            ..Self::default()
        }
    }

    fn published(&self) -> Vec<(Responsibility, TransactionMessage)> {
        self.published.lock().expect("lock").clone()
    }
}

#[async_trait]
impl TransactionPublisher for RecordingPublisher {
    async fn publish(
        &self,
        responsibility: Responsibility,
        message: &TransactionMessage,
    ) -> Result<(), ControlError> {
        if self.failing.contains(&responsibility) {
            return Err(ControlError::Publish("broker unavailable".to_string()));
        }
        self.published
            .lock()
            .expect("lock")
            .push((responsibility, message.clone()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notified: Mutex<Vec<i64>>,
}

#[async_trait]
impl TransactionNotifier for RecordingNotifier {
    async fn notify(&self, message: &TransactionMessage) {
        self.notified
            .lock()
            .expect("lock")
            .push(message.transaction_id);
    }
}

struct Harness {
    service: ProcessingDataUpdatesService,
    publisher: Arc<RecordingPublisher>,
    notifier: Arc<RecordingNotifier>,
    nodes: Arc<InMemoryNodeStore>,
    ports: Arc<InMemoryPortStore>,
}

fn harness_with(publisher: RecordingPublisher) -> Harness {
    let nodes = Arc::new(InMemoryNodeStore::new());
    let ports = Arc::new(InMemoryPortStore::new());
    let publisher = Arc::new(publisher);
    let notifier = Arc::new(RecordingNotifier::default());
    let service = ProcessingDataUpdatesService::new(
        nodes.clone(),
        ports.clone(),
        Arc::new(RegexNodeAddressParser::new()),
        publisher.clone(),
        notifier.clone(),
        DispatchConfig::default(),
    );
    Harness {
        service,
        publisher,
        notifier,
        nodes,
        ports,
    }
}

fn harness() -> Harness {
    harness_with(RecordingPublisher::default())
}

impl Harness {
    fn add_node(&self, asset_id: Uuid, enabled: bool, port: Option<(i32, bool)>) {
        self.nodes.insert_node(NodeRecord {
            node_id: "WELL-01".to_string(),
            asset_id,
            enabled,
            port_id: port.map(|(port_id, _)| port_id),
            node_address: Some("i10.0.0.5|7".to_string()),
            poc_type: 8,
        });
        if let Some((port_id, legacy)) = port {
            self.ports.insert_port(PortRecord {
                port_id,
                description: None,
                hostname: None,
                legacy,
            });
        }
    }
}

fn message(action: &str, asset_id: Uuid) -> DataStoreUpdateMessage {
    let payload = serde_json::json!({
        "transactionId": 9001,
        "assetId": asset_id,
        "task": "WriteRegister",
        "registerAddress": 40102,
        "value": 12.5,
        "requestedBy": "operator"
    });
    DataStoreUpdateMessage {
        correlation_id: "corr-1".to_string(),
        payload_type: Some("tblTransactions".to_string()),
        action: Some(action.to_string()),
        payload: Some(payload.to_string()),
    }
}

#[tokio::test]
async fn delete_action_is_rejected() {
    let harness = harness();
    let asset_id = Uuid::new_v4();
    harness.add_node(asset_id, true, Some((7, false)));

    let outcome = harness.service.process(&message("delete", asset_id)).await;
    assert_eq!(
        outcome,
        DispatchOutcome::Rejected(RejectReason::UnsupportedAction("delete".to_string()))
    );
    assert!(harness.publisher.published().is_empty());
}

#[tokio::test]
async fn missing_or_foreign_payload_is_rejected() {
    let harness = harness();
    let asset_id = Uuid::new_v4();

    let mut missing = message("insert", asset_id);
    missing.payload = None;
    assert_eq!(
        harness.service.process(&missing).await,
        DispatchOutcome::Rejected(RejectReason::MissingPayload)
    );

    let mut foreign = message("insert", asset_id);
    foreign.payload_type = Some("tblNodeMaster".to_string());
    assert!(matches!(
        harness.service.process(&foreign).await,
        DispatchOutcome::Rejected(RejectReason::UnexpectedPayloadType(_))
    ));

    let mut malformed = message("insert", asset_id);
    malformed.payload = Some("{not json".to_string());
    assert!(matches!(
        harness.service.process(&malformed).await,
        DispatchOutcome::Rejected(RejectReason::MalformedPayload(_))
    ));
}

#[tokio::test]
async fn disabled_or_unknown_node_is_rejected() {
    let harness = harness();
    let disabled = Uuid::new_v4();
    harness.add_node(disabled, false, Some((7, false)));

    assert_eq!(
        harness.service.process(&message("insert", disabled)).await,
        DispatchOutcome::Rejected(RejectReason::NodeDisabled)
    );
    assert_eq!(
        harness
            .service
            .process(&message("insert", Uuid::new_v4()))
            .await,
        DispatchOutcome::Rejected(RejectReason::NodeNotFound)
    );
    assert!(harness.publisher.published().is_empty());
}

#[tokio::test]
async fn legacy_port_publishes_twice() {
    let harness = harness();
    let asset_id = Uuid::new_v4();
    harness.add_node(asset_id, true, Some((3, true)));

    let outcome = harness.service.process(&message("Insert", asset_id)).await;
    assert_eq!(outcome, DispatchOutcome::Dispatched { publishes: 2 });

    let published = harness.publisher.published();
    let route: Vec<Responsibility> = published.iter().map(|(r, _)| *r).collect();
    assert_eq!(
        route,
        [
            Responsibility::LegacyDataStore,
            Responsibility::LegacyTransactionMonitor
        ]
    );
    assert!(published[0].1.routing_key.is_none());
    assert_eq!(*harness.notifier.notified.lock().expect("lock"), [9001]);
}

#[tokio::test]
async fn modern_port_publishes_once_with_routing_key() {
    let harness = harness();
    let asset_id = Uuid::new_v4();
    harness.add_node(asset_id, true, Some((7, false)));

    let outcome = harness.service.process(&message("UPDATE", asset_id)).await;
    assert!(outcome.is_dispatched());

    let published = harness.publisher.published();
    assert_eq!(published.len(), 1);
    let (responsibility, transaction) = &published[0];
    assert_eq!(*responsibility, Responsibility::Microservice);
    assert_eq!(
        transaction.routing_key.as_deref(),
        Some("Edge.Comms.Config.Update.7")
    );
    assert_eq!(transaction.node_id, "WELL-01");
    assert_eq!(transaction.asset_id, asset_id);
    assert_eq!(
        transaction.payload,
        TransactionPayload::ModbusWrite {
            protocol: "Modbus".to_string(),
            host: Some("10.0.0.5".to_string()),
            port: None,
            rtu: "7".to_string(),
            register_address: Some(40102),
            offset: 0,
            value: Some(12.5),
        }
    );
}

#[tokio::test]
async fn missing_port_record_is_treated_as_modern() {
    let harness = harness();
    let asset_id = Uuid::new_v4();
    harness.add_node(asset_id, true, None);

    let outcome = harness.service.process(&message("insert", asset_id)).await;
    assert_eq!(outcome, DispatchOutcome::Dispatched { publishes: 1 });
    let published = harness.publisher.published();
    assert_eq!(published[0].0, Responsibility::Microservice);
    assert_eq!(
        published[0].1.routing_key.as_deref(),
        Some("Edge.Comms.Config.Update")
    );
}

#[tokio::test]
async fn publish_failure_is_rejected_without_notification() {
    let harness = harness_with(RecordingPublisher::failing());
    let asset_id = Uuid::new_v4();
    harness.add_node(asset_id, true, Some((7, false)));

    let outcome = harness.service.process(&message("insert", asset_id)).await;
    assert!(matches!(
        outcome,
        DispatchOutcome::Rejected(RejectReason::PublishFailed {
            responsibility: Responsibility::Microservice,
            published: 0,
            ..
        })
    ));
    assert!(harness.notifier.notified.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn legacy_monitor_failure_reports_partial_dispatch() {
    let harness =
        harness_with(RecordingPublisher::failing_on(Responsibility::LegacyTransactionMonitor));
    let asset_id = Uuid::new_v4();
    harness.add_node(asset_id, true, Some((3, true)));

    let outcome = harness.service.process(&message("update", asset_id)).await;
    let DispatchOutcome::Rejected(reason) = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert_eq!(
        reason,
        RejectReason::PublishFailed {
            responsibility: Responsibility::LegacyTransactionMonitor,
            published: 1,
            message: "publish error: broker unavailable".to_string(),
        }
    );
    assert!(reason.to_string().contains("LegacyTransactionMonitor"));

    let published = harness.publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, Responsibility::LegacyDataStore);
    assert!(harness.notifier.notified.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn update_handler_reports_rejects() {
    let harness = harness();
    let asset_id = Uuid::new_v4();
    harness.add_node(asset_id, true, Some((7, false)));

    assert!(harness.service.handle(message("insert", asset_id)).await.is_ok());
    assert!(harness.service.handle(message("delete", asset_id)).await.is_err());
}
