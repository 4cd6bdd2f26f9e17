use crate::ControlError;
use apex_ingest::qos_from_u8;
use api_contract::TransactionMessage;
use async_trait::async_trait;
use rumqttc::{AsyncClient, MqttOptions, QoS};
use std::time::Duration;
use tracing::{info, warn};

/// 发布目标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Responsibility {
    LegacyDataStore,
    LegacyTransactionMonitor,
    Microservice,
}

impl Responsibility {
    pub fn topic_segment(self) -> &'static str {
        match self {
            Self::LegacyDataStore => "legacy-data-store",
            Self::LegacyTransactionMonitor => "legacy-transaction-monitor",
            Self::Microservice => "microservice",
        }
    }

    pub fn is_legacy(self) -> bool {
        !matches!(self, Self::Microservice)
    }
}

/// 事务发布器抽象。
#[async_trait]
pub trait TransactionPublisher: Send + Sync {
    async fn publish(
        &self,
        responsibility: Responsibility,
        message: &TransactionMessage,
    ) -> Result<(), ControlError>;
}

/// MQTT 发布器配置。
#[derive(Debug, Clone)]
pub struct MqttPublisherConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub topic_prefix: String,
    pub qos: u8,
}

/// MQTT 发布器。
///
/// - 旧版：`{prefix}/{segment}`
/// - 微服务：`{prefix}/microservice/{routing_key}`
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
    topic_prefix: String,
    qos: QoS,
}

impl MqttPublisher {
    pub fn connect(
        config: MqttPublisherConfig,
    ) -> Result<(Self, tokio::task::JoinHandle<()>), ControlError> {
        let client_id = format!("apex-control-publish-{}", uuid::Uuid::new_v4());
        let mut options = MqttOptions::new(client_id, config.host, config.port);
        options.set_keep_alive(Duration::from_secs(30));
        if let (Some(username), Some(password)) = (config.username, config.password) {
            options.set_credentials(username, password);
        }
        let (client, mut eventloop) = AsyncClient::new(options, 10);
        let handle = tokio::spawn(async move {
            loop {
                if let Err(err) = eventloop.poll().await {
                    warn!(target: "apex.control", "mqtt publish eventloop error: {}", err);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        });
        Ok((
            Self {
                client,
                topic_prefix: config.topic_prefix,
                qos: qos_from_u8(config.qos),
            },
            handle,
        ))
    }

    pub fn topic_for(&self, responsibility: Responsibility, routing_key: Option<&str>) -> String {
        topic_for(&self.topic_prefix, responsibility, routing_key)
    }
}

pub(crate) fn topic_for(
    prefix: &str,
    responsibility: Responsibility,
    routing_key: Option<&str>,
) -> String {
    let prefix = prefix.trim_end_matches('/');
    match (responsibility, routing_key.filter(|key| !key.is_empty())) {
        (Responsibility::Microservice, Some(key)) => {
            format!("{}/{}/{}", prefix, responsibility.topic_segment(), key)
        }
        _ => format!("{}/{}", prefix, responsibility.topic_segment()),
    }
}

#[async_trait]
impl TransactionPublisher for MqttPublisher {
    async fn publish(
        &self,
        responsibility: Responsibility,
        message: &TransactionMessage,
    ) -> Result<(), ControlError> {
        let topic = self.topic_for(responsibility, message.routing_key.as_deref());
        let payload =
            serde_json::to_vec(message).map_err(|err| ControlError::Payload(err.to_string()))?;
        info!(
            target: "apex.control",
            correlation_id = %message.correlation_id,
            transaction_id = message.transaction_id,
            responsibility = ?responsibility,
            topic = %topic,
            "transaction_publish"
        );
        self.client
            .publish(topic, self.qos, false, payload)
            .await
            .map_err(|err| ControlError::Publish(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_per_responsibility() {
        assert_eq!(
            topic_for("apex/transactions/", Responsibility::LegacyDataStore, None),
            "apex/transactions/legacy-data-store"
        );
        assert_eq!(
            topic_for(
                "apex/transactions",
                Responsibility::LegacyTransactionMonitor,
                Some("ignored")
            ),
            "apex/transactions/legacy-transaction-monitor"
        );
        assert_eq!(
            topic_for(
                "apex/transactions",
                Responsibility::Microservice,
                Some("Edge.Comms.Config.Update.7")
            ),
            "apex/transactions/microservice/Edge.Comms.Config.Update.7"
        );
    }
}
