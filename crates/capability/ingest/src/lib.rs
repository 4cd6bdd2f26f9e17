//! 总线入站：数据存储变更事件。
//!
//! MQTT topic 形如 `{prefix}/{payload_type}`；消息体为 `DataStoreUpdateMessage` JSON。

use api_contract::DataStoreUpdateMessage;
use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// 入站错误。
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("decode error: {0}")]
    Decode(String),
    #[error("handler error: {0}")]
    Handler(String),
    #[error("source error: {0}")]
    Source(String),
}

/// 变更事件处理器。
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn handle(&self, message: DataStoreUpdateMessage) -> Result<(), IngestError>;
}

/// 入站源抽象。
#[async_trait]
pub trait Source: Send + Sync {
    async fn run(&self, handler: Arc<dyn UpdateHandler>) -> Result<(), IngestError>;
}

/// MQTT 入站源配置。
#[derive(Debug, Clone)]
pub struct MqttSourceConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub topic_prefix: String,
    pub qos: u8,
}

/// MQTT 入站源。
#[derive(Debug, Clone)]
pub struct MqttSource {
    config: MqttSourceConfig,
}

impl MqttSource {
    pub fn new(config: MqttSourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MqttSourceConfig {
        &self.config
    }
}

#[async_trait]
impl Source for MqttSource {
    async fn run(&self, handler: Arc<dyn UpdateHandler>) -> Result<(), IngestError> {
        let client_id = format!("apex-ingest-{}", uuid::Uuid::new_v4());
        let mut options =
            MqttOptions::new(client_id, self.config.host.clone(), self.config.port);
        options.set_keep_alive(Duration::from_secs(30));
        if let (Some(username), Some(password)) =
            (self.config.username.as_ref(), self.config.password.as_ref())
        {
            options.set_credentials(username, password);
        }

        let (client, mut eventloop) = AsyncClient::new(options, 10);
        let topic = format!("{}/#", self.config.topic_prefix.trim_end_matches('/'));
        client
            .subscribe(topic, qos_from_u8(self.config.qos))
            .await
            .map_err(|err| IngestError::Source(err.to_string()))?;

        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    let message = match decode_update(
                        &self.config.topic_prefix,
                        &publish.topic,
                        &publish.payload,
                    ) {
                        Ok(message) => message,
                        Err(err) => {
                            warn!(
                                target: "apex.ingest",
                                topic = %publish.topic,
                                error = %err,
                                "update_message_invalid"
                            );
                            continue;
                        }
                    };
                    debug!(
                        target: "apex.ingest",
                        correlation_id = %message.correlation_id,
                        payload_type = ?message.payload_type,
                        "update_message_received"
                    );
                    if let Err(err) = handler.handle(message).await {
                        warn!(target: "apex.ingest", error = %err, "update_handler_failed");
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(target: "apex.ingest", "mqtt ingest eventloop error: {}", err);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }
}

/// 解码一条入站消息。
///
/// 消息体未给出 `payloadType` 时取 topic 前缀之后的段；关联 ID 为空时生成新的。
pub fn decode_update(
    prefix: &str,
    topic: &str,
    payload: &[u8],
) -> Result<DataStoreUpdateMessage, IngestError> {
    let mut message: DataStoreUpdateMessage =
        serde_json::from_slice(payload).map_err(|err| IngestError::Decode(err.to_string()))?;
    if message.payload_type.is_none() {
        message.payload_type = topic_payload_type(prefix, topic);
    }
    if message.correlation_id.trim().is_empty() {
        message.correlation_id = uuid::Uuid::new_v4().to_string();
    }
    Ok(message)
}

fn topic_payload_type(prefix: &str, topic: &str) -> Option<String> {
    let prefix = prefix.trim_matches('/');
    let topic = topic.trim_matches('/');
    let rest = if prefix.is_empty() {
        topic
    } else {
        topic.strip_prefix(prefix)?
    };
    let rest = rest.trim_matches('/');
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_string())
}

/// 配置中的 QoS 数值转换；越界值按 1 处理（订阅与事务发布共用）。
pub fn qos_from_u8(value: u8) -> QoS {
    match value {
        0 => QoS::AtMostOnce,
        1 => QoS::AtLeastOnce,
        2 => QoS::ExactlyOnce,
        _ => QoS::AtLeastOnce,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_type_from_topic_suffix() {
        assert_eq!(
            topic_payload_type("apex/data-store-updates", "apex/data-store-updates/tblTransactions")
                .as_deref(),
            Some("tblTransactions")
        );
        assert_eq!(
            topic_payload_type("apex/data-store-updates", "apex/data-store-updates"),
            None
        );
        assert_eq!(topic_payload_type("apex/data-store-updates", "other/topic"), None);
    }
}
