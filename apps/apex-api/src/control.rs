//! 井控链路装配
//!
//! MQTT 入站源接收数据存储变更事件，交给 `ProcessingDataUpdatesService`
//! 校验并组装事务，再经 MQTT 发布器按端口类型路由。

use crate::stores::Stores;
use apex_config::AppConfig;
use apex_control::{
    ControlError, DispatchConfig, LogNotifier, MqttPublisher, MqttPublisherConfig,
    ProcessingDataUpdatesService,
};
use apex_ingest::{MqttSource, MqttSourceConfig, Source, UpdateHandler};
use apex_protocol::NodeAddressParser;
use std::sync::Arc;
use tracing::{info, warn};

/// 启动发布器事件循环与入站订阅，返回后台任务句柄
pub fn spawn_control(
    config: &AppConfig,
    stores: &Stores,
    parser: Arc<dyn NodeAddressParser>,
) -> Result<Vec<tokio::task::JoinHandle<()>>, ControlError> {
    let (publisher, publish_handle) = MqttPublisher::connect(MqttPublisherConfig {
        host: config.mqtt_host.clone(),
        port: config.mqtt_port,
        username: config.mqtt_username.clone(),
        password: config.mqtt_password.clone(),
        topic_prefix: config.mqtt_publish_topic_prefix.clone(),
        qos: config.mqtt_publish_qos,
    })?;

    let service = ProcessingDataUpdatesService::new(
        stores.nodes.clone(),
        stores.ports.clone(),
        parser,
        Arc::new(publisher),
        Arc::new(LogNotifier),
        DispatchConfig {
            comm_base_routing_key: config.data_store_updates_comm_base_routing_key.clone(),
        },
    );
    let handler: Arc<dyn UpdateHandler> = Arc::new(service);

    let source = MqttSource::new(MqttSourceConfig {
        host: config.mqtt_host.clone(),
        port: config.mqtt_port,
        username: config.mqtt_username.clone(),
        password: config.mqtt_password.clone(),
        topic_prefix: config.mqtt_data_store_updates_topic.clone(),
        qos: config.mqtt_publish_qos,
    });
    info!(
        target: "apex.api",
        topic = %source.config().topic_prefix,
        "control_listener_starting"
    );
    let source_handle = tokio::spawn(async move {
        if let Err(err) = source.run(handler).await {
            warn!(target: "apex.api", error = %err, "control_listener_stopped");
        }
    });

    Ok(vec![publish_handle, source_handle])
}
