//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 资产状态刷新间隔默认值（秒）。
pub const DEFAULT_REFRESH_INTERVAL_SECONDS: u64 = 15;
/// 新版通信微服务路由键前缀默认值。
pub const DEFAULT_COMM_BASE_ROUTING_KEY: &str = "Edge.Comms.Config.Update";

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub database_url: Option<String>,
    pub asset_status_refresh_interval_seconds: u64,
    pub data_store_updates_comm_base_routing_key: String,
    pub smarten_api_port: u16,
    pub mqtt_host: String,
    pub mqtt_port: u16,
    pub mqtt_username: Option<String>,
    pub mqtt_password: Option<String>,
    pub mqtt_data_store_updates_topic: String,
    pub mqtt_publish_topic_prefix: String,
    pub mqtt_publish_qos: u8,
    pub control_enabled: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr = env::var("APEX_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let database_url = read_optional("APEX_DATABASE_URL");
        // 刷新间隔无法解析时回落默认值，不视为配置错误。
        let asset_status_refresh_interval_seconds = read_u64_lenient(
            "APEX_ASSET_STATUS_REFRESH_INTERVAL",
            DEFAULT_REFRESH_INTERVAL_SECONDS,
        );
        let data_store_updates_comm_base_routing_key =
            read_optional("APEX_DATA_STORE_UPDATES_COMM_BASE_ROUTING_KEY")
                .unwrap_or_else(|| DEFAULT_COMM_BASE_ROUTING_KEY.to_string());
        let smarten_api_port = read_u16_with_default("APEX_SMARTEN_API_PORT", 8080)?;
        let mqtt_host = env::var("APEX_MQTT_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let mqtt_port = read_u16_with_default("APEX_MQTT_PORT", 1883)?;
        let mqtt_username = read_optional("APEX_MQTT_USERNAME");
        let mqtt_password = read_optional("APEX_MQTT_PASSWORD");
        let mqtt_data_store_updates_topic = env::var("APEX_MQTT_DATA_STORE_UPDATES_TOPIC")
            .unwrap_or_else(|_| "apex/data-store-updates".to_string());
        let mqtt_publish_topic_prefix = env::var("APEX_MQTT_PUBLISH_TOPIC_PREFIX")
            .unwrap_or_else(|_| "apex/transactions".to_string());
        let mqtt_publish_qos = read_u8_with_default("APEX_MQTT_PUBLISH_QOS", 1)?;
        if mqtt_publish_qos > 2 {
            return Err(ConfigError::Invalid(
                "APEX_MQTT_PUBLISH_QOS".to_string(),
                mqtt_publish_qos.to_string(),
            ));
        }
        let control_enabled = read_bool_with_default("APEX_CONTROL", false);

        Ok(Self {
            http_addr,
            database_url,
            asset_status_refresh_interval_seconds,
            data_store_updates_comm_base_routing_key,
            smarten_api_port,
            mqtt_host,
            mqtt_port,
            mqtt_username,
            mqtt_password,
            mqtt_data_store_updates_topic,
            mqtt_publish_topic_prefix,
            mqtt_publish_qos,
            control_enabled,
        })
    }
}

fn read_u16_with_default(key: &str, default: u16) -> Result<u16, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u8_with_default(key: &str, default: u8) -> Result<u8, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u8>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_lenient(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
