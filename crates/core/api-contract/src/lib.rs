//! 稳定的 DTO 与 API 响应契约。
//!
//! - HTTP：`ApiResponse`, `AssetStatusResponse`, `MetricsSnapshotDto`
//! - 总线入站：`DataStoreUpdateMessage`, `WellControlChange`
//! - 总线出站：`TransactionMessage`

use domain::{AlarmEntry, ApplicationDetail, DiagramType, ExceptionEntry, RodString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 资产状态响应；`values` 为空表示输入无效或资产不存在。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStatusResponse {
    pub correlation_id: String,
    pub values: Option<AssetStatusDto>,
}

impl AssetStatusResponse {
    /// 带关联 ID 的空结果。
    pub fn empty(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            values: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_none()
    }
}

/// 换算后的物理量（值 + 显示单位）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityDto {
    pub value: Option<f64>,
    pub unit: Option<String>,
}

/// 表格序列中的一行（显示寄存器、参数标准数据）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesItem {
    pub key: i32,
    pub description: String,
    /// 数值序列为换算、取整后的文本；非数值原样透传。
    pub value: Option<String>,
    pub unit: Option<String>,
}

/// 资产状态聚合结果。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStatusDto {
    pub asset_id: Uuid,
    pub asset_name: String,
    pub node_id: String,
    pub poc_type: i32,
    pub application_id: Option<i32>,
    pub diagram_type: DiagramType,
    pub run_status: Option<String>,
    pub comm_status: Option<String>,
    pub last_good_scan_ms: Option<i64>,
    pub tz_offset_hours: f64,
    pub honor_daylight_savings: bool,
    pub pumping_unit_name: Option<String>,
    pub pumping_unit_manufacturer: Option<String>,
    pub motor_kind: Option<String>,
    pub pump_type: Option<String>,
    pub tubing_pressure: QuantityDto,
    pub casing_pressure: QuantityDto,
    pub pump_intake_pressure: QuantityDto,
    pub fluid_level: QuantityDto,
    pub pump_depth: QuantityDto,
    pub stroke_length: QuantityDto,
    pub gross_rate: QuantityDto,
    pub oil_rate: QuantityDto,
    pub water_rate: QuantityDto,
    pub gas_rate: QuantityDto,
    pub motor_power: QuantityDto,
    pub peak_load: QuantityDto,
    pub minimum_load: QuantityDto,
    pub yesterday_gas_volume: QuantityDto,
    pub rod_strings: Vec<RodString>,
    pub detail: ApplicationDetail,
    pub registers: Vec<SeriesItem>,
    pub parameter_standards: Vec<SeriesItem>,
    pub alarms: Vec<AlarmEntry>,
    pub exceptions: Vec<ExceptionEntry>,
    pub refresh_interval_seconds: u64,
    /// SMARTEN 实时数据地址；无法确定主机时为空字符串。
    pub live_url: String,
}

/// 数据存储变更事件（总线入站）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataStoreUpdateMessage {
    pub correlation_id: String,
    pub payload_type: Option<String>,
    pub action: Option<String>,
    /// 变更行的 JSON 文本。
    pub payload: Option<String>,
}

/// 井控事务行（`tblTransactions` 变更载荷）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellControlChange {
    pub transaction_id: i64,
    pub asset_id: Uuid,
    pub task: String,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub register_address: Option<i32>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub requested_by: Option<String>,
    #[serde(default)]
    pub date_request_ms: Option<i64>,
}

/// 按协议族生成的事务载荷。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "camelCase")]
pub enum TransactionPayload {
    #[serde(rename_all = "camelCase")]
    ModbusWrite {
        protocol: String,
        host: Option<String>,
        port: Option<u16>,
        rtu: String,
        register_address: Option<i32>,
        offset: i32,
        value: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    OpcWrite {
        host: Option<String>,
        opc_type: Option<String>,
        tag: String,
        value: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Raw {
        node_address: Option<String>,
        input: Option<String>,
    },
}

/// 按需事务（总线出站）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMessage {
    pub correlation_id: String,
    pub transaction_id: i64,
    pub asset_id: Uuid,
    pub node_id: String,
    pub port_id: Option<i32>,
    pub task: String,
    pub requested_by: Option<String>,
    pub date_request_ms: Option<i64>,
    /// 仅新版微服务路由使用。
    pub routing_key: Option<String>,
    pub payload: TransactionPayload,
}

/// 计数指标快照（`GET /metrics`）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub status_requests: u64,
    pub status_empty: u64,
    pub status_failures: u64,
    pub status_latency_ms_total: u64,
    pub status_latency_ms_count: u64,
    pub dispatch_received: u64,
    pub dispatch_accepted: u64,
    pub dispatch_rejected: u64,
    pub publish_legacy: u64,
    pub publish_modern: u64,
}
