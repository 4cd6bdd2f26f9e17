//! 告警与异常条目。

use serde::{Deserialize, Serialize};

/// 告警来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlarmSource {
    Config,
    Host,
    Facility,
    Camera,
}

/// 合并后的告警条目。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmEntry {
    pub description: String,
    pub priority: i32,
    pub source: AlarmSource,
}

/// 节点异常条件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionEntry {
    pub description: String,
    pub priority: i32,
}
