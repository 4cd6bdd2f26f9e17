//! 协议相关类型定义

use serde::{Deserialize, Serialize};

/// 节点地址中的协议族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolKind {
    /// `i`
    Modbus,
    /// `m`
    #[serde(rename = "ModbusTCP")]
    ModbusTcp,
    /// `e`
    ModbusEthernet,
    /// `o`
    #[serde(rename = "OPC")]
    Opc,
}

impl ProtocolKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'i' => Some(Self::Modbus),
            'm' => Some(Self::ModbusTcp),
            'e' => Some(Self::ModbusEthernet),
            'o' => Some(Self::Opc),
            _ => None,
        }
    }

    pub fn is_modbus(self) -> bool {
        matches!(self, Self::Modbus | Self::ModbusTcp | Self::ModbusEthernet)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Modbus => "Modbus",
            Self::ModbusTcp => "ModbusTCP",
            Self::ModbusEthernet => "ModbusEthernet",
            Self::Opc => "OPC",
        }
    }
}

/// 节点地址解析结果
///
/// `success = false` 时已匹配的字段仍然保留。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedNodeAddress {
    pub success: bool,
    pub protocol: Option<ProtocolKind>,
    pub hostname: Option<String>,
    pub opc_type_name: Option<String>,
    pub port: Option<u16>,
    pub rtu_address: Option<String>,
    pub offset: Option<i32>,
}

impl ParsedNodeAddress {
    /// 完全无法匹配语法时的结果
    pub fn unmatched() -> Self {
        Self::default()
    }
}
