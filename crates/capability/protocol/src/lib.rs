//! # 设备协议解码模块
//!
//! - **节点地址**：旧版节点记录以单个字符串编码连接信息，
//!   `NodeAddressParser` 负责解析为结构化字段
//! - **寄存器映射**：按控制器族划分的 (地址 → 字段) 表，
//!   将扫描快照解码为各图表类型的明细数据
//! - **TotalFlow 标签**：字符串地址 (`TfReg:a.b.c`) 变体
//!
//! ## 节点地址语法
//!
//! ```text
//! <协议字符><主机>[*OPC类型][|端口]|RTU地址[+偏移]
//! <RTU地址>[+偏移]
//! ```
//!
//! 协议字符：`i` Modbus，`m` Modbus TCP，`e` Modbus Ethernet，`o` OPC。
//!
//! ## 寄存器映射
//!
//! ```text
//! DiagramType ──► ControllerFamily ──► &'static [(地址, 字段)]
//!                                          │
//!      scan snapshot (地址 → 原值) ────────┴──► ApplicationDetail
//! ```
//!
//! 各族的表互相独立，不合并。

mod error;
mod node_address;
mod register_map;
mod total_flow;
mod types;

pub use error::NodeAddressError;
pub use node_address::{NodeAddressParser, RegexNodeAddressParser};
pub use register_map::{ControllerFamily, RegisterField};
pub use total_flow::{TotalFlowField, TotalFlowTag, decode_total_flow};
pub use types::*;
