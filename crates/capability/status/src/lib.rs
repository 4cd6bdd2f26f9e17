//! 资产状态聚合。
//!
//! - `diagram`：图表类型决策表
//! - `alarms`：四类告警合并与排序
//! - `service`：`AssetStatusService` 编排入口

pub mod alarms;
pub mod diagram;
pub mod error;
pub mod service;

pub use alarms::{config_alarm_active, host_alarm_suffix, merge_alarms, sort_exceptions};
pub use diagram::{DiagramInputs, auto_lift_well_with_gas_lift_only, select_diagram_type};
pub use error::StatusError;
pub use service::{AssetStatusService, StatusConfig, StatusStores};
