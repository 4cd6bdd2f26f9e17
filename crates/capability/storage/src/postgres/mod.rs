//! # PostgreSQL 存储实现模块
//!
//! 生产环境使用的存储实现，全部为只读查询。
//!
//! ## 数据库模式要求
//!
//! - `assets`：资产快照（asset_id, node_id, poc_type, application_id, 各测量列）
//! - `rod_strings` / `esp_motor_pumps` / `gas_lift_details` / `chemical_injection_details`
//! - `display_registers` / `parameter_standards`
//! - `config_alarms` / `host_alarms` / `camera_alarms` / `node_exceptions`
//! - `facility_tags` / `facility_alarms`
//! - `node_master` / `port_configurations`
//! - `system_parameters` / `locale_phrases` / `user_defaults`
//! - `curr_raw_scan_data`
//!
//! 所有 SQL 使用参数绑定（`$1`, `$2` 等），不做字符串拼接。

pub mod alarm;
pub mod asset;
pub mod facility;
pub mod node;
pub mod phrase;
pub mod port;
pub mod raw_scan;
pub mod system_parameter;
pub mod user_default;

pub use alarm::*;
pub use asset::*;
pub use facility::*;
pub use node::*;
pub use phrase::*;
pub use port::*;
pub use raw_scan::*;
pub use system_parameter::*;
pub use user_default::*;
