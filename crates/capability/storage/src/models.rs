//! 数据模型
//!
//! 定义所有存储相关的数据结构：
//! - 资产快照：CoreAssetRecord（含测量值字段）
//! - 表格序列：RegisterRecord, ParameterStandardRecord
//! - 告警来源：ConfigAlarmRecord, HostAlarmRecord, FacilityAlarmRecord, CameraAlarmRecord
//! - 异常：ExceptionRecord
//! - 通信配置：NodeRecord, PortRecord

use domain::{Measured, UnitCategory};

/// 资产核心快照（每次请求加载一次）。
///
/// 测量值字段存储的是基准单位原值，单位换算会原地覆盖。
#[derive(Debug, Clone)]
pub struct CoreAssetRecord {
    pub asset_id: uuid::Uuid,
    pub asset_name: String,
    pub node_id: String,
    pub customer_id: Option<uuid::Uuid>,
    pub poc_type: i32,
    pub application_id: Option<i32>,
    pub node_address: Option<String>,
    pub port_id: Option<i32>,
    pub tz_offset_hours: f64,
    pub honor_daylight_savings: bool,
    pub last_good_scan_ms: Option<i64>,
    pub run_status: Option<String>,
    pub comm_status: Option<String>,
    pub pumping_unit_type: Option<String>,
    pub pumping_unit_manufacturer: Option<String>,
    pub pumping_unit_name: Option<String>,
    pub motor_kind: Option<String>,
    pub pump_type: Option<String>,
    pub tubing_pressure: Measured,
    pub casing_pressure: Measured,
    pub pump_intake_pressure: Measured,
    pub fluid_level: Measured,
    pub pump_depth: Measured,
    pub stroke_length: Measured,
    pub gross_rate: Measured,
    pub oil_rate: Measured,
    pub water_rate: Measured,
    pub gas_rate: Measured,
    pub motor_power: Measured,
    pub peak_load: Measured,
    pub minimum_load: Measured,
    pub yesterday_gas_volume: Measured,
}

impl CoreAssetRecord {
    /// 构造仅含标识信息、测量值为空的记录。
    pub fn new(asset_id: uuid::Uuid, node_id: impl Into<String>, poc_type: i32) -> Self {
        Self {
            asset_id,
            asset_name: String::new(),
            node_id: node_id.into(),
            customer_id: None,
            poc_type,
            application_id: None,
            node_address: None,
            port_id: None,
            tz_offset_hours: 0.0,
            honor_daylight_savings: false,
            last_good_scan_ms: None,
            run_status: None,
            comm_status: None,
            pumping_unit_type: None,
            pumping_unit_manufacturer: None,
            pumping_unit_name: None,
            motor_kind: None,
            pump_type: None,
            tubing_pressure: Measured::empty(UnitCategory::Pressure),
            casing_pressure: Measured::empty(UnitCategory::Pressure),
            pump_intake_pressure: Measured::empty(UnitCategory::Pressure),
            fluid_level: Measured::empty(UnitCategory::Length),
            pump_depth: Measured::empty(UnitCategory::Length),
            stroke_length: Measured::empty(UnitCategory::ShortLength),
            gross_rate: Measured::empty(UnitCategory::FluidRate),
            oil_rate: Measured::empty(UnitCategory::FluidRate),
            water_rate: Measured::empty(UnitCategory::FluidRate),
            gas_rate: Measured::empty(UnitCategory::GasRate),
            motor_power: Measured::empty(UnitCategory::Power),
            peak_load: Measured::empty(UnitCategory::Weight),
            minimum_load: Measured::empty(UnitCategory::Weight),
            yesterday_gas_volume: Measured::empty(UnitCategory::GasVolume),
        }
    }

    /// 所有测量值字段（用于单位换算）。
    pub fn measured_fields_mut(&mut self) -> [&mut Measured; 14] {
        [
            &mut self.tubing_pressure,
            &mut self.casing_pressure,
            &mut self.pump_intake_pressure,
            &mut self.fluid_level,
            &mut self.pump_depth,
            &mut self.stroke_length,
            &mut self.gross_rate,
            &mut self.oil_rate,
            &mut self.water_rate,
            &mut self.gas_rate,
            &mut self.motor_power,
            &mut self.peak_load,
            &mut self.minimum_load,
            &mut self.yesterday_gas_volume,
        ]
    }
}

/// 显示寄存器（表格序列）。
#[derive(Debug, Clone)]
pub struct RegisterRecord {
    pub address: i32,
    pub description: String,
    pub raw_value: Option<String>,
    pub category: Option<UnitCategory>,
}

/// 参数标准数据（表格序列）。
#[derive(Debug, Clone)]
pub struct ParameterStandardRecord {
    pub param_standard_type: i32,
    pub description: String,
    pub raw_value: Option<String>,
    pub category: Option<UnitCategory>,
}

/// 配置告警（按位判断）。
#[derive(Debug, Clone)]
pub struct ConfigAlarmRecord {
    pub address: i32,
    pub bit: i32,
    pub description: String,
    pub priority: i32,
    pub normal_state: i32,
    pub current_value: Option<String>,
}

/// 主机告警。
#[derive(Debug, Clone)]
pub struct HostAlarmRecord {
    pub description: String,
    pub priority: i32,
    pub alarm_state: i32,
}

/// 站场告警。
#[derive(Debug, Clone)]
pub struct FacilityAlarmRecord {
    pub description: String,
    pub priority: i32,
}

/// 摄像头告警。
#[derive(Debug, Clone)]
pub struct CameraAlarmRecord {
    pub description: String,
    pub priority: i32,
}

/// 节点异常条件。
#[derive(Debug, Clone)]
pub struct ExceptionRecord {
    pub description: String,
    pub priority: i32,
}

/// 节点主记录（通信/控制配置）。
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub node_id: String,
    pub asset_id: uuid::Uuid,
    pub enabled: bool,
    pub port_id: Option<i32>,
    pub node_address: Option<String>,
    pub poc_type: i32,
}

/// 通信端口配置。
#[derive(Debug, Clone)]
pub struct PortRecord {
    pub port_id: i32,
    pub description: Option<String>,
    pub hostname: Option<String>,
    pub legacy: bool,
}
