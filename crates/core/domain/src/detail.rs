//! 各应用分支的可选明细数据。

use crate::measure::{Measured, UnitCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 控制模式（PID、阀门控制、柱塞举升控制器共用）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    Manual,
    Automatic,
    Cascade,
    Override,
    Unknown,
}

impl ControlMode {
    pub const PHRASE_IDS: [i32; 4] = [4101, 4102, 4103, 4104];

    /// 由寄存器原值解析（取整后匹配）。
    pub fn from_value(value: f64) -> Self {
        match value.round() as i64 {
            0 => Self::Manual,
            1 => Self::Automatic,
            2 => Self::Cascade,
            3 => Self::Override,
            _ => Self::Unknown,
        }
    }

    pub fn phrase_id(self) -> Option<i32> {
        match self {
            Self::Manual => Some(4101),
            Self::Automatic => Some(4102),
            Self::Cascade => Some(4103),
            Self::Override => Some(4104),
            Self::Unknown => None,
        }
    }

    fn default_text(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Automatic => "Automatic",
            Self::Cascade => "Cascade",
            Self::Override => "Override",
            Self::Unknown => "Unknown",
        }
    }

    /// 本地化显示文本；短语缺失时使用英文默认值。
    pub fn display_text(self, phrases: &HashMap<i32, String>) -> String {
        self.phrase_id()
            .and_then(|id| phrases.get(&id))
            .cloned()
            .unwrap_or_else(|| self.default_text().to_string())
    }
}

/// PID 控制器数据。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PidData {
    pub current_mode: Option<f64>,
    pub control_mode_text: Option<String>,
    pub setpoint: Option<f64>,
    pub process_variable: Option<f64>,
    pub output_percent: Option<f64>,
    pub proportional_gain: Option<f64>,
    pub integral_gain: Option<f64>,
    pub derivative_gain: Option<f64>,
    pub deadband: Option<f64>,
}

/// 阀门控制数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValveControlData {
    pub current_mode: Option<f64>,
    pub control_mode_text: Option<String>,
    pub setpoint: Option<f64>,
    pub valve_position: Option<f64>,
    pub differential_pressure: Measured,
    pub static_pressure: Measured,
    pub flow_rate: Measured,
    pub high_limit: Option<f64>,
    pub low_limit: Option<f64>,
}

impl Default for ValveControlData {
    fn default() -> Self {
        Self {
            current_mode: None,
            control_mode_text: None,
            setpoint: None,
            valve_position: None,
            differential_pressure: Measured::empty(UnitCategory::Pressure),
            static_pressure: Measured::empty(UnitCategory::Pressure),
            flow_rate: Measured::empty(UnitCategory::GasRate),
            high_limit: None,
            low_limit: None,
        }
    }
}

/// 柱塞举升控制器数据（整数寄存器）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlungerLiftData {
    pub current_mode: Option<f64>,
    pub control_mode_text: Option<String>,
    pub plunger_state: Option<f64>,
    pub arrivals_today: Option<f64>,
    pub arrivals_yesterday: Option<f64>,
    pub last_arrival_seconds: Option<f64>,
    pub on_time_minutes: Option<f64>,
    pub off_time_minutes: Option<f64>,
    pub afterflow_minutes: Option<f64>,
    pub casing_pressure: Measured,
    pub tubing_pressure: Measured,
    pub line_pressure: Measured,
}

impl Default for PlungerLiftData {
    fn default() -> Self {
        Self {
            current_mode: None,
            control_mode_text: None,
            plunger_state: None,
            arrivals_today: None,
            arrivals_yesterday: None,
            last_arrival_seconds: None,
            on_time_minutes: None,
            off_time_minutes: None,
            afterflow_minutes: None,
            casing_pressure: Measured::empty(UnitCategory::Pressure),
            tubing_pressure: Measured::empty(UnitCategory::Pressure),
            line_pressure: Measured::empty(UnitCategory::Pressure),
        }
    }
}

/// TotalFlow 柱塞举升数据（`TfReg:` 字符串地址）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalFlowPlungerLiftData {
    pub plunger_state_text: Option<String>,
    pub current_mode: Option<f64>,
    pub control_mode_text: Option<String>,
    pub arrival_time_seconds: Option<f64>,
    pub afterflow_minutes: Option<f64>,
    pub close_time_minutes: Option<f64>,
    pub casing_pressure: Measured,
    pub tubing_pressure: Measured,
    pub line_pressure: Measured,
    pub gas_flow_rate: Measured,
    pub efm_today_volume: Measured,
    pub efm_yesterday_volume: Measured,
    pub efm_lifetime_accumulation: Measured,
}

impl Default for TotalFlowPlungerLiftData {
    fn default() -> Self {
        Self {
            plunger_state_text: None,
            current_mode: None,
            control_mode_text: None,
            arrival_time_seconds: None,
            afterflow_minutes: None,
            close_time_minutes: None,
            casing_pressure: Measured::empty(UnitCategory::Pressure),
            tubing_pressure: Measured::empty(UnitCategory::Pressure),
            line_pressure: Measured::empty(UnitCategory::Pressure),
            gas_flow_rate: Measured::empty(UnitCategory::GasRate),
            efm_today_volume: Measured::empty(UnitCategory::GasVolume),
            efm_yesterday_volume: Measured::empty(UnitCategory::GasVolume),
            efm_lifetime_accumulation: Measured::empty(UnitCategory::GasVolume),
        }
    }
}

/// 气体流量计数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasFlowMeterData {
    pub flow_rate: Measured,
    pub static_pressure: Measured,
    pub differential_pressure: Measured,
    pub temperature: Measured,
    pub today_volume: Measured,
    pub yesterday_volume: Measured,
    pub battery_voltage: Option<f64>,
}

impl Default for GasFlowMeterData {
    fn default() -> Self {
        Self {
            flow_rate: Measured::empty(UnitCategory::GasRate),
            static_pressure: Measured::empty(UnitCategory::Pressure),
            differential_pressure: Measured::empty(UnitCategory::Pressure),
            temperature: Measured::empty(UnitCategory::Temperature),
            today_volume: Measured::empty(UnitCategory::GasVolume),
            yesterday_volume: Measured::empty(UnitCategory::GasVolume),
            battery_voltage: None,
        }
    }
}

/// 电潜泵电机与泵信息。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EspMotorPumpInfo {
    pub motor_manufacturer: Option<String>,
    pub motor_model: Option<String>,
    pub motor_nameplate_hp: Option<f64>,
    pub motor_nameplate_volts: Option<f64>,
    pub motor_nameplate_amps: Option<f64>,
    pub pump_manufacturer: Option<String>,
    pub pump_model: Option<String>,
    pub pump_stages: Option<i32>,
}

/// 气举信息。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasLiftInfo {
    pub injection_rate: Measured,
    pub injection_pressure: Measured,
    pub valve_count: Option<i32>,
    pub operating_valve_depth: Measured,
}

impl Default for GasLiftInfo {
    fn default() -> Self {
        Self {
            injection_rate: Measured::empty(UnitCategory::GasRate),
            injection_pressure: Measured::empty(UnitCategory::Pressure),
            valve_count: None,
            operating_valve_depth: Measured::empty(UnitCategory::Length),
        }
    }
}

/// 化学注入信息。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalInjectionInfo {
    pub chemical_name: Option<String>,
    pub tank_level: Option<f64>,
    pub target_rate: Option<f64>,
    pub actual_rate: Option<f64>,
    pub pump_running: Option<bool>,
}

/// 站场标签。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityTag {
    pub description: String,
    pub address: i32,
    pub value: Option<String>,
    pub engineering_units: Option<String>,
    pub alarm_state: Option<String>,
}

/// 抽油杆柱分段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RodString {
    pub section: i32,
    pub grade: Option<String>,
    pub diameter_in: Option<f64>,
    pub length_ft: Option<f64>,
}

/// 按图表类型填充的明细；每个请求至多一种。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum ApplicationDetail {
    #[default]
    None,
    EspMotorPump(EspMotorPumpInfo),
    GasLift(GasLiftInfo),
    PlungerLift(PlungerLiftData),
    TotalFlowPlungerLift(TotalFlowPlungerLiftData),
    ChemicalInjection(ChemicalInjectionInfo),
    Pid(PidData),
    ValveControl(ValveControlData),
    GasFlowMeter(GasFlowMeterData),
    FacilityTags(Vec<FacilityTag>),
}

impl ApplicationDetail {
    /// 明细中所有测量值字段（用于单位换算）。
    pub fn measured_fields_mut(&mut self) -> Vec<&mut Measured> {
        match self {
            Self::GasLift(info) => vec![
                &mut info.injection_rate,
                &mut info.injection_pressure,
                &mut info.operating_valve_depth,
            ],
            Self::PlungerLift(data) => vec![
                &mut data.casing_pressure,
                &mut data.tubing_pressure,
                &mut data.line_pressure,
            ],
            Self::TotalFlowPlungerLift(data) => vec![
                &mut data.casing_pressure,
                &mut data.tubing_pressure,
                &mut data.line_pressure,
                &mut data.gas_flow_rate,
                &mut data.efm_today_volume,
                &mut data.efm_yesterday_volume,
                &mut data.efm_lifetime_accumulation,
            ],
            Self::ValveControl(data) => vec![
                &mut data.differential_pressure,
                &mut data.static_pressure,
                &mut data.flow_rate,
            ],
            Self::GasFlowMeter(data) => vec![
                &mut data.flow_rate,
                &mut data.static_pressure,
                &mut data.differential_pressure,
                &mut data.temperature,
                &mut data.today_volume,
                &mut data.yesterday_volume,
            ],
            Self::None
            | Self::EspMotorPump(_)
            | Self::ChemicalInjection(_)
            | Self::Pid(_)
            | Self::FacilityTags(_) => Vec::new(),
        }
    }
}
