//! 按控制器族划分的寄存器映射表

use apex_normalize::round_significant;
use domain::{
    ApplicationDetail, ControlMode, DiagramType, GasFlowMeterData, Measured, PidData,
    PlungerLiftData, ValveControlData,
};
use std::collections::HashMap;

/// 寄存器解码目标字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterField {
    CurrentMode,
    Setpoint,
    ProcessVariable,
    OutputPercent,
    ProportionalGain,
    IntegralGain,
    DerivativeGain,
    Deadband,
    ValvePosition,
    DifferentialPressure,
    StaticPressure,
    FlowRate,
    HighLimit,
    LowLimit,
    PlungerState,
    ArrivalsToday,
    ArrivalsYesterday,
    LastArrivalSeconds,
    OnTimeMinutes,
    OffTimeMinutes,
    AfterflowMinutes,
    CasingPressure,
    TubingPressure,
    LinePressure,
    Temperature,
    TodayVolume,
    YesterdayVolume,
    BatteryVoltage,
}

use RegisterField as F;

const PID_CONTROLLER_MAP: &[(i32, RegisterField)] = &[
    (40101, F::CurrentMode),
    (40102, F::Setpoint),
    (40103, F::ProcessVariable),
    (40104, F::OutputPercent),
    (40105, F::ProportionalGain),
    (40106, F::IntegralGain),
    (40107, F::DerivativeGain),
    (40108, F::Deadband),
];

// 40215 与 40205 均写入阀位，后者在表中靠后，存在时覆盖前者。
const VALVE_CONTROL_MAP: &[(i32, RegisterField)] = &[
    (40201, F::CurrentMode),
    (40202, F::Setpoint),
    (40203, F::DifferentialPressure),
    (40204, F::StaticPressure),
    (40205, F::ValvePosition),
    (40206, F::FlowRate),
    (40207, F::HighLimit),
    (40208, F::LowLimit),
    (40215, F::ValvePosition),
];

const PLUNGER_LIFT_MAP: &[(i32, RegisterField)] = &[
    (40301, F::CurrentMode),
    (40302, F::PlungerState),
    (40303, F::ArrivalsToday),
    (40304, F::ArrivalsYesterday),
    (40305, F::LastArrivalSeconds),
    (40306, F::OnTimeMinutes),
    (40307, F::OffTimeMinutes),
    (40308, F::AfterflowMinutes),
    (40309, F::CasingPressure),
    (40310, F::TubingPressure),
    (40311, F::LinePressure),
];

const PCS_FERGUSON_PLUNGER_LIFT_MAP: &[(i32, RegisterField)] = &[
    (30001, F::CurrentMode),
    (30005, F::PlungerState),
    (30010, F::ArrivalsToday),
    (30011, F::ArrivalsYesterday),
    (30020, F::LastArrivalSeconds),
    (30030, F::OnTimeMinutes),
    (30031, F::OffTimeMinutes),
    (30032, F::AfterflowMinutes),
    (30040, F::CasingPressure),
    (30041, F::TubingPressure),
    (30042, F::LinePressure),
    (30050, F::CasingPressure),
];

const GAS_FLOW_METER_MAP: &[(i32, RegisterField)] = &[
    (40401, F::FlowRate),
    (40402, F::StaticPressure),
    (40403, F::DifferentialPressure),
    (40404, F::Temperature),
    (40405, F::TodayVolume),
    (40406, F::YesterdayVolume),
    (40407, F::BatteryVoltage),
];

/// 控制器族；每族独占一张映射表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerFamily {
    PidController,
    ValveControl,
    PlungerLift,
    PcsFergusonPlungerLift,
    GasFlowMeter,
}

impl ControllerFamily {
    /// 由图表类型确定控制器族；非整数寄存器分支返回 None
    pub fn for_diagram(diagram: DiagramType) -> Option<Self> {
        match diagram {
            DiagramType::Pid => Some(Self::PidController),
            DiagramType::ValveControl => Some(Self::ValveControl),
            DiagramType::PlungerLift => Some(Self::PlungerLift),
            DiagramType::PcsFergusonPlungerLift => Some(Self::PcsFergusonPlungerLift),
            DiagramType::GasFlowMeter => Some(Self::GasFlowMeter),
            _ => None,
        }
    }

    pub fn register_map(self) -> &'static [(i32, RegisterField)] {
        match self {
            Self::PidController => PID_CONTROLLER_MAP,
            Self::ValveControl => VALVE_CONTROL_MAP,
            Self::PlungerLift => PLUNGER_LIFT_MAP,
            Self::PcsFergusonPlungerLift => PCS_FERGUSON_PLUNGER_LIFT_MAP,
            Self::GasFlowMeter => GAS_FLOW_METER_MAP,
        }
    }

    /// 需要向扫描数据源请求的地址（去重、保持表序）
    pub fn addresses(self) -> Vec<i32> {
        let mut addresses = Vec::with_capacity(self.register_map().len());
        for (address, _) in self.register_map() {
            if !addresses.contains(address) {
                addresses.push(*address);
            }
        }
        addresses
    }

    /// 按表序解码扫描快照
    ///
    /// 快照中缺失的地址不赋值；同一字段出现多次时，表中靠后且存在的一项生效。
    /// 测量值字段保留基准单位原值，由单位换算统一取整。
    pub fn decode(
        self,
        snapshot: &HashMap<i32, f64>,
        significant_digits: u32,
        phrases: &HashMap<i32, String>,
    ) -> ApplicationDetail {
        match self {
            Self::PidController => {
                let mut data: PidData = decode_into(self, snapshot, significant_digits);
                data.control_mode_text = mode_text(data.current_mode, phrases);
                ApplicationDetail::Pid(data)
            }
            Self::ValveControl => {
                let mut data: ValveControlData = decode_into(self, snapshot, significant_digits);
                data.control_mode_text = mode_text(data.current_mode, phrases);
                ApplicationDetail::ValveControl(data)
            }
            Self::PlungerLift | Self::PcsFergusonPlungerLift => {
                let mut data: PlungerLiftData = decode_into(self, snapshot, significant_digits);
                data.control_mode_text = mode_text(data.current_mode, phrases);
                ApplicationDetail::PlungerLift(data)
            }
            Self::GasFlowMeter => {
                ApplicationDetail::GasFlowMeter(decode_into(self, snapshot, significant_digits))
            }
        }
    }
}

fn mode_text(mode: Option<f64>, phrases: &HashMap<i32, String>) -> Option<String> {
    mode.map(|value| ControlMode::from_value(value).display_text(phrases))
}

fn decode_into<T: RegisterTarget + Default>(
    family: ControllerFamily,
    snapshot: &HashMap<i32, f64>,
    significant_digits: u32,
) -> T {
    let mut target = T::default();
    for (address, field) in family.register_map() {
        let Some(raw) = snapshot.get(address) else {
            continue;
        };
        match target.slot(*field) {
            Some(Slot::Scalar(slot)) => *slot = Some(round_significant(*raw, significant_digits)),
            Some(Slot::Quantity(slot)) => slot.value = Some(*raw),
            None => tracing::debug!(
                target: "apex.protocol",
                ?family,
                address,
                ?field,
                "register_field_unassignable"
            ),
        }
    }
    target
}

enum Slot<'a> {
    Scalar(&'a mut Option<f64>),
    Quantity(&'a mut Measured),
}

/// 可接收寄存器字段的明细结构
trait RegisterTarget {
    fn slot(&mut self, field: RegisterField) -> Option<Slot<'_>>;
}

impl RegisterTarget for PidData {
    fn slot(&mut self, field: RegisterField) -> Option<Slot<'_>> {
        let slot = match field {
            F::CurrentMode => &mut self.current_mode,
            F::Setpoint => &mut self.setpoint,
            F::ProcessVariable => &mut self.process_variable,
            F::OutputPercent => &mut self.output_percent,
            F::ProportionalGain => &mut self.proportional_gain,
            F::IntegralGain => &mut self.integral_gain,
            F::DerivativeGain => &mut self.derivative_gain,
            F::Deadband => &mut self.deadband,
            _ => return None,
        };
        Some(Slot::Scalar(slot))
    }
}

impl RegisterTarget for ValveControlData {
    fn slot(&mut self, field: RegisterField) -> Option<Slot<'_>> {
        Some(match field {
            F::CurrentMode => Slot::Scalar(&mut self.current_mode),
            F::Setpoint => Slot::Scalar(&mut self.setpoint),
            F::ValvePosition => Slot::Scalar(&mut self.valve_position),
            F::DifferentialPressure => Slot::Quantity(&mut self.differential_pressure),
            F::StaticPressure => Slot::Quantity(&mut self.static_pressure),
            F::FlowRate => Slot::Quantity(&mut self.flow_rate),
            F::HighLimit => Slot::Scalar(&mut self.high_limit),
            F::LowLimit => Slot::Scalar(&mut self.low_limit),
            _ => return None,
        })
    }
}

impl RegisterTarget for PlungerLiftData {
    fn slot(&mut self, field: RegisterField) -> Option<Slot<'_>> {
        Some(match field {
            F::CurrentMode => Slot::Scalar(&mut self.current_mode),
            F::PlungerState => Slot::Scalar(&mut self.plunger_state),
            F::ArrivalsToday => Slot::Scalar(&mut self.arrivals_today),
            F::ArrivalsYesterday => Slot::Scalar(&mut self.arrivals_yesterday),
            F::LastArrivalSeconds => Slot::Scalar(&mut self.last_arrival_seconds),
            F::OnTimeMinutes => Slot::Scalar(&mut self.on_time_minutes),
            F::OffTimeMinutes => Slot::Scalar(&mut self.off_time_minutes),
            F::AfterflowMinutes => Slot::Scalar(&mut self.afterflow_minutes),
            F::CasingPressure => Slot::Quantity(&mut self.casing_pressure),
            F::TubingPressure => Slot::Quantity(&mut self.tubing_pressure),
            F::LinePressure => Slot::Quantity(&mut self.line_pressure),
            _ => return None,
        })
    }
}

impl RegisterTarget for GasFlowMeterData {
    fn slot(&mut self, field: RegisterField) -> Option<Slot<'_>> {
        Some(match field {
            F::FlowRate => Slot::Quantity(&mut self.flow_rate),
            F::StaticPressure => Slot::Quantity(&mut self.static_pressure),
            F::DifferentialPressure => Slot::Quantity(&mut self.differential_pressure),
            F::Temperature => Slot::Quantity(&mut self.temperature),
            F::TodayVolume => Slot::Quantity(&mut self.today_volume),
            F::YesterdayVolume => Slot::Quantity(&mut self.yesterday_volume),
            F::BatteryVoltage => Slot::Scalar(&mut self.battery_voltage),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_is_assignable() {
        let families = [
            ControllerFamily::PidController,
            ControllerFamily::ValveControl,
            ControllerFamily::PlungerLift,
            ControllerFamily::PcsFergusonPlungerLift,
            ControllerFamily::GasFlowMeter,
        ];
        for family in families {
            for (address, field) in family.register_map() {
                let assigned = match family {
                    ControllerFamily::PidController => PidData::default().slot(*field).is_some(),
                    ControllerFamily::ValveControl => {
                        ValveControlData::default().slot(*field).is_some()
                    }
                    ControllerFamily::PlungerLift | ControllerFamily::PcsFergusonPlungerLift => {
                        PlungerLiftData::default().slot(*field).is_some()
                    }
                    ControllerFamily::GasFlowMeter => {
                        GasFlowMeterData::default().slot(*field).is_some()
                    }
                };
                assert!(assigned, "{family:?} {address} {field:?}");
            }
        }
    }

    #[test]
    fn addresses_are_unique() {
        let addresses = ControllerFamily::ValveControl.addresses();
        assert_eq!(addresses.len(), VALVE_CONTROL_MAP.len());
    }
}
