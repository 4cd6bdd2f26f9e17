//! 图表类型决策表（纯函数）。

use apex_storage::CoreAssetRecord;
use domain::{DiagramType, IndustryApplication, PumpingUnitType, poc_type};

/// 决策输入。
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramInputs<'a> {
    pub application_id: Option<i32>,
    pub poc_type: i32,
    pub pumping_unit_type: Option<&'a str>,
    /// 制造商缩写（液压抽油机分支使用）。
    pub manufacturer: Option<&'a str>,
}

impl<'a> DiagramInputs<'a> {
    pub fn from_record(record: &'a CoreAssetRecord) -> Self {
        Self {
            application_id: record.application_id,
            poc_type: record.poc_type,
            pumping_unit_type: record.pumping_unit_type.as_deref(),
            manufacturer: record.pumping_unit_manufacturer.as_deref(),
        }
    }
}

/// AutoLift 井是否只按气举处理。
///
/// 当前恒为 false；柱塞辅助气举分支中 AutoLift 控制器无论此值如何都选 `GasLiftManager`。
/// 保留此开关等待产品确认。
pub fn auto_lift_well_with_gas_lift_only() -> bool {
    false
}

pub fn select_diagram_type(inputs: &DiagramInputs<'_>) -> DiagramType {
    let Some(application) = inputs.application_id.and_then(IndustryApplication::from_id) else {
        return DiagramType::RegisterView;
    };
    match application {
        IndustryApplication::RodArtificialLift => select_rod_lift(inputs),
        IndustryApplication::EspArtificialLift => {
            if inputs.poc_type == poc_type::SMARTEN {
                DiagramType::Smarten
            } else {
                DiagramType::Esp
            }
        }
        IndustryApplication::PcpArtificialLift => DiagramType::Pcp,
        IndustryApplication::PlungerArtificialLift => select_plunger_lift(inputs.poc_type),
        IndustryApplication::PlungerAssistedGasLift => {
            if inputs.poc_type == poc_type::AUTO_LIFT {
                tracing::debug!(
                    target: "apex.status",
                    gas_lift_only = auto_lift_well_with_gas_lift_only(),
                    "auto_lift_diagram"
                );
                DiagramType::GasLiftManager
            } else {
                select_plunger_lift(inputs.poc_type)
            }
        }
        IndustryApplication::GasArtificialLift => {
            if inputs.poc_type == poc_type::GAS_LIFT_MANAGER {
                DiagramType::GasLiftManager
            } else {
                DiagramType::GasLift
            }
        }
        IndustryApplication::ChemicalInjection => DiagramType::ChemicalInjection,
        IndustryApplication::WaterInjection => DiagramType::WaterInjection,
        IndustryApplication::JetPump => DiagramType::JetPump,
        IndustryApplication::Facility => DiagramType::Facility,
        IndustryApplication::NaturalFlow => match inputs.poc_type {
            poc_type::PID_CONTROLLER => DiagramType::Pid,
            poc_type::VALVE_CONTROL => DiagramType::ValveControl,
            _ => DiagramType::GasFlowMeter,
        },
    }
}

fn select_rod_lift(inputs: &DiagramInputs<'_>) -> DiagramType {
    match inputs.pumping_unit_type.and_then(PumpingUnitType::parse) {
        Some(PumpingUnitType::Hydraulic) => match inputs.manufacturer.map(str::trim) {
            Some("HNC") => DiagramType::NovCoreLiftController,
            Some("HSS") => DiagramType::TundraSsi,
            _ => DiagramType::HydraulicStrokingUnit,
        },
        Some(PumpingUnitType::RotaFlex) => DiagramType::RotaFlex,
        _ => DiagramType::RodLift,
    }
}

fn select_plunger_lift(poc: i32) -> DiagramType {
    match poc {
        poc_type::TOTAL_FLOW => DiagramType::TotalFlowPlungerLift,
        poc_type::PCS_FERGUSON_8000 => DiagramType::PcsFergusonPlungerLift,
        _ => DiagramType::PlungerLift,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(application_id: Option<i32>, poc: i32) -> DiagramInputs<'static> {
        DiagramInputs {
            application_id,
            poc_type: poc,
            ..DiagramInputs::default()
        }
    }

    #[test]
    fn unknown_application_falls_back_to_register_view() {
        for poc in [0, 8, 45, 90, 999] {
            assert_eq!(
                select_diagram_type(&inputs(Some(999), poc)),
                DiagramType::RegisterView
            );
            assert_eq!(
                select_diagram_type(&inputs(None, poc)),
                DiagramType::RegisterView
            );
        }
    }

    #[test]
    fn hydraulic_rod_lift_branches_on_manufacturer() {
        let mut rod = DiagramInputs {
            application_id: Some(3),
            poc_type: poc_type::LUFKIN_SAM,
            pumping_unit_type: Some("H"),
            manufacturer: Some("HNC"),
        };
        assert_eq!(
            select_diagram_type(&rod),
            DiagramType::NovCoreLiftController
        );
        rod.manufacturer = Some("HSS");
        assert_eq!(select_diagram_type(&rod), DiagramType::TundraSsi);
        rod.manufacturer = Some("LUF");
        assert_eq!(
            select_diagram_type(&rod),
            DiagramType::HydraulicStrokingUnit
        );
        rod.manufacturer = None;
        assert_eq!(
            select_diagram_type(&rod),
            DiagramType::HydraulicStrokingUnit
        );
    }

    #[test]
    fn rod_lift_unit_types() {
        let mut rod = DiagramInputs {
            application_id: Some(3),
            pumping_unit_type: Some("F"),
            ..DiagramInputs::default()
        };
        assert_eq!(select_diagram_type(&rod), DiagramType::RotaFlex);
        rod.pumping_unit_type = Some("C");
        assert_eq!(select_diagram_type(&rod), DiagramType::RodLift);
        rod.pumping_unit_type = None;
        assert_eq!(select_diagram_type(&rod), DiagramType::RodLift);
    }

    #[test]
    fn plunger_assisted_gas_lift() {
        assert_eq!(
            select_diagram_type(&inputs(Some(8), poc_type::AUTO_LIFT)),
            DiagramType::GasLiftManager
        );
        assert_eq!(
            select_diagram_type(&inputs(Some(8), poc_type::TOTAL_FLOW)),
            DiagramType::TotalFlowPlungerLift
        );
        assert_eq!(
            select_diagram_type(&inputs(Some(8), poc_type::GENERIC)),
            DiagramType::PlungerLift
        );
        assert!(!auto_lift_well_with_gas_lift_only());
    }

    #[test]
    fn application_branches() {
        let cases = [
            (4, poc_type::SMARTEN, DiagramType::Smarten),
            (4, poc_type::ESP_WELL_PILOT, DiagramType::Esp),
            (5, 0, DiagramType::Pcp),
            (6, poc_type::PCS_FERGUSON_8000, DiagramType::PcsFergusonPlungerLift),
            (7, poc_type::GAS_LIFT_MANAGER, DiagramType::GasLiftManager),
            (7, 0, DiagramType::GasLift),
            (9, 0, DiagramType::ChemicalInjection),
            (10, 0, DiagramType::WaterInjection),
            (11, 0, DiagramType::JetPump),
            (12, 0, DiagramType::Facility),
            (13, poc_type::PID_CONTROLLER, DiagramType::Pid),
            (13, poc_type::VALVE_CONTROL, DiagramType::ValveControl),
            (13, poc_type::GAS_FLOW_METER, DiagramType::GasFlowMeter),
            (13, 0, DiagramType::GasFlowMeter),
        ];
        for (application, poc, expected) in cases {
            assert_eq!(
                select_diagram_type(&inputs(Some(application), poc)),
                expected,
                "application {application} poc {poc}"
            );
        }
    }
}
