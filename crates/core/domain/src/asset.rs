//! 资产分类：行业应用、POC 类型、抽油机类型与图表类型。

use serde::{Deserialize, Serialize};

/// 行业应用（资产的举升/生产方式）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndustryApplication {
    RodArtificialLift,
    EspArtificialLift,
    PcpArtificialLift,
    PlungerArtificialLift,
    GasArtificialLift,
    PlungerAssistedGasLift,
    ChemicalInjection,
    WaterInjection,
    JetPump,
    Facility,
    NaturalFlow,
}

impl IndustryApplication {
    /// 由存储中的 application id 解析；未知 id 返回 None。
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            3 => Some(Self::RodArtificialLift),
            4 => Some(Self::EspArtificialLift),
            5 => Some(Self::PcpArtificialLift),
            6 => Some(Self::PlungerArtificialLift),
            7 => Some(Self::GasArtificialLift),
            8 => Some(Self::PlungerAssistedGasLift),
            9 => Some(Self::ChemicalInjection),
            10 => Some(Self::WaterInjection),
            11 => Some(Self::JetPump),
            12 => Some(Self::Facility),
            13 => Some(Self::NaturalFlow),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Self::RodArtificialLift => 3,
            Self::EspArtificialLift => 4,
            Self::PcpArtificialLift => 5,
            Self::PlungerArtificialLift => 6,
            Self::GasArtificialLift => 7,
            Self::PlungerAssistedGasLift => 8,
            Self::ChemicalInjection => 9,
            Self::WaterInjection => 10,
            Self::JetPump => 11,
            Self::Facility => 12,
            Self::NaturalFlow => 13,
        }
    }
}

/// POC（控制器）类型代码。
pub mod poc_type {
    pub const GENERIC: i32 = 0;
    pub const LUFKIN_SAM: i32 = 8;
    pub const WELL_PILOT_RPOC: i32 = 17;
    pub const ESP_WELL_PILOT: i32 = 35;
    pub const TOTAL_FLOW: i32 = 45;
    pub const PCS_FERGUSON_8000: i32 = 47;
    pub const AUTO_LIFT: i32 = 49;
    pub const GAS_LIFT_MANAGER: i32 = 52;
    pub const PID_CONTROLLER: i32 = 60;
    pub const VALVE_CONTROL: i32 = 61;
    pub const GAS_FLOW_METER: i32 = 62;
    pub const SMARTEN: i32 = 90;
}

/// 抽油机类型（由抽油机记录的类型代码解析）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PumpingUnitType {
    Conventional,
    MarkII,
    AirBalanced,
    BeamBalanced,
    ReverseMark,
    LowProfile,
    RotaFlex,
    Hydraulic,
}

impl PumpingUnitType {
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim() {
            "C" => Some(Self::Conventional),
            "M" => Some(Self::MarkII),
            "A" => Some(Self::AirBalanced),
            "B" => Some(Self::BeamBalanced),
            "R" => Some(Self::ReverseMark),
            "L" => Some(Self::LowProfile),
            "F" => Some(Self::RotaFlex),
            "H" => Some(Self::Hydraulic),
            _ => None,
        }
    }
}

/// 资产状态页面的图表/分支类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagramType {
    RegisterView,
    RodLift,
    RotaFlex,
    HydraulicStrokingUnit,
    #[serde(rename = "NOVCoreLiftController")]
    NovCoreLiftController,
    #[serde(rename = "TundraSSi")]
    TundraSsi,
    Esp,
    Smarten,
    Pcp,
    PlungerLift,
    TotalFlowPlungerLift,
    PcsFergusonPlungerLift,
    GasLift,
    GasLiftManager,
    ChemicalInjection,
    WaterInjection,
    JetPump,
    Facility,
    Pid,
    ValveControl,
    GasFlowMeter,
}

/// 图表类型驱动的可选明细类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    None,
    RodStrings,
    EspMotorPump,
    GasLift,
    PlungerLiftRegisters,
    TotalFlowPlungerLift,
    ChemicalInjection,
    Pid,
    ValveControl,
    GasFlowMeter,
    FacilityTags,
}

impl DiagramType {
    pub fn detail_kind(self) -> DetailKind {
        match self {
            Self::RodLift
            | Self::RotaFlex
            | Self::HydraulicStrokingUnit
            | Self::NovCoreLiftController
            | Self::TundraSsi => DetailKind::RodStrings,
            Self::Esp | Self::Smarten => DetailKind::EspMotorPump,
            Self::GasLift | Self::GasLiftManager => DetailKind::GasLift,
            Self::PlungerLift | Self::PcsFergusonPlungerLift => DetailKind::PlungerLiftRegisters,
            Self::TotalFlowPlungerLift => DetailKind::TotalFlowPlungerLift,
            Self::ChemicalInjection => DetailKind::ChemicalInjection,
            Self::Pid => DetailKind::Pid,
            Self::ValveControl => DetailKind::ValveControl,
            Self::GasFlowMeter => DetailKind::GasFlowMeter,
            Self::Facility => DetailKind::FacilityTags,
            Self::RegisterView | Self::Pcp | Self::WaterInjection | Self::JetPump => {
                DetailKind::None
            }
        }
    }
}
