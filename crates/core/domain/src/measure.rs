//! 带单位类别的测量值。

use serde::{Deserialize, Serialize};

/// 计量类别；`name()` 即用户单位偏好中的键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    Pressure,
    FluidRate,
    GasRate,
    Length,
    ShortLength,
    Temperature,
    Weight,
    Power,
    FluidVolume,
    GasVolume,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 10] = [
        UnitCategory::Pressure,
        UnitCategory::FluidRate,
        UnitCategory::GasRate,
        UnitCategory::Length,
        UnitCategory::ShortLength,
        UnitCategory::Temperature,
        UnitCategory::Weight,
        UnitCategory::Power,
        UnitCategory::FluidVolume,
        UnitCategory::GasVolume,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pressure => "pressure",
            Self::FluidRate => "fluid rates",
            Self::GasRate => "gas rates",
            Self::Length => "length",
            Self::ShortLength => "short length",
            Self::Temperature => "temperature",
            Self::Weight => "weight",
            Self::Power => "power",
            Self::FluidVolume => "fluid volume",
            Self::GasVolume => "gas volume",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.name() == name)
    }
}

/// 测量值：原始存储值（基准单位）+ 换算后的显示单位。
///
/// 单位换算会原地覆盖 `value` 与 `unit`，同一请求内不可逆。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measured {
    pub value: Option<f64>,
    pub category: UnitCategory,
    pub unit: Option<String>,
}

impl Measured {
    pub fn new(value: Option<f64>, category: UnitCategory) -> Self {
        Self {
            value,
            category,
            unit: None,
        }
    }

    pub fn empty(category: UnitCategory) -> Self {
        Self::new(None, category)
    }
}
