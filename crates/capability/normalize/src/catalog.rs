//! 单位目录。
//!
//! 每个单位保存到基准单位的线性关系：`base = value * factor + offset`。

use domain::UnitCategory;

/// 单位定义。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    pub symbol: &'static str,
    pub phrase_id: i32,
    pub factor: f64,
    pub offset: f64,
}

impl UnitDef {
    const fn linear(symbol: &'static str, phrase_id: i32, factor: f64) -> Self {
        Self {
            symbol,
            phrase_id,
            factor,
            offset: 0.0,
        }
    }

    /// 基准单位值 → 本单位值。
    pub fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.factor
    }

    /// 本单位值 → 基准单位值。
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.factor + self.offset
    }
}

const PRESSURE: &[UnitDef] = &[
    UnitDef::linear("psi", 5001, 1.0),
    UnitDef::linear("kPa", 5002, 0.145_037_737_730_209_23),
    UnitDef::linear("bar", 5003, 14.503_773_773_020_923),
    UnitDef::linear("MPa", 5004, 145.037_737_730_209_23),
];

const FLUID_RATES: &[UnitDef] = &[
    UnitDef::linear("bbl/d", 5011, 1.0),
    UnitDef::linear("m3/d", 5012, 6.289_810_770_432_105),
];

const GAS_RATES: &[UnitDef] = &[
    UnitDef::linear("Mscf/d", 5021, 1.0),
    UnitDef::linear("m3/d", 5022, 0.035_314_666_7),
    UnitDef::linear("e3m3/d", 5023, 35.314_666_7),
    UnitDef::linear("MMscf/d", 5024, 1000.0),
];

const LENGTH: &[UnitDef] = &[
    UnitDef::linear("ft", 5031, 1.0),
    UnitDef::linear("m", 5032, 3.280_839_895_013_123),
];

const SHORT_LENGTH: &[UnitDef] = &[
    UnitDef::linear("in", 5041, 1.0),
    UnitDef::linear("mm", 5042, 0.039_370_078_740_157_48),
    UnitDef::linear("cm", 5043, 0.393_700_787_401_574_8),
];

const TEMPERATURE: &[UnitDef] = &[
    UnitDef::linear("°F", 5051, 1.0),
    UnitDef {
        symbol: "°C",
        phrase_id: 5052,
        factor: 1.8,
        offset: 32.0,
    },
];

const WEIGHT: &[UnitDef] = &[
    UnitDef::linear("lb", 5061, 1.0),
    UnitDef::linear("kg", 5062, 2.204_622_621_848_775_7),
    UnitDef::linear("klb", 5063, 1000.0),
];

const POWER: &[UnitDef] = &[
    UnitDef::linear("hp", 5071, 1.0),
    UnitDef::linear("kW", 5072, 1.341_022_089_595_027_8),
];

const FLUID_VOLUME: &[UnitDef] = &[
    UnitDef::linear("bbl", 5081, 1.0),
    UnitDef::linear("m3", 5082, 6.289_810_770_432_105),
];

const GAS_VOLUME: &[UnitDef] = &[
    UnitDef::linear("Mscf", 5091, 1.0),
    UnitDef::linear("m3", 5092, 0.035_314_666_7),
    UnitDef::linear("e3m3", 5093, 35.314_666_7),
];

/// 类别下的全部单位，首项为基准单位。
pub fn units_for(category: UnitCategory) -> &'static [UnitDef] {
    match category {
        UnitCategory::Pressure => PRESSURE,
        UnitCategory::FluidRate => FLUID_RATES,
        UnitCategory::GasRate => GAS_RATES,
        UnitCategory::Length => LENGTH,
        UnitCategory::ShortLength => SHORT_LENGTH,
        UnitCategory::Temperature => TEMPERATURE,
        UnitCategory::Weight => WEIGHT,
        UnitCategory::Power => POWER,
        UnitCategory::FluidVolume => FLUID_VOLUME,
        UnitCategory::GasVolume => GAS_VOLUME,
    }
}

pub fn base_unit(category: UnitCategory) -> &'static UnitDef {
    &units_for(category)[0]
}

/// 按符号查找单位（区分大小写）。
pub fn find_unit(category: UnitCategory, symbol: &str) -> Option<&'static UnitDef> {
    units_for(category)
        .iter()
        .find(|unit| unit.symbol == symbol)
}

/// 目录中全部单位标签短语 ID。
pub fn all_phrase_ids() -> Vec<i32> {
    UnitCategory::ALL
        .into_iter()
        .flat_map(|category| units_for(category).iter().map(|unit| unit.phrase_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_starts_with_identity_unit() {
        for category in UnitCategory::ALL {
            let base = base_unit(category);
            assert_eq!(base.factor, 1.0);
            assert_eq!(base.offset, 0.0);
        }
    }

    #[test]
    fn temperature_uses_offset() {
        let celsius = find_unit(UnitCategory::Temperature, "°C").expect("unit");
        assert!((celsius.from_base(212.0) - 100.0).abs() < 1e-9);
        assert!((celsius.to_base(0.0) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(find_unit(UnitCategory::Pressure, "kPa").is_some());
        assert!(find_unit(UnitCategory::Pressure, "kpa").is_none());
    }
}
