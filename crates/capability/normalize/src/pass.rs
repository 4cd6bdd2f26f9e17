//! 请求级单位换算过程。

use crate::catalog::{UnitDef, base_unit, find_unit};
use crate::rounding::{DEFAULT_SIGNIFICANT_DIGITS, round_half_away_from_zero, round_significant};
use crate::derive_scale;
use api_contract::SeriesItem;
use apex_storage::{CoreAssetRecord, ParameterStandardRecord, RegisterRecord};
use domain::{ApplicationDetail, Measured, UnitCategory};
use std::collections::{BTreeMap, HashMap};

/// 用户单位偏好：类别名 → 单位符号（键区分大小写）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitPreferences {
    entries: BTreeMap<String, String>,
}

impl UnitPreferences {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// 用户偏好为空时整体使用系统默认值。
    pub fn resolve(user: HashMap<String, String>, system: HashMap<String, String>) -> Self {
        if user.is_empty() {
            Self::new(system.into_iter().collect())
        } else {
            Self::new(user.into_iter().collect())
        }
    }

    pub fn unit_for(&self, category: UnitCategory) -> Option<&str> {
        self.entries.get(category.name()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 表格序列的一项原始数据。
#[derive(Debug, Clone)]
pub struct SeriesSource {
    pub key: i32,
    pub description: String,
    pub raw_value: Option<String>,
    pub category: Option<UnitCategory>,
}

impl From<RegisterRecord> for SeriesSource {
    fn from(record: RegisterRecord) -> Self {
        Self {
            key: record.address,
            description: record.description,
            raw_value: record.raw_value,
            category: record.category,
        }
    }
}

impl From<ParameterStandardRecord> for SeriesSource {
    fn from(record: ParameterStandardRecord) -> Self {
        Self {
            key: record.param_standard_type,
            description: record.description,
            raw_value: record.raw_value,
            category: record.category,
        }
    }
}

fn target_unit(category: UnitCategory, prefs: &UnitPreferences) -> &'static UnitDef {
    prefs
        .unit_for(category)
        .and_then(|symbol| find_unit(category, symbol))
        .unwrap_or_else(|| base_unit(category))
}

fn unit_label(unit: &UnitDef, phrases: &HashMap<i32, String>) -> String {
    phrases
        .get(&unit.phrase_id)
        .cloned()
        .unwrap_or_else(|| unit.symbol.to_string())
}

/// 单值换算。
///
/// `scale` 给定时按小数位取整，否则按有效数字取整。
/// 原值缺失时数值与单位标签同时置空。
pub fn convert(
    amount: Option<f64>,
    category: UnitCategory,
    phrases: &HashMap<i32, String>,
    prefs: &UnitPreferences,
    scale: Option<u32>,
    significant_digits: u32,
) -> Measured {
    let Some(amount) = amount else {
        return Measured::empty(category);
    };
    let unit = target_unit(category, prefs);
    let converted = unit.from_base(amount);
    let value = match scale {
        Some(scale) => round_half_away_from_zero(converted, scale as i32),
        None => round_significant(converted, significant_digits),
    };
    Measured {
        value: Some(value),
        category,
        unit: Some(unit_label(unit, phrases)),
    }
}

/// 一次请求内的换算上下文。
#[derive(Debug, Clone)]
pub struct ConversionPass {
    phrases: HashMap<i32, String>,
    prefs: UnitPreferences,
    significant_digits: u32,
}

impl ConversionPass {
    pub fn new(
        phrases: HashMap<i32, String>,
        prefs: UnitPreferences,
        significant_digits: u32,
    ) -> Self {
        Self {
            phrases,
            prefs,
            significant_digits,
        }
    }

    /// 无偏好、无短语的基准单位换算。
    pub fn base_units() -> Self {
        Self::new(
            HashMap::new(),
            UnitPreferences::default(),
            DEFAULT_SIGNIFICANT_DIGITS,
        )
    }

    pub fn phrases(&self) -> &HashMap<i32, String> {
        &self.phrases
    }

    pub fn significant_digits(&self) -> u32 {
        self.significant_digits
    }

    pub fn convert(&self, amount: Option<f64>, category: UnitCategory) -> Measured {
        convert(
            amount,
            category,
            &self.phrases,
            &self.prefs,
            None,
            self.significant_digits,
        )
    }

    /// 原地覆盖资产快照中的全部测量值。
    pub fn apply_to_asset(&self, record: &mut CoreAssetRecord) {
        for field in record.measured_fields_mut() {
            *field = self.convert(field.value, field.category);
        }
    }

    /// 原地覆盖分支明细中的测量值（寄存器解码后的压力、流量、体积等）。
    pub fn apply_to_detail(&self, detail: &mut ApplicationDetail) {
        for field in detail.measured_fields_mut() {
            *field = self.convert(field.value, field.category);
        }
    }

    /// 表格序列换算：每项按原值字符串推导小数位。
    pub fn convert_series(&self, items: Vec<SeriesSource>) -> Vec<SeriesItem> {
        items
            .into_iter()
            .map(|item| self.convert_series_item(item))
            .collect()
    }

    fn convert_series_item(&self, item: SeriesSource) -> SeriesItem {
        let SeriesSource {
            key,
            description,
            raw_value,
            category,
        } = item;
        let Some(raw) = raw_value else {
            return SeriesItem {
                key,
                description,
                value: None,
                unit: None,
            };
        };
        let Ok(amount) = raw.trim().parse::<f64>() else {
            return SeriesItem {
                key,
                description,
                value: Some(raw),
                unit: None,
            };
        };
        let scale = derive_scale(&raw);
        match category {
            Some(category) => {
                let measured = convert(
                    Some(amount),
                    category,
                    &self.phrases,
                    &self.prefs,
                    Some(scale),
                    self.significant_digits,
                );
                SeriesItem {
                    key,
                    description,
                    value: measured.value.map(|value| format_scaled(value, scale)),
                    unit: measured.unit,
                }
            }
            None => SeriesItem {
                key,
                description,
                value: Some(format_scaled(
                    round_half_away_from_zero(amount, scale as i32),
                    scale,
                )),
                unit: None,
            },
        }
    }
}

fn format_scaled(value: f64, scale: u32) -> String {
    format!("{:.*}", scale as usize, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(pairs: &[(&str, &str)]) -> UnitPreferences {
        UnitPreferences::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn missing_amount_clears_value_and_unit() {
        let measured = convert(
            None,
            UnitCategory::Pressure,
            &HashMap::new(),
            &prefs(&[("pressure", "kPa")]),
            None,
            3,
        );
        assert!(measured.value.is_none());
        assert!(measured.unit.is_none());
    }

    #[test]
    fn converts_to_preferred_unit_with_phrase_label() {
        let mut phrases = HashMap::new();
        phrases.insert(5002, "kilopascal".to_string());
        let measured = convert(
            Some(100.0),
            UnitCategory::Pressure,
            &phrases,
            &prefs(&[("pressure", "kPa")]),
            None,
            3,
        );
        assert_eq!(measured.value, Some(689.0));
        assert_eq!(measured.unit.as_deref(), Some("kilopascal"));
    }

    #[test]
    fn unknown_preference_falls_back_to_base_unit() {
        let measured = convert(
            Some(12.34),
            UnitCategory::Length,
            &HashMap::new(),
            &prefs(&[("length", "furlong")]),
            None,
            3,
        );
        assert_eq!(measured.value, Some(12.3));
        assert_eq!(measured.unit.as_deref(), Some("ft"));
    }

    #[test]
    fn empty_user_preferences_use_system_defaults() {
        let mut system = HashMap::new();
        system.insert("pressure".to_string(), "bar".to_string());
        let resolved = UnitPreferences::resolve(HashMap::new(), system.clone());
        assert_eq!(resolved.unit_for(UnitCategory::Pressure), Some("bar"));

        let mut user = HashMap::new();
        user.insert("length".to_string(), "m".to_string());
        let resolved = UnitPreferences::resolve(user, system);
        assert_eq!(resolved.unit_for(UnitCategory::Pressure), None);
        assert_eq!(resolved.unit_for(UnitCategory::Length), Some("m"));
    }
}
