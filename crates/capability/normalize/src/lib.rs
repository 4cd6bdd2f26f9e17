//! 单位换算与数值取整。
//!
//! - `catalog`：各计量类别的单位表（基准单位 = 存储单位）
//! - `rounding`：有效数字与小数位取整（四舍五入远离零）
//! - `pass`：请求级换算过程 `ConversionPass`
//! - `provider`：从 storage 组装换算上下文

pub mod catalog;
pub mod pass;
pub mod provider;
pub mod rounding;

pub use catalog::{UnitDef, all_phrase_ids, base_unit, find_unit, units_for};
pub use pass::{ConversionPass, SeriesSource, UnitPreferences, convert};
pub use provider::{ConversionProvider, SIGNIFICANT_DIGITS_PARAMETER, StorageConversionProvider};
pub use rounding::{
    DEFAULT_SIGNIFICANT_DIGITS, MAX_SCALE, derive_scale, round_half_away_from_zero,
    round_significant,
};

/// 换算上下文加载错误。
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("storage error: {0}")]
    Storage(String),
}
