//! 取整规则：四舍五入远离零（非银行家舍入）。

/// 有效数字默认值（系统参数 `SignificantDigits` 可覆盖）。
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 3;
/// 表格序列小数位上限。
pub const MAX_SCALE: u32 = 15;

// 二进制浮点无法精确表示的中点（如 2.675）按中点处理：
// 容差按缩放后数值的 ULP 计，并设绝对上限。
const MIDPOINT_ULPS: f64 = 4.0;
const MAX_MIDPOINT_WINDOW: f64 = 1e-6;
// 2^52 及以上的 f64 没有小数部分。
const INTEGRAL_THRESHOLD: f64 = 4_503_599_627_370_496.0;

/// 按小数位取整，中点远离零。
pub fn round_half_away_from_zero(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // 负小数位时按整数倍缩放，避免 10^-n 的表示误差。
    let factor = 10f64.powi(decimals.abs());
    let scaled = if decimals >= 0 {
        value * factor
    } else {
        value / factor
    };
    if !scaled.is_finite() {
        return value;
    }
    let magnitude = scaled.abs();
    if magnitude >= INTEGRAL_THRESHOLD {
        return value;
    }
    let window = (MIDPOINT_ULPS * f64::EPSILON * magnitude.max(1.0)).min(MAX_MIDPOINT_WINDOW);
    let distance = (magnitude.fract() - 0.5).abs();
    let rounded = if distance <= window {
        (magnitude.trunc() + 1.0).copysign(scaled)
    } else {
        scaled.round()
    };
    if decimals >= 0 {
        rounded / factor
    } else {
        rounded * factor
    }
}

/// 按有效数字取整。
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = digits as i32 - 1 - magnitude;
    round_half_away_from_zero(value, decimals)
}

/// 由原值字符串推导小数位数，上限 `MAX_SCALE`。
pub fn derive_scale(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let Some((_, fraction)) = trimmed.split_once('.') else {
        return 0;
    };
    let digits = fraction.chars().take_while(char::is_ascii_digit).count() as u32;
    if digits > MAX_SCALE {
        tracing::warn!(
            target: "apex.normalize",
            raw,
            digits,
            max = MAX_SCALE,
            "scale_clamped"
        );
        return MAX_SCALE;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_midpoints_away_from_zero() {
        assert_eq!(round_half_away_from_zero(2.5, 0), 3.0);
        assert_eq!(round_half_away_from_zero(-2.5, 0), -3.0);
        assert_eq!(round_half_away_from_zero(0.125, 2), 0.13);
        assert_eq!(round_half_away_from_zero(2.675, 2), 2.68);
    }

    #[test]
    fn large_scaled_values_are_not_treated_as_midpoints() {
        assert_eq!(round_half_away_from_zero(1e12, 0), 1e12);
        assert_eq!(round_half_away_from_zero(-1e12, 0), -1e12);
        assert_eq!(round_half_away_from_zero(1.5, 12), 1.5);
        assert_eq!(round_half_away_from_zero(2_251_799_813_685_248.0, 0), 2_251_799_813_685_248.0);
        assert_eq!(round_half_away_from_zero(9.007_199_254_740_992e15, 0), 9.007_199_254_740_992e15);
        assert_eq!(round_half_away_from_zero(1_000_000_000_000.5, 0), 1_000_000_000_001.0);
    }

    #[test]
    fn significant_digits() {
        assert_eq!(round_significant(123.456, 3), 123.0);
        assert_eq!(round_significant(0.0012345, 3), 0.00123);
        assert_eq!(round_significant(98765.0, 2), 99000.0);
        assert_eq!(round_significant(-1.235, 3), -1.24);
        assert_eq!(round_significant(0.0, 3), 0.0);
    }

    #[test]
    fn scale_from_raw_text() {
        assert_eq!(derive_scale("12"), 0);
        assert_eq!(derive_scale("12.50"), 2);
        assert_eq!(derive_scale(" 3.14159 "), 5);
        assert_eq!(derive_scale("0.12345678901234567890"), MAX_SCALE);
    }
}
