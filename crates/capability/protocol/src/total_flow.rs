//! TotalFlow 柱塞举升：字符串地址 (`TfReg:`) 的寄存器变体

use apex_normalize::round_significant;
use domain::{ControlMode, TotalFlowPlungerLiftData};
use std::collections::HashMap;

/// TotalFlow 控制器的符号标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TotalFlowTag {
    PlungerState,
    ControllerMode,
    ArrivalTime,
    AfterflowTime,
    CloseTime,
    CasingPressure,
    TubingPressure,
    LinePressure,
    GasFlowRate,
    GasVolumeToday,
    GasVolumeYesterday,
    GasVolumeLifetime,
}

/// TotalFlow 明细目标字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TotalFlowField {
    PlungerStateText,
    CurrentMode,
    ArrivalTimeSeconds,
    AfterflowMinutes,
    CloseTimeMinutes,
    CasingPressure,
    TubingPressure,
    LinePressure,
    GasFlowRate,
    EfmTodayVolume,
    EfmYesterdayVolume,
    EfmLifetimeAccumulation,
}

impl TotalFlowTag {
    pub const ALL: [TotalFlowTag; 12] = [
        TotalFlowTag::PlungerState,
        TotalFlowTag::ControllerMode,
        TotalFlowTag::ArrivalTime,
        TotalFlowTag::AfterflowTime,
        TotalFlowTag::CloseTime,
        TotalFlowTag::CasingPressure,
        TotalFlowTag::TubingPressure,
        TotalFlowTag::LinePressure,
        TotalFlowTag::GasFlowRate,
        TotalFlowTag::GasVolumeToday,
        TotalFlowTag::GasVolumeYesterday,
        TotalFlowTag::GasVolumeLifetime,
    ];

    pub fn address(self) -> &'static str {
        match self {
            Self::PlungerState => "TfReg:11.0.3",
            Self::ControllerMode => "TfReg:11.0.0",
            Self::ArrivalTime => "TfReg:11.2.5",
            Self::AfterflowTime => "TfReg:11.2.6",
            Self::CloseTime => "TfReg:11.2.7",
            Self::CasingPressure => "TfReg:7.3.0",
            Self::TubingPressure => "TfReg:7.3.1",
            Self::LinePressure => "TfReg:7.3.2",
            Self::GasFlowRate => "TfReg:11.7.0",
            Self::GasVolumeToday => "TfReg:11.7.1",
            Self::GasVolumeYesterday => "TfReg:11.7.2",
            Self::GasVolumeLifetime => "TfReg:11.7.3",
        }
    }

    /// 已部署的字段绑定。
    ///
    /// 三个 EFM 体积标签与字段名并不对应（如昨日气量写入累计量），
    /// 现场画面依赖该绑定，保持原样。
    pub fn target(self) -> TotalFlowField {
        match self {
            Self::PlungerState => TotalFlowField::PlungerStateText,
            Self::ControllerMode => TotalFlowField::CurrentMode,
            Self::ArrivalTime => TotalFlowField::ArrivalTimeSeconds,
            Self::AfterflowTime => TotalFlowField::AfterflowMinutes,
            Self::CloseTime => TotalFlowField::CloseTimeMinutes,
            Self::CasingPressure => TotalFlowField::CasingPressure,
            Self::TubingPressure => TotalFlowField::TubingPressure,
            Self::LinePressure => TotalFlowField::LinePressure,
            Self::GasFlowRate => TotalFlowField::GasFlowRate,
            Self::GasVolumeToday => TotalFlowField::EfmYesterdayVolume,
            Self::GasVolumeYesterday => TotalFlowField::EfmLifetimeAccumulation,
            Self::GasVolumeLifetime => TotalFlowField::EfmTodayVolume,
        }
    }

    /// 需要请求的全部字符串地址
    pub fn addresses() -> Vec<String> {
        Self::ALL
            .iter()
            .map(|tag| tag.address().to_string())
            .collect()
    }
}

/// 解码 TotalFlow 字符串快照；数值无法解析的字段留空
pub fn decode_total_flow(
    snapshot: &HashMap<String, String>,
    significant_digits: u32,
    phrases: &HashMap<i32, String>,
) -> TotalFlowPlungerLiftData {
    let mut data = TotalFlowPlungerLiftData::default();
    for tag in TotalFlowTag::ALL {
        let Some(raw) = snapshot.get(tag.address()) else {
            continue;
        };
        let field = tag.target();
        if field == TotalFlowField::PlungerStateText {
            let text = raw.trim();
            if !text.is_empty() {
                data.plunger_state_text = Some(text.to_string());
            }
            continue;
        }
        let Ok(value) = raw.trim().parse::<f64>() else {
            tracing::debug!(
                target: "apex.protocol",
                address = tag.address(),
                raw = %raw,
                "total_flow_value_unparsable"
            );
            continue;
        };
        let scalar = Some(round_significant(value, significant_digits));
        // 测量值字段保留基准单位原值，由单位换算统一取整。
        let raw = Some(value);
        match field {
            TotalFlowField::PlungerStateText => {}
            TotalFlowField::CurrentMode => data.current_mode = scalar,
            TotalFlowField::ArrivalTimeSeconds => data.arrival_time_seconds = scalar,
            TotalFlowField::AfterflowMinutes => data.afterflow_minutes = scalar,
            TotalFlowField::CloseTimeMinutes => data.close_time_minutes = scalar,
            TotalFlowField::CasingPressure => data.casing_pressure.value = raw,
            TotalFlowField::TubingPressure => data.tubing_pressure.value = raw,
            TotalFlowField::LinePressure => data.line_pressure.value = raw,
            TotalFlowField::GasFlowRate => data.gas_flow_rate.value = raw,
            TotalFlowField::EfmTodayVolume => data.efm_today_volume.value = raw,
            TotalFlowField::EfmYesterdayVolume => data.efm_yesterday_volume.value = raw,
            TotalFlowField::EfmLifetimeAccumulation => {
                data.efm_lifetime_accumulation.value = raw
            }
        }
    }
    data.control_mode_text = data
        .current_mode
        .map(|mode| ControlMode::from_value(mode).display_text(phrases));
    data
}
