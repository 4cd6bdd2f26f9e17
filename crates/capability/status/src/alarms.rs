//! 告警合并。
//!
//! 配置告警与主机告警按优先级降序（稳定）排序；站场告警与摄像头告警
//! 按原顺序追加在排序结果之后，不参与排序。

use apex_storage::{
    CameraAlarmRecord, ConfigAlarmRecord, ExceptionRecord, FacilityAlarmRecord, HostAlarmRecord,
};
use domain::{AlarmEntry, AlarmSource, ExceptionEntry};

const ACKNOWLEDGED_SUFFIX: &str = " (Acknowledged)";

/// 主机告警状态码（`state % 100`）对应的后缀文本。
const HOST_ALARM_STATES: [(i32, &str); 10] = [
    (0, "Clear"),
    (1, "Lo"),
    (2, "LoLo"),
    (3, "Hi"),
    (4, "HiHi"),
    (5, "RateOfChange"),
    (6, "Deviation"),
    (7, "Bad"),
    (9, "MaxSpan"),
    (10, "MinSpan"),
];

/// 配置告警是否处于告警态。
///
/// 位状态与 `normal_state == 0` 一致时保留；原值无法解析或位号越界返回 None。
pub fn config_alarm_active(record: &ConfigAlarmRecord) -> Option<bool> {
    let raw = record.current_value.as_deref()?.trim();
    let value = parse_raw_bits(raw)?;
    if !(0..=63).contains(&record.bit) {
        return None;
    }
    let bit_set = (value >> record.bit) & 1 == 1;
    Some(bit_set == (record.normal_state == 0))
}

// 扫描原值可能带小数部分（如 "5.0"），整数部分参与位判断。
fn parse_raw_bits(raw: &str) -> Option<u64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value as u64);
    }
    let value = raw.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64 as u64)
}

/// 主机告警后缀；Clear 返回 None（条目应被丢弃）。
///
/// 未登记的状态码后缀为空；`101..200` 追加 `" (Acknowledged)"`。
pub fn host_alarm_suffix(alarm_state: i32) -> Option<String> {
    let code = alarm_state % 100;
    if code == 0 {
        return None;
    }
    let mut suffix = HOST_ALARM_STATES
        .iter()
        .find(|(state, _)| *state == code)
        .map(|(_, text)| format!("-{text}"))
        .unwrap_or_default();
    if (101..200).contains(&alarm_state) {
        suffix.push_str(ACKNOWLEDGED_SUFFIX);
    }
    Some(suffix)
}

pub fn merge_alarms(
    config: Vec<ConfigAlarmRecord>,
    host: Vec<HostAlarmRecord>,
    facility: Vec<FacilityAlarmRecord>,
    camera: Vec<CameraAlarmRecord>,
) -> Vec<AlarmEntry> {
    let mut sorted = Vec::with_capacity(config.len() + host.len());

    for record in config {
        match config_alarm_active(&record) {
            Some(true) => sorted.push(AlarmEntry {
                description: record.description,
                priority: record.priority,
                source: AlarmSource::Config,
            }),
            Some(false) => {}
            None => tracing::debug!(
                target: "apex.status",
                address = record.address,
                bit = record.bit,
                raw = ?record.current_value,
                "config_alarm_skipped"
            ),
        }
    }

    for record in host {
        let Some(suffix) = host_alarm_suffix(record.alarm_state) else {
            continue;
        };
        sorted.push(AlarmEntry {
            description: format!("{}{}", record.description, suffix),
            priority: record.priority,
            source: AlarmSource::Host,
        });
    }

    sorted.sort_by(|a, b| b.priority.cmp(&a.priority));

    sorted.extend(facility.into_iter().map(|record| AlarmEntry {
        description: record.description,
        priority: record.priority,
        source: AlarmSource::Facility,
    }));
    sorted.extend(camera.into_iter().map(|record| AlarmEntry {
        description: record.description,
        priority: record.priority,
        source: AlarmSource::Camera,
    }));
    sorted
}

/// 异常条件按优先级降序。
pub fn sort_exceptions(records: Vec<ExceptionRecord>) -> Vec<ExceptionEntry> {
    let mut entries: Vec<ExceptionEntry> = records
        .into_iter()
        .map(|record| ExceptionEntry {
            description: record.description,
            priority: record.priority,
        })
        .collect();
    entries.sort_by(|a, b| b.priority.cmp(&a.priority));
    entries
}
