use apex_status::merge_alarms;
use apex_storage::{CameraAlarmRecord, ConfigAlarmRecord, FacilityAlarmRecord, HostAlarmRecord};
use domain::AlarmSource;

fn host(description: &str, priority: i32, alarm_state: i32) -> HostAlarmRecord {
    HostAlarmRecord {
        description: description.to_string(),
        priority,
        alarm_state,
    }
}

fn config(
    description: &str,
    priority: i32,
    bit: i32,
    normal_state: i32,
    raw: &str,
) -> ConfigAlarmRecord {
    ConfigAlarmRecord {
        address: 30001,
        bit,
        description: description.to_string(),
        priority,
        normal_state,
        current_value: Some(raw.to_string()),
    }
}

#[test]
fn config_and_host_alarms_interleave_by_priority() {
    let merged = merge_alarms(
        vec![
            config("Door Open", 20, 0, 0, "1"),
            config("Low Battery", 90, 1, 0, "1"),
            config("Power Fail", 5, 3, 1, "0"),
            config("Bad Value", 99, 2, 0, "abc"),
        ],
        vec![
            host("Casing", 20, 3),
            host("Tubing", 50, 4),
            host("Flow", 5, 101),
            host("Line", 70, 200),
        ],
        vec![],
        vec![],
    );

    let order: Vec<(&str, i32, AlarmSource)> = merged
        .iter()
        .map(|alarm| (alarm.description.as_str(), alarm.priority, alarm.source))
        .collect();
    assert_eq!(
        order,
        [
            ("Tubing-HiHi", 50, AlarmSource::Host),
            ("Door Open", 20, AlarmSource::Config),
            ("Casing-Hi", 20, AlarmSource::Host),
            ("Power Fail", 5, AlarmSource::Config),
            ("Flow-Lo (Acknowledged)", 5, AlarmSource::Host),
        ]
    );
}

#[test]
fn cleared_host_alarm_is_dropped() {
    let merged = merge_alarms(vec![], vec![host("Casing", 10, 100)], vec![], vec![]);
    assert!(merged.is_empty());
}

#[test]
fn acknowledged_without_mapped_state() {
    let merged = merge_alarms(vec![], vec![host("Casing", 10, 151)], vec![], vec![]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].description, "Casing (Acknowledged)");
}

#[test]
fn facility_and_camera_follow_sorted_prefix() {
    let merged = merge_alarms(
        vec![],
        vec![host("A", 1, 1), host("B", 7, 4), host("C", 7, 2)],
        vec![
            FacilityAlarmRecord {
                description: "F-low".to_string(),
                priority: 1,
            },
            FacilityAlarmRecord {
                description: "F-high".to_string(),
                priority: 100,
            },
        ],
        vec![CameraAlarmRecord {
            description: "Cam".to_string(),
            priority: 50,
        }],
    );

    let order: Vec<(&str, AlarmSource)> = merged
        .iter()
        .map(|alarm| (alarm.description.as_str(), alarm.source))
        .collect();
    assert_eq!(
        order,
        [
            ("B-HiHi", AlarmSource::Host),
            ("C-LoLo", AlarmSource::Host),
            ("A-Lo", AlarmSource::Host),
            ("F-low", AlarmSource::Facility),
            ("F-high", AlarmSource::Facility),
            ("Cam", AlarmSource::Camera),
        ]
    );
}
