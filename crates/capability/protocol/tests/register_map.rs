use apex_protocol::{ControllerFamily, TotalFlowTag, decode_total_flow};
use domain::{ApplicationDetail, DiagramType, UnitCategory};
use std::collections::HashMap;

fn snapshot(pairs: &[(i32, f64)]) -> HashMap<i32, f64> {
    pairs.iter().copied().collect()
}

#[test]
fn family_follows_diagram() {
    assert_eq!(
        ControllerFamily::for_diagram(DiagramType::Pid),
        Some(ControllerFamily::PidController)
    );
    assert_eq!(
        ControllerFamily::for_diagram(DiagramType::PcsFergusonPlungerLift),
        Some(ControllerFamily::PcsFergusonPlungerLift)
    );
    assert_eq!(ControllerFamily::for_diagram(DiagramType::RodLift), None);
    assert_eq!(
        ControllerFamily::for_diagram(DiagramType::TotalFlowPlungerLift),
        None
    );
}

#[test]
fn pid_values_are_rounded_and_absent_addresses_ignored() {
    let values = snapshot(&[(40101, 1.0), (40102, 123.456), (40104, 0.045678), (49999, 7.0)]);
    let detail = ControllerFamily::PidController.decode(&values, 3, &HashMap::new());
    let ApplicationDetail::Pid(data) = detail else {
        panic!("expected pid detail");
    };
    assert_eq!(data.current_mode, Some(1.0));
    assert_eq!(data.control_mode_text.as_deref(), Some("Automatic"));
    assert_eq!(data.setpoint, Some(123.0));
    assert_eq!(data.output_percent, Some(0.0457));
    assert!(data.process_variable.is_none());
}

#[test]
fn current_mode_address_differs_per_family() {
    let values = snapshot(&[(40101, 0.0), (40301, 2.0), (30001, 3.0)]);
    let mut phrases = HashMap::new();
    phrases.insert(4103, "Cascada".to_string());

    let ApplicationDetail::PlungerLift(plunger) =
        ControllerFamily::PlungerLift.decode(&values, 3, &phrases)
    else {
        panic!("expected plunger lift detail");
    };
    assert_eq!(plunger.current_mode, Some(2.0));
    assert_eq!(plunger.control_mode_text.as_deref(), Some("Cascada"));

    let ApplicationDetail::PlungerLift(pcs) =
        ControllerFamily::PcsFergusonPlungerLift.decode(&values, 3, &phrases)
    else {
        panic!("expected plunger lift detail");
    };
    assert_eq!(pcs.current_mode, Some(3.0));
    assert_eq!(pcs.control_mode_text.as_deref(), Some("Override"));
}

#[test]
fn duplicate_field_last_present_entry_wins() {
    let both = snapshot(&[(40205, 40.0), (40215, 55.0)]);
    let ApplicationDetail::ValveControl(data) =
        ControllerFamily::ValveControl.decode(&both, 3, &HashMap::new())
    else {
        panic!("expected valve control detail");
    };
    assert_eq!(data.valve_position, Some(55.0));

    let first_only = snapshot(&[(40205, 40.0)]);
    let ApplicationDetail::ValveControl(data) =
        ControllerFamily::ValveControl.decode(&first_only, 3, &HashMap::new())
    else {
        panic!("expected valve control detail");
    };
    assert_eq!(data.valve_position, Some(40.0));
}

#[test]
fn gas_flow_meter_has_no_mode() {
    let values = snapshot(&[(40401, 512.345), (40407, 12.61)]);
    let ApplicationDetail::GasFlowMeter(data) =
        ControllerFamily::GasFlowMeter.decode(&values, 3, &HashMap::new())
    else {
        panic!("expected gas flow meter detail");
    };
    // 测量值保留基准单位原值，标签由单位换算填写。
    assert_eq!(data.flow_rate.value, Some(512.345));
    assert!(data.flow_rate.unit.is_none());
    assert_eq!(data.flow_rate.category, UnitCategory::GasRate);
    assert_eq!(data.battery_voltage, Some(12.6));
    assert!(data.temperature.value.is_none());
}

#[test]
fn plunger_lift_pressures_carry_pressure_category() {
    let values = snapshot(&[(40309, 150.25), (40310, 95.0)]);
    let ApplicationDetail::PlungerLift(data) =
        ControllerFamily::PlungerLift.decode(&values, 3, &HashMap::new())
    else {
        panic!("expected plunger lift detail");
    };
    assert_eq!(data.casing_pressure.value, Some(150.25));
    assert_eq!(data.casing_pressure.category, UnitCategory::Pressure);
    assert_eq!(data.tubing_pressure.value, Some(95.0));
    assert!(data.line_pressure.value.is_none());
}

#[test]
fn total_flow_keeps_deployed_volume_binding() {
    let mut values = HashMap::new();
    values.insert(TotalFlowTag::PlungerState.address().to_string(), " Arrived ".to_string());
    values.insert(TotalFlowTag::ControllerMode.address().to_string(), "1".to_string());
    values.insert(TotalFlowTag::GasVolumeToday.address().to_string(), "10".to_string());
    values.insert(TotalFlowTag::GasVolumeYesterday.address().to_string(), "20".to_string());
    values.insert(TotalFlowTag::GasVolumeLifetime.address().to_string(), "30".to_string());
    values.insert(TotalFlowTag::CasingPressure.address().to_string(), "n/a".to_string());

    let data = decode_total_flow(&values, 3, &HashMap::new());
    assert_eq!(data.plunger_state_text.as_deref(), Some("Arrived"));
    assert_eq!(data.control_mode_text.as_deref(), Some("Automatic"));
    assert_eq!(data.efm_yesterday_volume.value, Some(10.0));
    assert_eq!(data.efm_lifetime_accumulation.value, Some(20.0));
    assert_eq!(data.efm_today_volume.value, Some(30.0));
    assert_eq!(data.efm_today_volume.category, UnitCategory::GasVolume);
    assert!(data.casing_pressure.value.is_none());
}

#[test]
fn total_flow_addresses_use_tfreg_space() {
    let addresses = TotalFlowTag::addresses();
    assert_eq!(addresses.len(), TotalFlowTag::ALL.len());
    assert!(addresses.iter().all(|address| address.starts_with("TfReg:")));
}
