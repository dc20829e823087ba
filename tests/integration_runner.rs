//! End-to-end tests for the headless scenario runner and CSV export.

use ev_sim::config::ScenarioConfig;
use ev_sim::io::export::write_csv;
use ev_sim::runner::run_scenario;

#[test]
fn every_preset_runs_clean_to_completion() {
    for name in ScenarioConfig::PRESETS {
        let cfg = ScenarioConfig::from_preset(name).unwrap();
        let out = run_scenario(&cfg);
        assert_eq!(out.records.len(), cfg.run.ticks, "preset {name}");
        assert!(!out.final_state.is_running);
        for r in &out.records {
            assert!((0.0..=180.0).contains(&r.speed_kmh), "preset {name}");
            assert!((0.0..=100.0).contains(&r.soc_pct), "preset {name}");
            assert!((10.0..=70.0).contains(&r.battery_temp_c), "preset {name}");
        }
    }
}

#[test]
fn summary_aggregates_match_the_records() {
    let out = run_scenario(&ScenarioConfig::baseline());
    let top = out
        .records
        .iter()
        .map(|r| r.speed_kmh)
        .fold(0.0_f64, f64::max);
    let min_soc = out
        .records
        .iter()
        .map(|r| r.soc_pct)
        .fold(100.0_f64, f64::min);
    let last = out.records.last().unwrap();

    assert_eq!(out.summary.top_speed_kmh, top);
    assert_eq!(out.summary.min_soc_pct, min_soc);
    assert_eq!(out.summary.distance_km, last.distance_km);
    assert_eq!(out.summary.energy_consumed_kwh, last.energy_kwh);
    assert_eq!(out.summary.duration_s, last.time_s);
    assert_eq!(
        out.summary.final_efficiency_wh_per_km,
        last.efficiency_wh_per_km
    );
}

#[test]
fn pulse_cycle_brakes_between_phases() {
    let cfg = ScenarioConfig::eco_commute();
    let out = run_scenario(&cfg);
    let phase = cfg.cycle.phase_ticks;

    // Commanded acceleration flips sign at every phase boundary.
    assert!(out.records[phase - 1].accel_ms2 > 0.0);
    assert!(out.records[phase].accel_ms2 < 0.0);
    assert!(out.records[2 * phase].accel_ms2 > 0.0);

    // Braking phases actually shed speed.
    let peak = out.records[phase - 1].speed_kmh;
    let after_brake = out.records[2 * phase - 1].speed_kmh;
    assert!(after_brake < peak);
}

#[test]
fn cruise_cycle_coasts_after_the_lead_in() {
    let cfg = ScenarioConfig::sport_sprint();
    let out = run_scenario(&cfg);
    let lead_in = cfg.cycle.phase_ticks;

    assert!(out.records[lead_in - 1].accel_ms2 > 0.0);
    for r in &out.records[lead_in..] {
        assert_eq!(r.accel_ms2, 0.0);
    }
    // Drag and rolling resistance bleed speed off during the coast.
    let peak = out.records[lead_in - 1].speed_kmh;
    let end = out.records.last().unwrap().speed_kmh;
    assert!(end < peak);
}

#[test]
fn toml_scenario_drives_a_full_run() {
    let toml = r#"
[vehicle]
battery_voltage_v = 360.0
battery_capacity_kwh = 52.0
motor_power_kw = 110.0

[drive]
mode = "eco"

[run]
ticks = 40
dt_s = 0.25

[cycle]
profile = "constant"
accel_ms2 = 0.4
"#;
    let cfg = ScenarioConfig::from_toml_str(toml).unwrap();
    assert!(cfg.validate().is_empty());
    let out = run_scenario(&cfg);
    assert_eq!(out.records.len(), 40);
    assert!((out.records.last().unwrap().time_s - 10.0).abs() < 1e-9);
    assert!(out.summary.top_speed_kmh > 0.0);
}

#[test]
fn csv_export_carries_every_record() {
    let mut cfg = ScenarioConfig::baseline();
    cfg.run.ticks = 25;
    let out = run_scenario(&cfg);

    let mut buf = Vec::new();
    write_csv(&out.records, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();

    let header = lines.next().unwrap();
    assert!(header.starts_with("tick,time_s,speed_kmh"));
    assert_eq!(lines.clone().count(), 25);

    // Spot-check the first data row against its record.
    let first = lines.next().unwrap();
    let fields: Vec<&str> = first.split(',').collect();
    assert_eq!(fields[0], "0");
    assert_eq!(fields[1], format!("{:.2}", out.records[0].time_s));
    assert_eq!(fields[2], format!("{:.4}", out.records[0].speed_kmh));
}

#[test]
fn out_of_range_scenario_degrades_to_defaults_instead_of_failing() {
    let mut cfg = ScenarioConfig::baseline();
    cfg.vehicle.motor_power_kw = 9000.0;
    cfg.run.ticks = 10;
    assert!(!cfg.validate().is_empty());
    let out = run_scenario(&cfg);
    assert_eq!(out.final_state.motor_power_kw, 150.0);
    assert_eq!(out.records.len(), 10);
}
