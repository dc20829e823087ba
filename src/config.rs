//! TOML-based scenario configuration and preset definitions.
//!
//! This layer is the validation collaborator for the engine: every scalar
//! the engine receives through [`StartParams`] is either in its documented
//! range or replaced by the documented default before the engine sees it.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sim::types::{DriveMode, StartParams};

/// Accepted pack voltage range (V) and fallback default.
pub const VOLTAGE_RANGE_V: (f64, f64) = (100.0, 1000.0);
/// Accepted pack capacity range (kWh) and fallback default.
pub const CAPACITY_RANGE_KWH: (f64, f64) = (10.0, 200.0);
/// Accepted motor power range (kW) and fallback default.
pub const POWER_RANGE_KW: (f64, f64) = (50.0, 500.0);
/// Default pack voltage (V).
pub const DEFAULT_VOLTAGE_V: f64 = 400.0;
/// Default pack capacity (kWh).
pub const DEFAULT_CAPACITY_KWH: f64 = 60.0;
/// Default motor power (kW).
pub const DEFAULT_POWER_KW: f64 = 150.0;
/// Default regen efficiency (%).
pub const DEFAULT_REGEN_PCT: f64 = 50.0;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields default to the baseline scenario. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::baseline`]
/// for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Vehicle and pack parameters.
    #[serde(default)]
    pub vehicle: VehicleConfig,
    /// Drive mode and regen settings.
    #[serde(default)]
    pub drive: DriveConfig,
    /// Headless run length and step size.
    #[serde(default)]
    pub run: RunConfig,
    /// Commanded-acceleration profile for headless runs.
    #[serde(default)]
    pub cycle: CycleConfig,
}

/// Vehicle and pack parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VehicleConfig {
    /// Nominal pack voltage (V), 100–1000.
    pub battery_voltage_v: f64,
    /// Pack capacity (kWh), 10–200.
    pub battery_capacity_kwh: f64,
    /// Rated motor power (kW), 50–500.
    pub motor_power_kw: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            battery_voltage_v: DEFAULT_VOLTAGE_V,
            battery_capacity_kwh: DEFAULT_CAPACITY_KWH,
            motor_power_kw: DEFAULT_POWER_KW,
        }
    }
}

/// Drive mode and regenerative-braking settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriveConfig {
    /// Drive mode: `"eco"`, `"normal"`, or `"sport"`.
    pub mode: String,
    /// Whether braking recovers energy into the pack.
    pub regen_braking: bool,
    /// Regen efficiency as a percentage, 0–100.
    pub regen_efficiency_pct: f64,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            mode: "normal".to_string(),
            regen_braking: true,
            regen_efficiency_pct: DEFAULT_REGEN_PCT,
        }
    }
}

/// Headless run length and step size.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Number of ticks to simulate (must be > 0).
    pub ticks: usize,
    /// Fixed step size per tick in seconds (must be finite and > 0).
    pub dt_s: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 300,
            dt_s: 0.2,
        }
    }
}

/// Commanded-acceleration profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CycleConfig {
    /// Profile: `"constant"`, `"pulse"`, or `"cruise"`.
    pub profile: String,
    /// Commanded acceleration magnitude (m/s²).
    pub accel_ms2: f64,
    /// Phase length in ticks for pulse and cruise profiles (must be > 0).
    pub phase_ticks: usize,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            profile: "constant".to_string(),
            accel_ms2: 1.0,
            phase_ticks: 50,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"vehicle.battery_voltage_v"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

/// Returns `value` when inside `[min, max]`, else the documented default.
fn sanitize(value: f64, (min, max): (f64, f64), default: f64) -> f64 {
    if value.is_nan() || value < min || value > max {
        default
    } else {
        value
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: factory vehicle, normal mode,
    /// constant 1 m/s² command.
    pub fn baseline() -> Self {
        Self {
            vehicle: VehicleConfig::default(),
            drive: DriveConfig::default(),
            run: RunConfig::default(),
            cycle: CycleConfig::default(),
        }
    }

    /// Returns the eco-commute preset: small pack, eco mode, strong regen,
    /// alternating accelerate/brake phases.
    pub fn eco_commute() -> Self {
        Self {
            vehicle: VehicleConfig {
                battery_voltage_v: 360.0,
                battery_capacity_kwh: 52.0,
                motor_power_kw: 110.0,
            },
            drive: DriveConfig {
                mode: "eco".to_string(),
                regen_braking: true,
                regen_efficiency_pct: 70.0,
            },
            run: RunConfig {
                ticks: 600,
                dt_s: 0.2,
            },
            cycle: CycleConfig {
                profile: "pulse".to_string(),
                accel_ms2: 0.5,
                phase_ticks: 60,
            },
        }
    }

    /// Returns the sport-sprint preset: 800 V pack, sport mode, regen off,
    /// full-throttle lead-in then coast.
    pub fn sport_sprint() -> Self {
        Self {
            vehicle: VehicleConfig {
                battery_voltage_v: 800.0,
                battery_capacity_kwh: 95.0,
                motor_power_kw: 350.0,
            },
            drive: DriveConfig {
                mode: "sport".to_string(),
                regen_braking: false,
                regen_efficiency_pct: 0.0,
            },
            run: RunConfig {
                ticks: 450,
                dt_s: 0.2,
            },
            cycle: CycleConfig {
                profile: "cruise".to_string(),
                accel_ms2: 1.5,
                phase_ticks: 150,
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "eco_commute", "sport_sprint"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "eco_commute" => Ok(Self::eco_commute()),
            "sport_sprint" => Ok(Self::sport_sprint()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let v = &self.vehicle;
        if !(VOLTAGE_RANGE_V.0..=VOLTAGE_RANGE_V.1).contains(&v.battery_voltage_v) {
            errors.push(ConfigError {
                field: "vehicle.battery_voltage_v".into(),
                message: "must be in [100, 1000]".into(),
            });
        }
        if !(CAPACITY_RANGE_KWH.0..=CAPACITY_RANGE_KWH.1).contains(&v.battery_capacity_kwh) {
            errors.push(ConfigError {
                field: "vehicle.battery_capacity_kwh".into(),
                message: "must be in [10, 200]".into(),
            });
        }
        if !(POWER_RANGE_KW.0..=POWER_RANGE_KW.1).contains(&v.motor_power_kw) {
            errors.push(ConfigError {
                field: "vehicle.motor_power_kw".into(),
                message: "must be in [50, 500]".into(),
            });
        }

        let d = &self.drive;
        if DriveMode::from_name(&d.mode).is_none() {
            errors.push(ConfigError {
                field: "drive.mode".into(),
                message: format!(
                    "must be one of {}, got \"{}\"",
                    DriveMode::NAMES.join(", "),
                    d.mode
                ),
            });
        }
        if !(0.0..=100.0).contains(&d.regen_efficiency_pct) {
            errors.push(ConfigError {
                field: "drive.regen_efficiency_pct".into(),
                message: "must be in [0, 100]".into(),
            });
        }

        let r = &self.run;
        if r.ticks == 0 {
            errors.push(ConfigError {
                field: "run.ticks".into(),
                message: "must be > 0".into(),
            });
        }
        if !(r.dt_s.is_finite() && r.dt_s > 0.0) {
            errors.push(ConfigError {
                field: "run.dt_s".into(),
                message: "must be finite and > 0".into(),
            });
        }

        let c = &self.cycle;
        if !["constant", "pulse", "cruise"].contains(&c.profile.as_str()) {
            errors.push(ConfigError {
                field: "cycle.profile".into(),
                message: format!(
                    "must be \"constant\", \"pulse\", or \"cruise\", got \"{}\"",
                    c.profile
                ),
            });
        }
        if !c.accel_ms2.is_finite() {
            errors.push(ConfigError {
                field: "cycle.accel_ms2".into(),
                message: "must be finite".into(),
            });
        }
        if c.phase_ticks == 0 && c.profile != "constant" {
            errors.push(ConfigError {
                field: "cycle.phase_ticks".into(),
                message: "must be > 0 for pulse and cruise profiles".into(),
            });
        }

        errors
    }

    /// Builds engine start parameters, replacing any out-of-range scalar
    /// with its documented default.
    ///
    /// This is the fallback path for hand-edited scenario files: a value
    /// outside its documented range degrades to the default instead of
    /// aborting, mirroring the validation contract of the original bench.
    pub fn start_params(&self) -> StartParams {
        let v = &self.vehicle;
        let d = &self.drive;
        StartParams {
            battery_voltage_v: sanitize(v.battery_voltage_v, VOLTAGE_RANGE_V, DEFAULT_VOLTAGE_V),
            battery_capacity_kwh: sanitize(
                v.battery_capacity_kwh,
                CAPACITY_RANGE_KWH,
                DEFAULT_CAPACITY_KWH,
            ),
            motor_power_kw: sanitize(v.motor_power_kw, POWER_RANGE_KW, DEFAULT_POWER_KW),
            drive_mode: DriveMode::from_name(&d.mode).unwrap_or_default(),
            regen_braking: d.regen_braking,
            regen_efficiency: sanitize(d.regen_efficiency_pct, (0.0, 100.0), DEFAULT_REGEN_PCT)
                / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("drag_strip");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[vehicle]
battery_voltage_v = 800.0
battery_capacity_kwh = 77.0
motor_power_kw = 250.0

[drive]
mode = "sport"
regen_braking = false
regen_efficiency_pct = 0.0

[run]
ticks = 120
dt_s = 0.5

[cycle]
profile = "cruise"
accel_ms2 = 1.5
phase_ticks = 40
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.vehicle.battery_voltage_v),
            Some(800.0)
        );
        assert_eq!(cfg.as_ref().map(|c| &*c.drive.mode), Some("sport"));
        assert_eq!(cfg.as_ref().map(|c| c.run.ticks), Some(120));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[vehicle]
motor_power_kw = 200.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.vehicle.motor_power_kw), Some(200.0));
        assert_eq!(
            cfg.as_ref().map(|c| c.vehicle.battery_voltage_v),
            Some(400.0)
        );
        assert_eq!(cfg.as_ref().map(|c| c.run.ticks), Some(300));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[vehicle]
flux_capacitor_gw = 1.21
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_out_of_range_vehicle() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.vehicle.battery_voltage_v = 50.0;
        cfg.vehicle.battery_capacity_kwh = 500.0;
        cfg.vehicle.motor_power_kw = 10.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "vehicle.battery_voltage_v"));
        assert!(
            errors
                .iter()
                .any(|e| e.field == "vehicle.battery_capacity_kwh")
        );
        assert!(errors.iter().any(|e| e.field == "vehicle.motor_power_kw"));
    }

    #[test]
    fn validation_catches_bad_mode_and_profile() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.drive.mode = "ludicrous".to_string();
        cfg.cycle.profile = "dyno".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "drive.mode"));
        assert!(errors.iter().any(|e| e.field == "cycle.profile"));
    }

    #[test]
    fn validation_catches_degenerate_run() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.run.ticks = 0;
        cfg.run.dt_s = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "run.ticks"));
        assert!(errors.iter().any(|e| e.field == "run.dt_s"));
    }

    #[test]
    fn start_params_pass_valid_values_through() {
        let p = ScenarioConfig::sport_sprint().start_params();
        assert_eq!(p.battery_voltage_v, 800.0);
        assert_eq!(p.motor_power_kw, 350.0);
        assert_eq!(p.drive_mode, crate::sim::types::DriveMode::Sport);
        assert!(!p.regen_braking);
        assert_eq!(p.regen_efficiency, 0.0);
    }

    #[test]
    fn start_params_fall_back_to_documented_defaults() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.vehicle.battery_voltage_v = 5000.0;
        cfg.vehicle.battery_capacity_kwh = f64::NAN;
        cfg.vehicle.motor_power_kw = -1.0;
        cfg.drive.mode = "ludicrous".to_string();
        cfg.drive.regen_efficiency_pct = 150.0;
        let p = cfg.start_params();
        assert_eq!(p.battery_voltage_v, 400.0);
        assert_eq!(p.battery_capacity_kwh, 60.0);
        assert_eq!(p.motor_power_kw, 150.0);
        assert_eq!(p.drive_mode, crate::sim::types::DriveMode::Normal);
        assert_eq!(p.regen_efficiency, 0.5);
    }

    #[test]
    fn regen_percentage_is_scaled_to_fraction() {
        let p = ScenarioConfig::eco_commute().start_params();
        assert!((p.regen_efficiency - 0.7).abs() < 1e-12);
    }
}
