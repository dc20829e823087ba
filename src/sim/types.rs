//! Core simulation types: state vector, drive modes, and physical constants.

use std::fmt;

use serde::Serialize;

/// Vehicle curb mass (kg).
pub const VEHICLE_MASS_KG: f64 = 1500.0;
/// Aerodynamic drag coefficient.
pub const DRAG_COEFF: f64 = 0.3;
/// Frontal area (m²).
pub const FRONTAL_AREA_M2: f64 = 2.5;
/// Air density at sea level (kg/m³).
pub const AIR_DENSITY_KG_M3: f64 = 1.225;
/// Rolling resistance coefficient.
pub const ROLLING_RESIST_COEFF: f64 = 0.01;
/// Gravitational acceleration (m/s²).
pub const GRAVITY_MS2: f64 = 9.81;
/// Electronically limited top speed (km/h).
pub const MAX_SPEED_KMH: f64 = 180.0;
/// Motor shaft RPM per km/h of vehicle speed (fixed single-speed reduction).
pub const RPM_PER_KMH: f64 = 50.0;
/// Combined inverter and drivetrain efficiency.
pub const DRIVETRAIN_EFF: f64 = 0.85;
/// Battery pack temperature floor (°C).
pub const MIN_BATTERY_TEMP_C: f64 = 10.0;
/// Battery pack temperature ceiling (°C).
pub const MAX_BATTERY_TEMP_C: f64 = 70.0;
/// Pack temperature above which thermal derating starts (°C).
pub const DERATE_ONSET_TEMP_C: f64 = 40.0;
/// Pack temperature at rest and after a reset (°C).
pub const AMBIENT_PACK_TEMP_C: f64 = 25.0;

/// Discrete performance profile fixing the acceleration ceiling and the
/// motor power multiplier for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveMode {
    /// Conservative pedal map: low ceiling, reduced power.
    Eco,
    /// Factory defaults.
    #[default]
    Normal,
    /// Aggressive pedal map: high ceiling, overdriven power.
    Sport,
}

/// Per-mode acceleration ceiling and power multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveProfile {
    /// Commanded acceleration is clamped to ±this value (m/s²).
    pub max_accel_ms2: f64,
    /// Multiplier applied to rated motor power.
    pub power_factor: f64,
}

impl DriveMode {
    /// Recognized mode names, in menu order.
    pub const NAMES: &[&str] = &["eco", "normal", "sport"];

    /// Parses a mode from its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "eco" => Some(Self::Eco),
            "normal" => Some(Self::Normal),
            "sport" => Some(Self::Sport),
            _ => None,
        }
    }

    /// Returns the lowercase mode name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Eco => "eco",
            Self::Normal => "normal",
            Self::Sport => "sport",
        }
    }

    /// Returns the acceleration ceiling and power multiplier for this mode.
    pub fn profile(self) -> DriveProfile {
        match self {
            Self::Eco => DriveProfile {
                max_accel_ms2: 0.5,
                power_factor: 0.7,
            },
            Self::Normal => DriveProfile {
                max_accel_ms2: 1.0,
                power_factor: 1.0,
            },
            Self::Sport => DriveProfile {
                max_accel_ms2: 1.5,
                power_factor: 1.3,
            },
        }
    }
}

/// Validated configuration handed to [`Engine::start`].
///
/// Range validation and fallback defaults are the scenario layer's job
/// ([`crate::config::ScenarioConfig::start_params`]); the engine treats
/// these values as a precondition.
///
/// [`Engine::start`]: crate::sim::engine::Engine::start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartParams {
    /// Nominal pack voltage (V), 100–1000.
    pub battery_voltage_v: f64,
    /// Pack capacity (kWh), 10–200.
    pub battery_capacity_kwh: f64,
    /// Rated motor power (kW), 50–500.
    pub motor_power_kw: f64,
    /// Performance profile, fixed for the run.
    pub drive_mode: DriveMode,
    /// Whether braking recovers energy into the pack.
    pub regen_braking: bool,
    /// Fraction of recoverable braking energy actually recovered, 0.0–1.0.
    pub regen_efficiency: f64,
}

impl Default for StartParams {
    fn default() -> Self {
        Self {
            battery_voltage_v: 400.0,
            battery_capacity_kwh: 60.0,
            motor_power_kw: 150.0,
            drive_mode: DriveMode::Normal,
            regen_braking: true,
            regen_efficiency: 0.5,
        }
    }
}

/// The complete vehicle/battery/motor state vector.
///
/// Exclusively owned and mutated by the engine; external consumers read it
/// between ticks. Speed, SoC, and pack temperature stay within their clamp
/// ranges after every tick; RPM and torque are pure functions of current
/// speed, power, and mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimState {
    /// Nominal pack voltage (V).
    pub battery_voltage_v: f64,
    /// Pack capacity (kWh).
    pub battery_capacity_kwh: f64,
    /// Rated motor power (kW).
    pub motor_power_kw: f64,
    /// Motor shaft torque (Nm), derived each tick.
    pub motor_torque_nm: f64,
    /// Motor shaft speed (RPM), derived as speed × [`RPM_PER_KMH`].
    pub motor_rpm: f64,
    /// Vehicle speed (km/h), clamped to [0, 180].
    pub vehicle_speed_kmh: f64,
    /// Commanded acceleration after the mode clamp (m/s²).
    pub acceleration_ms2: f64,
    /// Battery state of charge (%), clamped to [0, 100].
    pub soc_pct: f64,
    /// Distance travelled this run (km), non-decreasing while running.
    pub distance_km: f64,
    /// Net energy drawn from the pack (kWh); regen can decrease it.
    pub energy_consumed_kwh: f64,
    /// Fraction of recoverable braking energy recovered, 0.0–1.0.
    pub regen_efficiency: f64,
    /// Pack temperature (°C), clamped to [10, 70].
    pub battery_temp_c: f64,
    /// Consumption rate (Wh/km); 0 while no distance has been covered.
    pub energy_efficiency_wh_per_km: f64,
    /// Performance profile, fixed at start.
    pub drive_mode: DriveMode,
    /// Whether ticks advance the state.
    pub is_running: bool,
    /// Whether braking recovers energy.
    pub regen_braking: bool,
}

impl Default for SimState {
    /// Factory defaults: 400 V / 60 kWh / 150 kW, normal mode, stopped.
    fn default() -> Self {
        Self {
            battery_voltage_v: 400.0,
            battery_capacity_kwh: 60.0,
            motor_power_kw: 150.0,
            motor_torque_nm: 0.0,
            motor_rpm: 0.0,
            vehicle_speed_kmh: 0.0,
            acceleration_ms2: 0.0,
            soc_pct: 100.0,
            distance_km: 0.0,
            energy_consumed_kwh: 0.0,
            regen_efficiency: 0.5,
            battery_temp_c: AMBIENT_PACK_TEMP_C,
            energy_efficiency_wh_per_km: 0.0,
            drive_mode: DriveMode::Normal,
            is_running: false,
            regen_braking: false,
        }
    }
}

/// Flat per-tick record of the state vector, for telemetry export and
/// the API surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRecord {
    /// Tick index, starting at 0.
    pub tick: usize,
    /// Simulated time since start (s).
    pub time_s: f64,
    /// Vehicle speed (km/h).
    pub speed_kmh: f64,
    /// Clamped commanded acceleration (m/s²).
    pub accel_ms2: f64,
    /// Motor shaft speed (RPM).
    pub motor_rpm: f64,
    /// Motor shaft torque (Nm).
    pub motor_torque_nm: f64,
    /// Battery state of charge (%).
    pub soc_pct: f64,
    /// Distance travelled (km).
    pub distance_km: f64,
    /// Net energy drawn from the pack (kWh).
    pub energy_kwh: f64,
    /// Pack temperature (°C).
    pub battery_temp_c: f64,
    /// Consumption rate (Wh/km).
    pub efficiency_wh_per_km: f64,
}

impl TickRecord {
    /// Captures the dynamic fields of `state` after tick `tick`.
    pub fn from_state(tick: usize, time_s: f64, state: &SimState) -> Self {
        Self {
            tick,
            time_s,
            speed_kmh: state.vehicle_speed_kmh,
            accel_ms2: state.acceleration_ms2,
            motor_rpm: state.motor_rpm,
            motor_torque_nm: state.motor_torque_nm,
            soc_pct: state.soc_pct,
            distance_km: state.distance_km,
            energy_kwh: state.energy_consumed_kwh,
            battery_temp_c: state.battery_temp_c,
            efficiency_wh_per_km: state.energy_efficiency_wh_per_km,
        }
    }
}

impl fmt::Display for TickRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>5.1}s  v={:>5.1} km/h  soc={:>5.1}%  dist={:>6.2} km  \
             e={:>5.2} kWh  temp={:>4.1} °C",
            self.time_s,
            self.speed_kmh,
            self.soc_pct,
            self.distance_km,
            self.energy_kwh,
            self.battery_temp_c,
        )
    }
}
