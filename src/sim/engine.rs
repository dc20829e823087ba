//! Fixed-step powertrain simulation engine.
//!
//! The engine exclusively owns the [`SimState`] and the
//! [`WaveformRecorder`]; external drivers advance it through
//! [`tick`](Engine::tick) (explicit `dt`, deterministic) or
//! [`advance`](Engine::advance) (self-timed, for live loops) and read the
//! state between ticks. Control is limited to `start`, `stop`, and `reset`.
//!
//! Every numeric hazard in the tick path (torque at zero RPM, negative
//! speed, SoC and temperature excursions) is neutralized by an explicit
//! clamp; there are no fallible paths.

use std::f64::consts::PI;

use super::clock::TickTimer;
use super::types::{
    AIR_DENSITY_KG_M3, AMBIENT_PACK_TEMP_C, DERATE_ONSET_TEMP_C, DRAG_COEFF, DRIVETRAIN_EFF,
    FRONTAL_AREA_M2, GRAVITY_MS2, MAX_BATTERY_TEMP_C, MAX_SPEED_KMH, MIN_BATTERY_TEMP_C,
    ROLLING_RESIST_COEFF, RPM_PER_KMH, SimState, StartParams, VEHICLE_MASS_KG,
};
use super::waveform::{WAVE_POINTS, WaveformRecorder};

/// The powertrain simulation engine.
pub struct Engine {
    state: SimState,
    recorder: WaveformRecorder,
    timer: TickTimer,
    /// Simulated seconds since start; drives the waveform ripple phase so
    /// the tick path never reads the wall clock.
    elapsed_s: f64,
}

impl Engine {
    /// Creates an engine with factory-default state, not running.
    pub fn new() -> Self {
        Self {
            state: SimState::default(),
            recorder: WaveformRecorder::new(),
            timer: TickTimer::new(),
            elapsed_s: 0.0,
        }
    }

    /// Read access to the state vector, valid between ticks.
    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Read access to the waveform recorder, valid between ticks.
    pub fn recorder(&self) -> &WaveformRecorder {
        &self.recorder
    }

    /// `true` while ticks advance the state.
    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Stores the run configuration, resets all dynamic fields to their
    /// ready values, and begins the run.
    ///
    /// `params` must already be range-validated; out-of-range values are
    /// rejected (or replaced by defaults) upstream, not here.
    pub fn start(&mut self, params: StartParams) {
        self.state.battery_voltage_v = params.battery_voltage_v;
        self.state.battery_capacity_kwh = params.battery_capacity_kwh;
        self.state.motor_power_kw = params.motor_power_kw;
        self.state.drive_mode = params.drive_mode;
        self.state.regen_braking = params.regen_braking;
        self.state.regen_efficiency = params.regen_efficiency;
        self.reset_dynamic();
        self.state.is_running = true;
    }

    /// Freezes the run: subsequent ticks become no-ops, every other field
    /// keeps its last value for inspection.
    pub fn stop(&mut self) {
        self.state.is_running = false;
    }

    /// Clears a run back to its ready values without touching the stored
    /// configuration or the run flag.
    pub fn reset(&mut self) {
        self.reset_dynamic();
    }

    fn reset_dynamic(&mut self) {
        let s = &mut self.state;
        s.vehicle_speed_kmh = 0.0;
        s.motor_rpm = 0.0;
        s.motor_torque_nm = 0.0;
        s.acceleration_ms2 = 0.0;
        s.distance_km = 0.0;
        s.energy_consumed_kwh = 0.0;
        s.soc_pct = 100.0;
        s.battery_temp_c = AMBIENT_PACK_TEMP_C;
        s.energy_efficiency_wh_per_km = 0.0;
        self.elapsed_s = 0.0;
        self.timer.reset();
    }

    /// Advances the simulation by `dt_s` seconds under a driver-requested
    /// acceleration. No-op while the engine is not running.
    ///
    /// One tick: clamp the command to the mode's ceiling, integrate the
    /// longitudinal force balance (explicit Euler), derive motor RPM and
    /// torque, accumulate distance and energy, apply regen recovery and
    /// thermal drift, then push one sample per channel into the recorder.
    pub fn tick(&mut self, dt_s: f64, commanded_accel_ms2: f64) {
        if !self.state.is_running {
            return;
        }
        let s = &mut self.state;
        let profile = s.drive_mode.profile();

        s.acceleration_ms2 =
            commanded_accel_ms2.clamp(-profile.max_accel_ms2, profile.max_accel_ms2);

        // Longitudinal force balance in SI units, explicit Euler on speed.
        let mut speed_ms = s.vehicle_speed_kmh / 3.6;
        let drive_force = VEHICLE_MASS_KG * s.acceleration_ms2;
        let drag = 0.5 * DRAG_COEFF * FRONTAL_AREA_M2 * AIR_DENSITY_KG_M3 * speed_ms * speed_ms;
        let rolling = ROLLING_RESIST_COEFF * VEHICLE_MASS_KG * GRAVITY_MS2;
        let net_force = drive_force - drag - rolling;
        speed_ms += net_force / VEHICLE_MASS_KG * dt_s;
        s.vehicle_speed_kmh = (speed_ms * 3.6).clamp(0.0, MAX_SPEED_KMH);

        // Motor coupling. The +0.1 denominator guard keeps torque finite
        // at zero RPM; behavior compatibility forbids a cleverer idle model.
        s.motor_rpm = s.vehicle_speed_kmh * RPM_PER_KMH;
        s.motor_torque_nm =
            s.motor_power_kw * profile.power_factor * 1000.0 / (s.motor_rpm / 60.0 * 2.0 * PI + 0.1);

        s.distance_km += s.vehicle_speed_kmh / 3600.0 * dt_s;

        // Pack draw, derated 1%/°C above the thermal onset.
        let temp_eff = 1.0 - ((s.battery_temp_c - DERATE_ONSET_TEMP_C) * 0.01).max(0.0);
        let power_use_kw = s.motor_power_kw
            * profile.power_factor
            * (0.5 + 0.5 * s.acceleration_ms2.abs())
            / (DRIVETRAIN_EFF * temp_eff);
        s.energy_consumed_kwh += power_use_kw / 3600.0 * dt_s;
        s.soc_pct = (100.0 - s.energy_consumed_kwh / s.battery_capacity_kwh * 100.0).max(0.0);

        // Regenerative braking recovers half the instantaneous draw,
        // scaled by the configured efficiency.
        if s.acceleration_ms2 < 0.0 && s.regen_braking {
            let regen_kw = s.regen_efficiency * power_use_kw * 0.5;
            s.energy_consumed_kwh -= regen_kw / 3600.0 * dt_s;
            s.soc_pct = (100.0 - s.energy_consumed_kwh / s.battery_capacity_kwh * 100.0)
                .clamp(0.0, 100.0);
        }

        // Resistive heating against a constant coolant-loop term.
        s.battery_temp_c += (power_use_kw / s.motor_power_kw) * 0.1 * dt_s;
        s.battery_temp_c -= 0.05 * dt_s;
        s.battery_temp_c = s.battery_temp_c.clamp(MIN_BATTERY_TEMP_C, MAX_BATTERY_TEMP_C);

        s.energy_efficiency_wh_per_km = if s.distance_km > 0.0 {
            s.energy_consumed_kwh * 1000.0 / s.distance_km
        } else {
            0.0
        };

        // One sample per channel; the sinusoidal ripple is keyed to
        // accumulated simulated time, keeping the tick deterministic.
        self.elapsed_s += dt_s;
        let voltage_v = s.battery_voltage_v * (0.95 + 0.05 * (self.elapsed_s * 0.01).sin());
        let current_a = s.motor_power_kw * 1000.0 / s.battery_voltage_v
            * (0.9 + 0.1 * (self.elapsed_s * 0.02).sin());
        self.recorder
            .record(voltage_v, current_a, s.vehicle_speed_kmh, s.battery_temp_c);
    }

    /// Self-timed tick for live driver loops: measures `dt` from the
    /// engine's own previous call (first tick after a start or reset uses
    /// [`DEFAULT_FIRST_DT_S`](super::clock::DEFAULT_FIRST_DT_S)).
    pub fn advance(&mut self, commanded_accel_ms2: f64) {
        let dt_s = self.timer.dt_s();
        self.tick(dt_s, commanded_accel_ms2);
    }

    /// Chronological view of the `count` most recent waveform samples.
    pub fn waveforms(&self, count: usize) -> super::waveform::WaveformSnapshot<'_> {
        self.recorder.snapshot(count.min(WAVE_POINTS))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
