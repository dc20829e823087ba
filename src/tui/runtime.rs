//! Engine wrapper and TUI application state.

use std::time::Instant;

use crate::config::ScenarioConfig;
use crate::sim::engine::Engine;
use crate::sim::types::SimState;
use crate::sim::waveform::{WAVE_POINTS, WaveformSnapshot};

/// Pedal increment per keypress (m/s²).
const ACCEL_STEP_MS2: f64 = 0.1;

/// Pedal input range (m/s²); matches the widest mode ceiling.
const ACCEL_INPUT_LIMIT_MS2: f64 = 1.5;

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 5] = [500, 200, 100, 50, 20];

/// Default speed index (200 ms, the original bench cadence).
const DEFAULT_SPEED_IDX: usize = 1;

/// TUI application state.
pub struct App {
    engine: Engine,
    /// Scenario backing the current preset (kept for restart).
    scenario: ScenarioConfig,
    /// Driver-requested acceleration before the mode clamp (m/s²).
    pub commanded_accel_ms2: f64,
    /// Whether the driver loop is paused.
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last driver tick was executed.
    pub last_tick: Instant,
    /// Name of the active preset.
    pub preset_name: String,
}

impl App {
    /// Creates a new app from a preset name; the engine waits for a
    /// start command.
    pub fn new(preset: &str) -> Self {
        let scenario =
            ScenarioConfig::from_preset(preset).unwrap_or_else(|_| ScenarioConfig::baseline());
        Self::from_scenario(scenario, preset)
    }

    /// Creates a new app from an already-loaded scenario, labelled `name`
    /// in the header. Switching presets with the number keys replaces it.
    pub fn from_scenario(scenario: ScenarioConfig, name: &str) -> Self {
        Self {
            engine: Engine::new(),
            scenario,
            commanded_accel_ms2: 0.0,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
            preset_name: name.to_string(),
        }
    }

    /// Advances the engine by one self-timed tick (no-op while stopped).
    pub fn tick(&mut self) {
        self.engine.advance(self.commanded_accel_ms2);
    }

    /// Starts a run with the preset's parameters.
    pub fn start(&mut self) {
        self.engine.start(self.scenario.start_params());
    }

    /// Freezes the run for inspection.
    pub fn stop(&mut self) {
        self.engine.stop();
    }

    /// Clears the run back to ready values.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.commanded_accel_ms2 = 0.0;
    }

    /// Toggles pause/resume of the driver loop.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Presses the pedal harder (bounded by the input range).
    pub fn accel_up(&mut self) {
        self.commanded_accel_ms2 =
            (self.commanded_accel_ms2 + ACCEL_STEP_MS2).min(ACCEL_INPUT_LIMIT_MS2);
    }

    /// Eases off toward braking (bounded by the input range).
    pub fn accel_down(&mut self) {
        self.commanded_accel_ms2 =
            (self.commanded_accel_ms2 - ACCEL_STEP_MS2).max(-ACCEL_INPUT_LIMIT_MS2);
    }

    /// Increases driver-loop cadence (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases driver-loop cadence (longer tick interval).
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    /// Switches to a different preset with a fresh, stopped engine.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(scenario) = ScenarioConfig::from_preset(name) else {
            return;
        };
        self.scenario = scenario;
        self.engine = Engine::new();
        self.commanded_accel_ms2 = 0.0;
        self.paused = false;
        self.preset_name = name.to_string();
    }

    /// Read access to the state vector.
    pub fn state(&self) -> &SimState {
        self.engine.state()
    }

    /// `true` while ticks advance the engine.
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// Chronological view of the full waveform window.
    pub fn waveforms(&self) -> WaveformSnapshot<'_> {
        self.engine.waveforms(WAVE_POINTS)
    }
}
