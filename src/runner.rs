//! Headless driver loop: builds an engine from a scenario and ticks it at
//! a fixed step under a drive cycle.

use crate::config::ScenarioConfig;
use crate::cycle::DriveCycle;
use crate::sim::engine::Engine;
use crate::sim::summary::RunSummary;
use crate::sim::types::{SimState, TickRecord};
use crate::sim::waveform::{WAVE_POINTS, WaveformDump};

/// Everything a completed headless run produces.
pub struct RunOutput {
    /// One record per tick, in order.
    pub records: Vec<TickRecord>,
    /// Aggregate statistics over the run.
    pub summary: RunSummary,
    /// State vector at the end of the run (stopped).
    pub final_state: SimState,
    /// Final contents of the waveform recorder, oldest first.
    pub waveforms: WaveformDump,
}

/// Runs one scenario to completion and returns its full output.
///
/// The engine is started from the scenario's (sanitized) parameters,
/// ticked `run.ticks` times at the fixed `run.dt_s` step with the
/// configured drive cycle supplying the command, then stopped. Identical
/// scenarios produce identical output.
pub fn run_scenario(cfg: &ScenarioConfig) -> RunOutput {
    let mut engine = Engine::new();
    engine.start(cfg.start_params());

    let cycle = DriveCycle::from_config(&cfg.cycle);
    let dt_s = cfg.run.dt_s;

    let mut records = Vec::with_capacity(cfg.run.ticks);
    for t in 0..cfg.run.ticks {
        engine.tick(dt_s, cycle.command(t));
        records.push(TickRecord::from_state(t, (t + 1) as f64 * dt_s, engine.state()));
    }
    engine.stop();

    let summary = RunSummary::from_records(&records);
    let waveforms = engine.waveforms(WAVE_POINTS).to_dump();

    RunOutput {
        records,
        summary,
        final_state: engine.state().clone(),
        waveforms,
    }
}
