//! Shared test fixtures for integration tests.

use ev_sim::sim::engine::Engine;
use ev_sim::sim::types::{DriveMode, StartParams};

/// Factory-default start parameters (400 V / 60 kWh / 150 kW, normal mode,
/// regen on at 50%).
pub fn default_params() -> StartParams {
    StartParams::default()
}

/// An engine already started with the factory-default parameters.
pub fn started_engine() -> Engine {
    started_engine_with(default_params())
}

/// An engine already started with the given parameters.
pub fn started_engine_with(params: StartParams) -> Engine {
    let mut engine = Engine::new();
    engine.start(params);
    engine
}

/// Start parameters with a specific drive mode, everything else default.
pub fn params_with_mode(mode: DriveMode) -> StartParams {
    StartParams {
        drive_mode: mode,
        ..StartParams::default()
    }
}
