//! EV powertrain bench simulator.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod cycle;
pub mod io;
pub mod runner;
/// Simulation engine, state vector, waveform recorder, and run summary.
pub mod sim;
#[cfg(feature = "tui")]
pub mod tui;
