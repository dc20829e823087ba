/// Wall-clock tick timer for live driver loops.
pub mod clock;
pub mod engine;
/// Post-hoc run summary statistics.
pub mod summary;
pub mod types;
/// Rolling sample buffers for waveform plotting.
pub mod waveform;
