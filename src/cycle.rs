//! Commanded-acceleration profiles for headless runs.
//!
//! The engine only consumes one scalar per tick — the driver's requested
//! acceleration. A drive cycle supplies that scalar as a pure function of
//! the tick index, so headless runs stay fully deterministic.

use crate::config::CycleConfig;

/// A deterministic commanded-acceleration profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriveCycle {
    /// Hold one command for the whole run.
    Constant(f64),
    /// Alternate accelerate and brake phases of equal length.
    Pulse {
        /// Command magnitude (m/s²); negated during brake phases.
        accel_ms2: f64,
        /// Length of each phase in ticks.
        phase_ticks: usize,
    },
    /// Accelerate for a lead-in, then coast at zero command.
    Cruise {
        /// Command during the lead-in (m/s²).
        accel_ms2: f64,
        /// Lead-in length in ticks.
        phase_ticks: usize,
    },
}

impl DriveCycle {
    /// Builds a cycle from scenario configuration.
    ///
    /// An unrecognized profile name degrades to a constant command; the
    /// scenario validator reports it as an error beforehand.
    pub fn from_config(c: &CycleConfig) -> Self {
        match c.profile.as_str() {
            "pulse" => Self::Pulse {
                accel_ms2: c.accel_ms2,
                phase_ticks: c.phase_ticks.max(1),
            },
            "cruise" => Self::Cruise {
                accel_ms2: c.accel_ms2,
                phase_ticks: c.phase_ticks.max(1),
            },
            _ => Self::Constant(c.accel_ms2),
        }
    }

    /// Returns the commanded acceleration for tick `tick`.
    pub fn command(&self, tick: usize) -> f64 {
        match *self {
            Self::Constant(a) => a,
            Self::Pulse {
                accel_ms2,
                phase_ticks,
            } => {
                if (tick / phase_ticks) % 2 == 0 {
                    accel_ms2
                } else {
                    -accel_ms2
                }
            }
            Self::Cruise {
                accel_ms2,
                phase_ticks,
            } => {
                if tick < phase_ticks {
                    accel_ms2
                } else {
                    0.0
                }
            }
        }
    }
}
