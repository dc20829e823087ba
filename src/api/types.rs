//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::sim::summary::RunSummary;
use crate::sim::types::{SimState, TickRecord};

/// Combined state response: summary, final state vector, and last tick.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// Aggregate run summary.
    pub summary: RunSummary,
    /// State vector at the end of the run.
    pub final_state: SimState,
    /// Most recent tick record, absent for an empty run.
    pub latest_tick: Option<TickRecord>,
}

/// Optional tick-range filter for `/telemetry`.
#[derive(Debug, Deserialize)]
pub struct TelemetryQuery {
    /// First tick index to include (inclusive).
    pub from: Option<usize>,
    /// Last tick index to include (inclusive).
    pub to: Option<usize>,
}

/// Error payload for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}
