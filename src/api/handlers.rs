//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, StateResponse, TelemetryQuery};
use crate::sim::types::TickRecord;
use crate::sim::waveform::WaveformDump;

/// Returns the run summary, final state vector, and last tick record.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse {
        summary: state.summary.clone(),
        final_state: state.final_state.clone(),
        latest_tick: state.records.last().cloned(),
    })
}

/// Returns tick records, optionally filtered by tick range.
///
/// `GET /telemetry` → 200 + `Vec<TickRecord>` JSON
/// `GET /telemetry?from=N&to=M` → filtered range (inclusive)
/// `GET /telemetry?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_telemetry(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TelemetryQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<TickRecord> = state
        .records
        .iter()
        .filter(|r| r.tick >= from && r.tick <= to)
        .cloned()
        .collect();

    Ok(Json(records))
}

/// Returns the final waveform recorder contents, oldest first.
///
/// `GET /waveforms` → 200 + `WaveformDump` JSON
pub async fn get_waveforms(State(state): State<Arc<AppState>>) -> Json<WaveformDump> {
    Json(state.waveforms.clone())
}
