//! REST API for run results and waveform data.
//!
//! Provides three GET endpoints:
//! - `/state` — run summary plus the final state vector and last tick
//! - `/telemetry` — full tick records with optional range filtering
//! - `/waveforms` — final recorder contents, oldest first

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::sim::summary::RunSummary;
use crate::sim::types::{SimState, TickRecord};
use crate::sim::waveform::WaveformDump;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the headless run completes and wrapped in
/// `Arc` — no locks needed since all data is read-only.
pub struct AppState {
    /// Aggregate run summary.
    pub summary: RunSummary,
    /// State vector at the end of the run.
    pub final_state: SimState,
    /// Per-tick records.
    pub records: Vec<TickRecord>,
    /// Final recorder contents.
    pub waveforms: WaveformDump,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/telemetry", get(handlers::get_telemetry))
        .route("/waveforms", get(handlers::get_waveforms))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
