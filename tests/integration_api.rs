//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use ev_sim::api::{AppState, router};
use ev_sim::config::ScenarioConfig;
use ev_sim::runner::run_scenario;

/// Runs the sport-sprint preset and wraps its output as API state.
fn build_api_state() -> Arc<AppState> {
    let cfg = ScenarioConfig::sport_sprint();
    let out = run_scenario(&cfg);
    Arc::new(AppState {
        summary: out.summary,
        final_state: out.final_state,
        records: out.records,
        waveforms: out.waveforms,
    })
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let app = router(build_api_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn state_reflects_the_completed_run() {
    let (status, body) = get("/state").await;
    assert_eq!(status, StatusCode::OK);

    let summary = body["summary"].as_object().unwrap();
    for key in [
        "duration_s",
        "top_speed_kmh",
        "distance_km",
        "energy_consumed_kwh",
        "min_soc_pct",
        "peak_battery_temp_c",
        "peak_torque_nm",
        "final_efficiency_wh_per_km",
    ] {
        assert!(summary.contains_key(key), "summary missing {key}");
    }
    assert!(summary["top_speed_kmh"].as_f64().unwrap() > 0.0);

    let final_state = body["final_state"].as_object().unwrap();
    assert_eq!(final_state["is_running"], false);
    assert_eq!(final_state["battery_voltage_v"], 800.0);
    assert_eq!(final_state["drive_mode"].as_str(), Some("sport"));

    // Sport-sprint runs 450 ticks; the latest record is the last one.
    assert_eq!(body["latest_tick"]["tick"], 449);
}

#[tokio::test]
async fn telemetry_range_is_inclusive_on_both_ends() {
    let (status, body) = get("/telemetry?from=100&to=109").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["tick"], 100);
    assert_eq!(rows[9]["tick"], 109);
}

#[tokio::test]
async fn telemetry_without_filter_returns_the_full_run() {
    let (status, body) = get("/telemetry").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(450));
}

#[tokio::test]
async fn inverted_range_is_a_bad_request() {
    let (status, body) = get("/telemetry?from=9&to=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("must be <="));
}

#[tokio::test]
async fn waveforms_hold_full_chronological_channels() {
    let (status, body) = get("/waveforms").await;
    assert_eq!(status, StatusCode::OK);
    for channel in ["voltage_v", "current_a", "speed_kmh", "temperature_c"] {
        let samples = body[channel].as_array().unwrap();
        assert_eq!(samples.len(), 200, "channel {channel}");
    }
    // 800 V pack with ±5% ripple stays inside [720, 880].
    for v in body["voltage_v"].as_array().unwrap() {
        let v = v.as_f64().unwrap();
        assert!((720.0..=880.0).contains(&v));
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = router(build_api_state());
    let req = Request::builder()
        .uri("/battery")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
