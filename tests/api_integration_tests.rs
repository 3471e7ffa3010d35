//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lmcache_mock::{create_router, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::from_config(&Config {
        simulation_seed: Some(2024),
        ..Config::default()
    }))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Clear / Stats Tests ==

#[tokio::test]
async fn test_clear_then_stats() {
    let app = create_test_app();

    let (status, json) = send(&app, post_json("/clear", r#"{"document_id": 42, "reason": "edit"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("42"));
    assert_eq!(json["num_tokens"], 256);
    assert!(json["event_id"].as_str().unwrap().starts_with("Clear_"));

    let (status, json) = send(&app, get("/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["total_invalidations"].as_u64().unwrap() >= 1);
    let recent = json["recent_invalidations"].as_array().unwrap();
    let latest = recent.last().unwrap();
    assert_eq!(latest["document_id"], 42);
    assert_eq!(latest["reason"], "edit");
    assert_eq!(latest["instance_id"], "default");
    assert_eq!(latest["location"], "LocalCPUBackend");
}

#[tokio::test]
async fn test_clear_without_document() {
    let app = create_test_app();

    let (status, json) = send(&app, post_json("/clear", "{}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Cache cleared");
}

#[tokio::test]
async fn test_invalidation_log_keeps_latest_hundred() {
    let app = create_test_app();

    for id in 0..130 {
        let body = format!(r#"{{"document_id": {}}}"#, id);
        let (status, _) = send(&app, post_json("/clear", &body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, json) = send(&app, get("/stats")).await;
    assert_eq!(json["total_invalidations"], 100);
    let ids: Vec<i64> = json["recent_invalidations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["document_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, (120..130).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_clear_malformed_body() {
    let app = create_test_app();

    let (status, json) = send(&app, post_json("/clear", r#"{"document_id": "abc"}"#)).await;
    assert!(status.is_client_error());
    assert!(json["error"].is_string());
}

// == Lookup Tests ==

#[tokio::test]
async fn test_lookup_reports_token_count() {
    let app = create_test_app();

    let (status, json) = send(&app, post_json("/lookup", r#"{"tokens": [1, 2, 3]}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["event_id"].as_str().unwrap().starts_with("Lookup_"));
    assert_eq!(json["layout_info"]["default_instance"][0], "LocalCPUBackend");
    assert_eq!(json["layout_info"]["default_instance"][1], 3);
}

#[tokio::test]
async fn test_lookup_missing_content_type() {
    let app = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/lookup")
        .body(Body::from(r#"{"tokens": []}"#))
        .unwrap();
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(json.get("error").is_some());
}

// == Health / Root Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "lmcache-mock-api");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let app = create_test_app();

    let (status, json) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    let endpoints = json["endpoints"].as_object().unwrap();
    assert!(endpoints.contains_key("GET /savings"));
    assert!(endpoints.contains_key("POST /backend-comparison"));
}

// == Savings / Simulation Tests ==

#[tokio::test]
async fn test_savings_seeds_sample_once() {
    let state = AppState::from_config(&Config {
        simulation_seed: Some(2024),
        ..Config::default()
    });
    let app = create_router(state.clone());

    let (status, first) = send(&app, get("/savings")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["summary"]["total_requests"], 20);

    let (_, second) = send(&app, get("/savings")).await;
    assert_eq!(second["summary"], first["summary"]);
    assert_eq!(second["latency"], first["latency"]);

    // Totals match a direct pass over the stored events.
    let log = state.cache_events.read().await;
    let hits = log.iter().filter(|e| e.is_hit()).count();
    let misses = log.iter().filter(|e| e.is_miss()).count();
    let saved: f64 = log.iter().map(|e| e.saved_dollars).sum();
    assert_eq!(hits + misses, 20);
    assert_eq!(second["summary"]["cache_hits"], hits);
    assert_eq!(second["summary"]["cache_misses"], misses);
    let reported = second["summary"]["total_saved_dollars"].as_f64().unwrap();
    assert!((reported - saved).abs() <= 0.00005 + 1e-12);
    drop(log);

    assert!(second["token_pricing"]["claude-3-5-sonnet"].is_object());
    assert_eq!(
        second["projections"]["note"],
        "Based on current hit rate and average token usage"
    );
}

#[tokio::test]
async fn test_simulate_traffic_with_body() {
    let app = create_test_app();

    let (status, json) = send(&app, post_json("/simulate-traffic", r#"{"requests": 10}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["simulated_requests"], 10);
    assert_eq!(json["total_events"], 10);

    let (_, savings) = send(&app, get("/savings")).await;
    assert!(savings["summary"]["total_requests"].as_u64().unwrap() >= 10);
    let hit_rate = savings["summary"]["hit_rate_percent"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&hit_rate));
}

#[tokio::test]
async fn test_simulate_traffic_query_and_default() {
    let app = create_test_app();

    let (status, json) = send(&app, post_json("/simulate-traffic?requests=5", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["simulated_requests"], 5);

    let request = Request::builder()
        .method("POST")
        .uri("/simulate-traffic")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["simulated_requests"], 50);
    assert_eq!(json["total_events"], 55);
}

#[tokio::test]
async fn test_simulate_traffic_caps_event_log() {
    let app = create_test_app();

    for _ in 0..3 {
        send(&app, post_json("/simulate-traffic?requests=200", "")).await;
    }

    let (_, savings) = send(&app, get("/savings")).await;
    assert_eq!(savings["summary"]["total_requests"], 500);
}

#[tokio::test]
async fn test_simulate_traffic_rejects_bad_count() {
    let app = create_test_app();

    let (status, json) = send(&app, post_json("/simulate-traffic?requests=-3", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());

    let (status, _) = send(&app, post_json("/simulate-traffic?requests=20000", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == Results Tests ==

#[tokio::test]
async fn test_results_intake_and_listing() {
    let app = create_test_app();

    for i in 0..25 {
        let body = format!(r#"{{"cache_hit_rate": {}, "monthly_savings_100k": 1200.5}}"#, i);
        let (status, json) = send(&app, post_json("/results", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "received");
        assert_eq!(json["total_results"], i + 1);
    }

    let (status, json) = send(&app, get("/results")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_results"], 25);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 20);
    assert_eq!(results[0]["cache_hit_rate"], 5.0);
    assert_eq!(results[19]["backend"], "default");
    assert!(results[19]["received_at"].is_string());
}

// == Backend Comparison Tests ==

#[tokio::test]
async fn test_backend_comparison_groups_by_context() {
    let app = create_test_app();

    let submissions = [
        r#"{"backend": "dynamo", "context_size": 4096, "performance_score": 3.2, "avg_ttft_ms": 120.0}"#,
        r#"{"backend": "lmcache", "context_size": 4096, "performance_score": 1.1, "avg_ttft_ms": 80.0}"#,
        r#"{"backend": "lmcache", "context_size": 65536, "performance_score": 4.0}"#,
        r#"{"backend": "dynamo", "context_size": 65536, "performance_score": 2.0}"#,
    ];
    for (i, body) in submissions.iter().enumerate() {
        let (status, json) = send(&app, post_json("/backend-comparison", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_comparisons"], i + 1);
    }

    let (status, json) = send(&app, get("/backend-comparison")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_comparisons"], 4);
    assert_eq!(json["recent_comparisons"].as_array().unwrap().len(), 4);

    let small = &json["winners_by_context"]["4096"];
    assert_eq!(small["winner"], "lmcache");
    assert_eq!(small["score"], 1.1);
    assert_eq!(small["ttft_ms"], 80.0);
    assert_eq!(small["all_backends"], serde_json::json!(["dynamo", "lmcache"]));

    let large = &json["winners_by_context"]["65536"];
    assert_eq!(large["winner"], "dynamo");
}
