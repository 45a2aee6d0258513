mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::test_router;

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn root_reports_online() {
    let (app, _) = test_router();
    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(body["system"], "GAIA Planetary Nervous System");
}

#[tokio::test]
async fn events_returns_default_batch_of_analyzed_packets() {
    let (app, _) = test_router();
    let (status, body) = send(&app, get("/api/events")).await;
    assert_eq!(status, StatusCode::OK);

    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 5);
    for event in events {
        assert_eq!(event["topic"], "Global Sentiment");
        assert_eq!(event["is_live"], false);
        assert!(uuid::Uuid::parse_str(event["id"].as_str().unwrap()).is_ok());
        assert!(event["timestamp"].as_f64().unwrap() > 0.0);
        let sentiment = event["sentiment"].as_str().unwrap();
        assert!(["fear", "neutral", "joy"].contains(&sentiment));
        assert!(event["lat"].is_number() && event["lng"].is_number());
    }
}

#[tokio::test]
async fn events_size_is_clamped() {
    let (app, _) = test_router();
    let (_, body) = send(&app, get("/api/events?size=2")).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, get("/api/events?size=0")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn scenario_switching() {
    let (app, state) = test_router();

    let (status, body) = send(&app, post_json("/api/scenario/mars_colony", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "current_scenario": "mars_colony"}));
    assert_eq!(state.stream.current_scenario().await, "mars_colony");

    let (status, body) = send(&app, post_json("/api/scenario/nope", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false, "current_scenario": "mars_colony"}));

    // 切换后不再抽到 ai_panic 的样例
    let (_, body) = send(&app, get("/api/events")).await;
    let texts: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["text"].as_str().unwrap())
        .collect();
    assert!(!texts.contains(&"AI Regulation Bill causes market panic"));
}

#[tokio::test]
async fn scenario_listing() {
    let (app, _) = test_router();
    let (status, body) = send(&app, get("/api/scenarios")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_scenario"], "ai_panic");
    assert_eq!(body["scenarios"], json!(["ai_panic", "mars_colony"]));
}

#[tokio::test]
async fn broadcast_returns_live_packet_and_feeds_poll() {
    let (app, state) = test_router();

    let (status, body) = send(
        &app,
        post_json(
            "/api/broadcast",
            json!({"text": "I love this planet", "lat": 1.5, "lng": -2.5, "lang": "en"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"], "Intercepted Signal");
    assert_eq!(body["is_live"], true);
    assert_eq!(body["sentiment"], "joy");
    assert_eq!(body["lat"], 1.5);
    assert_eq!(body["lng"], -2.5);
    assert_eq!(body["lang"], "en");

    assert_eq!(state.stream.live_events().await.len(), 1);

    for _ in 0..2 {
        let (_, body) = send(&app, get("/api/events")).await;
        let first = &body.as_array().unwrap()[0];
        assert_eq!(first["text"], "I love this planet");
        assert_eq!(first["is_live"], true);
    }
}

#[tokio::test]
async fn broadcast_fills_defaults() {
    let (app, _) = test_router();
    let (status, body) = send(&app, post_json("/api/broadcast", json!({"text": "meh"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lang"], "unknown");
    assert_eq!(body["lat"], 0.0);
    assert_eq!(body["lng"], 0.0);
    assert_eq!(body["sentiment"], "neutral");
}

#[tokio::test]
async fn broadcast_rejects_blank_text() {
    let (app, state) = test_router();
    let (status, body) = send(&app, post_json("/api/broadcast", json!({"text": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(state.stream.live_events().await.is_empty());
}

#[tokio::test]
async fn broadcast_without_text_is_rejected_by_extractor() {
    let (app, _) = test_router();
    let (status, _) = send(&app, post_json("/api/broadcast", json!({"lat": 3.0}))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn cors_is_permissive() {
    let (app, _) = test_router();
    let request = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
