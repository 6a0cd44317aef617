//! End-to-end scenarios for event planning over HTTP.
//!
//! The OpenWeatherMap API is replaced by a local mock server; everything else
//! (client, normalization, cache, file store, router) is the production wiring.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use event_planner::config::WeatherConfig;
use event_planner::events::JsonFileEventStore;
use event_planner::planner::{planner_router, EventPlanner};
use event_planner::weather::{ForecastCache, ForecastService, OpenWeatherClient};

fn sample(dt_txt: &str, temp: f64, condition: &str, pop: f64, wind_ms: f64) -> Value {
    json!({
        "dt_txt": dt_txt,
        "main": { "temp": temp },
        "weather": [{ "main": condition }],
        "pop": pop,
        "wind": { "speed": wind_ms },
    })
}

/// Outdoor Sports scores at midday: 10th 100, 11th 0, 12th 75, 13th 80.
fn upstream_forecast() -> Value {
    json!({
        "list": [
            sample("2025-06-10 09:00:00", 14.0, "Rain", 0.9, 12.0),
            sample("2025-06-10 12:00:00", 22.0, "Clear", 0.0, 3.0),
            sample("2025-06-11 12:00:00", 12.0, "Rain", 0.8, 8.0),
            sample("2025-06-12 12:00:00", 18.0, "Clouds", 0.5, 4.0),
            sample("2025-06-13 12:00:00", 25.0, "Clear", 0.1, 7.0),
        ]
    })
}

struct Harness {
    _dir: tempfile::TempDir,
    store_path: std::path::PathBuf,
    app: Router,
}

fn harness(server: &MockServer) -> Harness {
    let dir = tempfile::tempdir().expect("temp dir");
    let store_path = dir.path().join("data").join("events.json");
    let app = app_for(server, &store_path);
    Harness {
        _dir: dir,
        store_path,
        app,
    }
}

fn app_for(server: &MockServer, store_path: &std::path::Path) -> Router {
    let weather = WeatherConfig {
        api_key: "integration-key".to_string(),
        base_url: server.uri(),
        cache_ttl: Duration::from_secs(4 * 60 * 60),
        cache_max_entries: None,
        http_timeout: Some(Duration::from_secs(5)),
    };
    let client = OpenWeatherClient::new(&weather).expect("client builds");
    let forecasts = ForecastService::new(client, Arc::new(ForecastCache::new(weather.cache_ttl)));
    let store = Arc::new(JsonFileEventStore::new(store_path));
    planner_router(Arc::new(EventPlanner::new(store, forecasts)))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("route executes")
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post_event(payload: Value) -> Request<Body> {
    Request::post("/api/events")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

async fn mount_forecast(server: &MockServer, location: &str, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", location))
        .and(query_param("appid", "integration-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_forecast()))
        .expect(calls)
        .mount(server)
        .await;
}

async fn create_event(app: &Router, date: &str) -> String {
    let response = send(
        app,
        post_event(json!({
            "name": "Five-a-side",
            "location": "Manchester",
            "date": date,
            "eventType": "Outdoor Sports",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    body["id"].as_str().expect("id assigned").to_string()
}

#[tokio::test]
async fn scores_event_and_recommends_better_dates_with_one_upstream_call() {
    let server = MockServer::start().await;
    mount_forecast(&server, "Manchester", 1).await;
    let harness = harness(&server);

    let id = create_event(&harness.app, "2025-06-11").await;

    let response = send(&harness.app, get(&format!("/api/events/{id}/suitability"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = json_body(response).await;
    assert_eq!(report["event"]["id"], id.as_str());
    assert_eq!(report["weather"]["condition"], "Rain");
    assert_eq!(report["suitability"]["score"], 0);
    assert_eq!(report["suitability"]["breakdown"]["precipitation"], "+0 (High chance)");

    let response = send(&harness.app, get(&format!("/api/events/{id}/alternatives"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let alternatives = json_body(response).await;
    assert_eq!(alternatives["outcome"], "better_dates_found");
    let ranked: Vec<(String, u64)> = alternatives["alternatives"]
        .as_array()
        .expect("alternatives array")
        .iter()
        .map(|day| {
            (
                day["date"].as_str().expect("date").to_string(),
                day["score"].as_u64().expect("score"),
            )
        })
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("2025-06-10".to_string(), 100),
            ("2025-06-13".to_string(), 80),
            ("2025-06-12".to_string(), 75),
        ]
    );
    assert_eq!(alternatives["alternatives"][0]["weather"]["wind"], "10.8 km/h");
    // the mock's expect(1) is verified when the server drops
}

#[tokio::test]
async fn best_date_returns_full_ranking_without_better_dates() {
    let server = MockServer::start().await;
    mount_forecast(&server, "Manchester", 1).await;
    let harness = harness(&server);

    let id = create_event(&harness.app, "2025-06-10").await;
    let response = send(&harness.app, get(&format!("/api/events/{id}/alternatives"))).await;
    let alternatives = json_body(response).await;

    assert_eq!(alternatives["outcome"], "no_better_date");
    assert_eq!(alternatives["message"], "No better weather days found in the forecast.");
    assert_eq!(alternatives["alternatives"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn date_outside_forecast_window_is_not_found() {
    let server = MockServer::start().await;
    mount_forecast(&server, "Manchester", 1).await;
    let harness = harness(&server);

    let id = create_event(&harness.app, "2025-07-01").await;
    let response = send(&harness.app, get(&format!("/api/events/{id}/suitability"))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    let message = body["error"].as_str().expect("error message");
    assert!(message.starts_with("Weather forecast not available for 2025-07-01."));
}

#[tokio::test]
async fn unknown_location_surfaces_upstream_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "cod": "404" })))
        .mount(&server)
        .await;
    let harness = harness(&server);

    let response = send(
        &harness.app,
        post_event(json!({
            "name": "Picnic",
            "location": "Atlantis",
            "date": "2025-06-10",
            "eventType": "Wedding",
        })),
    )
    .await;
    let id = json_body(response).await["id"]
        .as_str()
        .expect("id assigned")
        .to_string();

    let response = send(&harness.app, get(&format!("/api/events/{id}/suitability"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "Location 'Atlantis' not found.");
}

#[tokio::test]
async fn events_survive_a_restart_of_the_service() {
    let server = MockServer::start().await;
    let harness = harness(&server);

    create_event(&harness.app, "2025-06-12").await;
    assert!(harness.store_path.exists());

    let restarted = app_for(&server, &harness.store_path);
    let response = send(&restarted, get("/api/events")).await;
    let events = json_body(response).await;
    let events = events.as_array().expect("event list");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["name"], "Five-a-side");
    assert_eq!(events[0]["eventType"], "Outdoor Sports");
    assert_eq!(events[0]["date"], "2025-06-12");
}

#[tokio::test]
async fn incomplete_submission_is_rejected_and_not_stored() {
    let server = MockServer::start().await;
    let harness = harness(&server);

    let response = send(
        &harness.app,
        post_event(json!({ "name": "Wedding", "location": "  " })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Missing required event details.");

    let response = send(&harness.app, get("/api/events")).await;
    assert_eq!(json_body(response).await, json!([]));
}
