use crate::infra::AppState;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use event_planner::events::EventStore;
use event_planner::planner::{planner_router, EventPlanner};
use event_planner::weather::ForecastProvider;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const WELCOME_MESSAGE: &str = "Welcome to the Smart Event Planner API!";

pub(crate) fn with_service_routes<S, P>(planner: Arc<EventPlanner<S, P>>) -> axum::Router
where
    S: EventStore + 'static,
    P: ForecastProvider + 'static,
{
    planner_router(planner)
        .route("/", axum::routing::get(root_endpoint))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .fallback(static_asset_endpoint)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Serves the frontend's `index.html` when present, else a plain greeting.
pub(crate) async fn root_endpoint(Extension(state): Extension<AppState>) -> Response {
    match read_asset(&state.static_dir, Path::new("index.html")).await {
        Some(response) => response,
        None => (StatusCode::OK, WELCOME_MESSAGE).into_response(),
    }
}

pub(crate) async fn static_asset_endpoint(
    Extension(state): Extension<AppState>,
    uri: Uri,
) -> Response {
    let asset = match asset_path(uri.path()) {
        Some(asset) => read_asset(&state.static_dir, &asset).await,
        None => None,
    };

    asset.unwrap_or_else(|| {
        (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found." }))).into_response()
    })
}

/// Maps a request path onto a relative file path, refusing traversal.
fn asset_path(request_path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for segment in request_path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            segment if segment.contains('\\') => return None,
            segment => relative.push(segment),
        }
    }

    if relative.as_os_str().is_empty() {
        relative.push("index.html");
    }
    Some(relative)
}

async fn read_asset(static_dir: &Path, relative: &Path) -> Option<Response> {
    let mut path = static_dir.join(relative);
    if tokio::fs::metadata(&path).await.ok()?.is_dir() {
        path.push("index.html");
    }

    let bytes = tokio::fs::read(&path).await.ok()?;
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    Some(
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.essence_str().to_string())],
            bytes,
        )
            .into_response(),
    )
}
