use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::{debug, error, warn};

use super::service::{EventPlanner, PlannerError};
use crate::events::{EventId, EventStore, EventSubmission, ValidationError};
use crate::weather::ForecastProvider;

/// Router builder exposing the event and forecast endpoints.
pub fn planner_router<S, P>(planner: Arc<EventPlanner<S, P>>) -> Router
where
    S: EventStore + 'static,
    P: ForecastProvider + 'static,
{
    Router::new()
        .route(
            "/api/events",
            get(list_handler::<S, P>).post(create_handler::<S, P>),
        )
        .route(
            "/api/events/:event_id/suitability",
            get(suitability_handler::<S, P>),
        )
        .route(
            "/api/events/:event_id/alternatives",
            get(alternatives_handler::<S, P>),
        )
        .with_state(planner)
}

impl IntoResponse for PlannerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        let payload = json!({ "error": self.public_message() });
        (status, Json(payload)).into_response()
    }
}

pub(crate) async fn create_handler<S, P>(
    State(planner): State<Arc<EventPlanner<S, P>>>,
    payload: Result<Json<EventSubmission>, JsonRejection>,
) -> Response
where
    S: EventStore + 'static,
    P: ForecastProvider + 'static,
{
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "unreadable event payload");
            return PlannerError::from(ValidationError::MalformedPayload).into_response();
        }
    };

    match planner.create_event(submission).await {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn list_handler<S, P>(
    State(planner): State<Arc<EventPlanner<S, P>>>,
) -> Response
where
    S: EventStore + 'static,
    P: ForecastProvider + 'static,
{
    match planner.list_events().await {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn suitability_handler<S, P>(
    State(planner): State<Arc<EventPlanner<S, P>>>,
    Path(event_id): Path<String>,
) -> Response
where
    S: EventStore + 'static,
    P: ForecastProvider + 'static,
{
    match planner.suitability(&EventId(event_id)).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn alternatives_handler<S, P>(
    State(planner): State<Arc<EventPlanner<S, P>>>,
    Path(event_id): Path<String>,
) -> Response
where
    S: EventStore + 'static,
    P: ForecastProvider + 'static,
{
    match planner.alternatives(&EventId(event_id)).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => err.into_response(),
    }
}
