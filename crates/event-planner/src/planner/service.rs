use std::sync::Arc;

use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::events::{Event, EventId, EventStore, EventSubmission, StoreError, ValidationError};
use crate::suitability::{
    find_alternatives, score_day, score_optional, weather_on, AlternativesReport,
    SuitabilityResult,
};
use crate::weather::{DailyWeather, ForecastError, ForecastProvider, ForecastService};

/// Suitability of an event's own date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuitabilityReport {
    pub event: Event,
    pub weather: DailyWeather,
    pub suitability: SuitabilityResult,
}

/// Ad-hoc assessment of a location and date that is not tied to a stored event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateAssessment {
    pub location: String,
    pub date: NaiveDate,
    pub event_type: String,
    pub weather: Option<DailyWeather>,
    pub suitability: SuitabilityResult,
    pub alternatives: AlternativesReport,
}

/// Service composing the event store, forecast service, and scoring rules.
pub struct EventPlanner<S, P> {
    store: Arc<S>,
    forecasts: ForecastService<P>,
}

impl<S, P> EventPlanner<S, P>
where
    S: EventStore + 'static,
    P: ForecastProvider + 'static,
{
    pub fn new(store: Arc<S>, forecasts: ForecastService<P>) -> Self {
        Self { store, forecasts }
    }

    pub fn forecasts(&self) -> &ForecastService<P> {
        &self.forecasts
    }

    pub async fn create_event(&self, submission: EventSubmission) -> Result<Event, PlannerError> {
        let new_event = submission.validate()?;
        let event = self.store.append(new_event).await?;
        info!(id = %event.id, event_type = %event.event_type, "event created");
        Ok(event)
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, PlannerError> {
        Ok(self.store.list().await?)
    }

    pub async fn event(&self, id: &EventId) -> Result<Event, PlannerError> {
        self.store
            .list()
            .await?
            .into_iter()
            .find(|event| &event.id == id)
            .ok_or(PlannerError::EventNotFound)
    }

    /// Scores the forecast for the event's own date.
    pub async fn suitability(&self, id: &EventId) -> Result<SuitabilityReport, PlannerError> {
        let event = self.event(id).await?;
        let forecast = self.forecasts.daily_forecast(&event.location).await?;
        let weather = weather_on(&forecast, event.date)
            .cloned()
            .ok_or(PlannerError::ForecastUnavailableForDate(event.date))?;

        let suitability = score_day(&weather, &event.event_type);
        Ok(SuitabilityReport {
            event,
            weather,
            suitability,
        })
    }

    /// Ranks the forecast window against the event's current date.
    pub async fn alternatives(&self, id: &EventId) -> Result<AlternativesReport, PlannerError> {
        let event = self.event(id).await?;
        let forecast = self.forecasts.daily_forecast(&event.location).await?;
        if forecast.is_empty() {
            return Err(PlannerError::EmptyForecast(event.location));
        }

        Ok(find_alternatives(&forecast, event.date, &event.event_type))
    }

    /// Scores a location/date/type triple directly, for CLI use.
    pub async fn assess(
        &self,
        location: &str,
        date: NaiveDate,
        event_type: &str,
    ) -> Result<DateAssessment, PlannerError> {
        let forecast = self.forecasts.daily_forecast(location).await?;
        let weather = weather_on(&forecast, date).cloned();
        let suitability = score_optional(weather.as_ref(), event_type);
        let alternatives = find_alternatives(&forecast, date, event_type);

        Ok(DateAssessment {
            location: location.to_string(),
            date,
            event_type: event_type.to_string(),
            weather,
            suitability,
            alternatives,
        })
    }
}

/// Error raised by the planner service.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("Event not found.")]
    EventNotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Forecast(#[from] ForecastError),
    #[error("Weather forecast not available for {0}. Forecasts are typically available for the next 5 days.")]
    ForecastUnavailableForDate(NaiveDate),
    #[error("No weather forecast available for {0}")]
    EmptyForecast(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PlannerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::Validation(_) => StatusCode::BAD_REQUEST,
            PlannerError::EventNotFound
            | PlannerError::ForecastUnavailableForDate(_)
            | PlannerError::EmptyForecast(_)
            | PlannerError::Forecast(ForecastError::LocationNotFound(_)) => StatusCode::NOT_FOUND,
            PlannerError::Forecast(ForecastError::InvalidCredentials) => StatusCode::BAD_GATEWAY,
            PlannerError::Forecast(ForecastError::ServiceUnavailable) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            PlannerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show API clients.
    pub fn public_message(&self) -> String {
        match self {
            PlannerError::Store(_) => "Event storage is unavailable.".to_string(),
            other => other.to_string(),
        }
    }
}
