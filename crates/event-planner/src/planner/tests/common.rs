use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::events::{EventSubmission, InMemoryEventStore};
use crate::planner::EventPlanner;
use crate::weather::normalizer::{RawCondition, RawMain, RawSample, RawWind};
use crate::weather::{ForecastCache, ForecastError, ForecastProvider, ForecastService, RawForecast};

pub(super) type TestPlanner = EventPlanner<InMemoryEventStore, StubProvider>;

/// Provider returning a canned forecast and counting upstream calls.
#[derive(Clone)]
pub(super) struct StubProvider {
    calls: Arc<AtomicUsize>,
    outcome: Result<RawForecast, ForecastError>,
}

impl StubProvider {
    pub(super) fn with_forecast(forecast: RawForecast) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            outcome: Ok(forecast),
        }
    }

    pub(super) fn failing(error: ForecastError) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            outcome: Err(error),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ForecastProvider for StubProvider {
    async fn fetch_forecast(&self, _location: &str) -> Result<RawForecast, ForecastError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

pub(super) fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).expect("valid date")
}

fn midday(day: u32, temp: f64, condition: &str, pop: f64, wind_ms: f64) -> RawSample {
    RawSample {
        dt_txt: format!("2025-06-{day:02} 12:00:00"),
        main: RawMain { temp },
        weather: vec![RawCondition {
            main: condition.to_string(),
        }],
        pop,
        wind: RawWind { speed: wind_ms },
    }
}

/// Five midday samples; Outdoor Sports scores 70, 100, 30, 80, 0.
pub(super) fn five_day_forecast() -> RawForecast {
    RawForecast {
        list: vec![
            midday(10, 5.0, "Clear", 0.0, 2.0),
            midday(11, 22.0, "Clear", 0.05, 3.0),
            midday(12, 20.0, "Rain", 0.9, 12.0),
            midday(13, 24.0, "Clouds", 0.1, 8.0),
            midday(14, 2.0, "Snow", 0.8, 15.0),
        ],
    }
}

pub(super) fn planner_with(provider: StubProvider) -> Arc<TestPlanner> {
    let cache = Arc::new(ForecastCache::new(Duration::from_secs(4 * 60 * 60)));
    Arc::new(EventPlanner::new(
        Arc::new(InMemoryEventStore::default()),
        ForecastService::new(provider, cache),
    ))
}

pub(super) fn submission(day: u32, event_type: &str) -> EventSubmission {
    EventSubmission {
        name: Some("Five-a-side".to_string()),
        location: Some("Manchester".to_string()),
        date: Some(format!("2025-06-{day:02}")),
        event_type: Some(event_type.to_string()),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json body")
}
