use chrono::NaiveDate;
use event_planner::config::WeatherConfig;
use event_planner::error::AppError;
use event_planner::events::EventStore;
use event_planner::planner::EventPlanner;
use event_planner::weather::{ForecastCache, ForecastService, OpenWeatherClient};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) static_dir: Arc<PathBuf>,
}

/// Wires the OpenWeatherMap client and a fresh forecast cache around `store`.
pub(crate) fn build_planner<S: EventStore + 'static>(
    weather: &WeatherConfig,
    store: Arc<S>,
) -> Result<EventPlanner<S, OpenWeatherClient>, AppError> {
    if !weather.has_api_key() {
        warn!("OPENWEATHERMAP_API_KEY is not set; forecast lookups will be rejected upstream");
    }

    let client = OpenWeatherClient::new(weather)?;
    let cache = Arc::new(
        ForecastCache::new(weather.cache_ttl).with_max_entries(weather.cache_max_entries),
    );
    Ok(EventPlanner::new(store, ForecastService::new(client, cache)))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
