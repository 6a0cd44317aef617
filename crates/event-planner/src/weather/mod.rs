//! Forecast retrieval: upstream client, daily normalization and caching.

pub mod cache;
mod error;
pub mod normalizer;
pub mod provider;
pub mod service;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub use cache::{CacheKey, ForecastCache, TtlCache};
pub use error::ForecastError;
pub use normalizer::{normalize, RawForecast, MAX_FORECAST_DAYS};
pub use provider::{ForecastProvider, OpenWeatherClient};
pub use service::ForecastService;

/// One representative forecast sample for a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    pub date: NaiveDate,
    /// Time of day of the sample that was kept for this date.
    pub time: NaiveTime,
    /// Degrees Celsius.
    pub temp: f64,
    pub condition: String,
    /// Probability of precipitation, 0 to 1.
    pub precipitation_prob: f64,
    /// Kilometres per hour.
    pub wind_speed: f64,
}
