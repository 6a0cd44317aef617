use std::collections::HashSet;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::Deserialize;
use tracing::warn;

use super::DailyWeather;

/// Upper bound on daily entries accepted through the first-sample fallback.
pub const MAX_FORECAST_DAYS: usize = 5;

const MIDDAY_SECONDS: u32 = 12 * 60 * 60;
const MS_TO_KMH: f64 = 3.6;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 5-day / 3-hour forecast payload as returned by OpenWeatherMap.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub list: Vec<RawSample>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSample {
    pub dt_txt: String,
    pub main: RawMain,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    /// Probability of precipitation, 0 to 1. Required: a sample without it
    /// cannot be scored for precipitation.
    pub pop: f64,
    pub wind: RawWind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMain {
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCondition {
    pub main: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWind {
    /// Metres per second.
    pub speed: f64,
}

/// Reduces 3-hourly samples to one entry per calendar date.
///
/// The 12:00:00 sample wins for any date that has one. Dates without a
/// midday sample fall back to their first sample, but only while fewer than
/// [`MAX_FORECAST_DAYS`] dates have been selected. Dates keep the order in
/// which they first appear.
pub fn normalize(raw: &RawForecast) -> Vec<DailyWeather> {
    let samples: Vec<DailyWeather> = raw.list.iter().filter_map(to_daily_sample).collect();

    let mut daily = Vec::new();
    let mut seen = HashSet::new();

    for sample in &samples {
        if seen.contains(&sample.date) {
            continue;
        }

        let midday = samples
            .iter()
            .find(|candidate| candidate.date == sample.date && is_midday(candidate.time));

        if let Some(midday) = midday {
            daily.push(midday.clone());
            seen.insert(sample.date);
        } else if seen.len() < MAX_FORECAST_DAYS {
            daily.push(sample.clone());
            seen.insert(sample.date);
        }
    }

    daily
}

fn to_daily_sample(sample: &RawSample) -> Option<DailyWeather> {
    let timestamp = match NaiveDateTime::parse_from_str(sample.dt_txt.trim(), TIMESTAMP_FORMAT) {
        Ok(timestamp) => timestamp,
        Err(err) => {
            warn!(dt_txt = %sample.dt_txt, error = %err, "skipping forecast sample with unparseable timestamp");
            return None;
        }
    };

    let condition = sample
        .weather
        .first()
        .map(|condition| condition.main.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    Some(DailyWeather {
        date: timestamp.date(),
        time: timestamp.time(),
        temp: sample.main.temp,
        condition,
        precipitation_prob: sample.pop,
        wind_speed: sample.wind.speed * MS_TO_KMH,
    })
}

fn is_midday(time: NaiveTime) -> bool {
    time.num_seconds_from_midnight() == MIDDAY_SECONDS && time.nanosecond() == 0
}
