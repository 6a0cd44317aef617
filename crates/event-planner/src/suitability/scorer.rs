use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::profiles::profile_for;
use crate::weather::DailyWeather;

pub const NO_WEATHER_MESSAGE: &str = "Weather data not available.";

/// Weather criterion contributing to a suitability score.
///
/// Serialized as its [`label`](Criterion::label), e.g. `temp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Criterion {
    Temperature,
    Precipitation,
    Wind,
    Condition,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Temperature,
        Criterion::Precipitation,
        Criterion::Wind,
        Criterion::Condition,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Criterion::Temperature => "temp",
            Criterion::Precipitation => "precipitation",
            Criterion::Wind => "wind",
            Criterion::Condition => "condition",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|criterion| criterion.label() == label)
    }
}

impl Serialize for Criterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Criterion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Criterion::from_label(&label).ok_or_else(|| {
            let expected: Vec<&str> = Self::ALL.iter().map(|criterion| criterion.label()).collect();
            de::Error::custom(format!(
                "unknown criterion '{label}', expected one of {}",
                expected.join(", ")
            ))
        })
    }
}

/// Points awarded for one day plus a per-criterion explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitabilityResult {
    pub score: u32,
    pub breakdown: BTreeMap<Criterion, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuitabilityResult {
    /// Result for a date the forecast does not cover.
    pub fn unavailable() -> Self {
        Self {
            score: 0,
            breakdown: BTreeMap::new(),
            message: Some(NO_WEATHER_MESSAGE.to_string()),
        }
    }
}

/// Scores one day's weather for an event type.
///
/// Each criterion is pass/fail; there is no partial credit.
pub fn score_day(weather: &DailyWeather, event_type: &str) -> SuitabilityResult {
    let profile = profile_for(event_type);
    let mut breakdown = BTreeMap::new();
    let mut score = 0;

    let temperature = &profile.temperature;
    let ideal_temp = weather.temp >= temperature.ideal_min && weather.temp <= temperature.ideal_max;
    score += award(
        &mut breakdown,
        Criterion::Temperature,
        ideal_temp,
        temperature.points,
        ("Ideal", "Not Ideal"),
    );

    let dry = weather.precipitation_prob * 100.0 <= profile.precipitation.max;
    score += award(
        &mut breakdown,
        Criterion::Precipitation,
        dry,
        profile.precipitation.points,
        ("Low chance", "High chance"),
    );

    let calm = weather.wind_speed <= profile.wind.max;
    score += award(
        &mut breakdown,
        Criterion::Wind,
        calm,
        profile.wind.points,
        ("Calm", "Windy"),
    );

    let good_sky = profile
        .condition
        .ideal
        .iter()
        .any(|label| *label == weather.condition);
    score += award(
        &mut breakdown,
        Criterion::Condition,
        good_sky,
        profile.condition.points,
        ("Good", "Not Ideal"),
    );

    SuitabilityResult {
        score,
        breakdown,
        message: None,
    }
}

/// Scores an optional day, yielding the no-data result when absent.
pub fn score_optional(weather: Option<&DailyWeather>, event_type: &str) -> SuitabilityResult {
    match weather {
        Some(weather) => score_day(weather, event_type),
        None => SuitabilityResult::unavailable(),
    }
}

/// Finds the forecast entry for a calendar date.
pub fn weather_on(forecast: &[DailyWeather], date: NaiveDate) -> Option<&DailyWeather> {
    forecast.iter().find(|day| day.date == date)
}

fn award(
    breakdown: &mut BTreeMap<Criterion, String>,
    criterion: Criterion,
    passed: bool,
    points: u32,
    (pass_label, fail_label): (&str, &str),
) -> u32 {
    let (awarded, label) = if passed {
        (points, pass_label)
    } else {
        (0, fail_label)
    };
    breakdown.insert(criterion, format!("+{awarded} ({label})"));
    awarded
}
