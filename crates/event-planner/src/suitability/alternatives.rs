use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::scorer::{score_day, score_optional, weather_on};
use crate::weather::DailyWeather;

pub const BETTER_DATES_MESSAGE: &str = "Alternative dates with better weather:";
pub const NO_BETTER_DATES_MESSAGE: &str = "No better weather days found in the forecast.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlternativesOutcome {
    BetterDatesFound,
    NoBetterDate,
}

/// Display-ready weather summary attached to each ranked day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    /// e.g. `21.3°C`
    pub temp: String,
    pub condition: String,
    /// e.g. `12.0 km/h`
    pub wind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDay {
    pub date: NaiveDate,
    pub score: u32,
    pub weather: DaySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativesReport {
    pub outcome: AlternativesOutcome,
    pub message: String,
    pub current_score: u32,
    pub alternatives: Vec<RankedDay>,
}

/// Ranks every forecast day for an event type, best first.
///
/// The relative order of equal scores is not significant.
pub fn rank_days(forecast: &[DailyWeather], event_type: &str) -> Vec<RankedDay> {
    let mut ranked: Vec<RankedDay> = forecast
        .iter()
        .map(|day| RankedDay {
            date: day.date,
            score: score_day(day, event_type).score,
            weather: DaySummary {
                temp: format!("{:.1}°C", day.temp),
                condition: day.condition.clone(),
                wind: format!("{:.1} km/h", day.wind_speed),
            },
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Days that beat the event's current date.
///
/// When no day is strictly better the full ranking is returned instead of an
/// empty list, flagged with [`AlternativesOutcome::NoBetterDate`].
pub fn find_alternatives(
    forecast: &[DailyWeather],
    event_date: NaiveDate,
    event_type: &str,
) -> AlternativesReport {
    let ranked = rank_days(forecast, event_type);
    let current_score = score_optional(weather_on(forecast, event_date), event_type).score;

    let better: Vec<RankedDay> = ranked
        .iter()
        .filter(|day| day.score > current_score && day.date != event_date)
        .cloned()
        .collect();

    if better.is_empty() {
        AlternativesReport {
            outcome: AlternativesOutcome::NoBetterDate,
            message: NO_BETTER_DATES_MESSAGE.to_string(),
            current_score,
            alternatives: ranked,
        }
    } else {
        AlternativesReport {
            outcome: AlternativesOutcome::BetterDatesFound,
            message: BETTER_DATES_MESSAGE.to_string(),
            current_score,
            alternatives: better,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).expect("valid date")
    }

    // Outdoor Sports points: temp 30, precipitation 25, wind 20, condition 25.
    fn weather(day: u32, score: u32) -> DailyWeather {
        let (temp, precipitation_prob, wind_speed, condition) = match score {
            100 => (20.0, 0.0, 5.0, "Clear"),
            80 => (20.0, 0.0, 50.0, "Clear"),
            70 => (0.0, 0.0, 5.0, "Clear"),
            30 => (20.0, 0.9, 50.0, "Rain"),
            0 => (0.0, 0.9, 50.0, "Rain"),
            other => panic!("no fixture for score {other}"),
        };
        DailyWeather {
            date: date(day),
            time: NaiveTime::from_hms_opt(12, 0, 0).expect("valid time"),
            temp,
            condition: condition.to_string(),
            precipitation_prob,
            wind_speed,
        }
    }

    #[test]
    fn fixtures_score_as_labelled() {
        for score in [100, 80, 70, 30, 0] {
            assert_eq!(score_day(&weather(10, score), "Outdoor Sports").score, score);
        }
    }

    #[test]
    fn only_strictly_better_days_are_returned() {
        let forecast = vec![
            weather(10, 70),
            weather(11, 80),
            weather(12, 70),
            weather(13, 30),
        ];

        let report = find_alternatives(&forecast, date(10), "Outdoor Sports");
        assert_eq!(report.outcome, AlternativesOutcome::BetterDatesFound);
        assert_eq!(report.message, BETTER_DATES_MESSAGE);
        assert_eq!(report.current_score, 70);
        assert_eq!(report.alternatives.len(), 1);
        assert_eq!(report.alternatives[0].date, date(11));
        assert_eq!(report.alternatives[0].score, 80);
    }

    #[test]
    fn best_day_already_chosen_returns_full_ranking() {
        let forecast = vec![weather(10, 30), weather(11, 100), weather(12, 70)];

        let report = find_alternatives(&forecast, date(11), "Outdoor Sports");
        assert_eq!(report.outcome, AlternativesOutcome::NoBetterDate);
        assert_eq!(report.message, NO_BETTER_DATES_MESSAGE);
        let scores: Vec<u32> = report.alternatives.iter().map(|day| day.score).collect();
        assert_eq!(scores, vec![100, 70, 30]);
    }

    #[test]
    fn date_outside_forecast_counts_as_zero() {
        let forecast = vec![weather(10, 0), weather(11, 30)];

        let report = find_alternatives(&forecast, date(20), "Outdoor Sports");
        assert_eq!(report.current_score, 0);
        assert_eq!(report.alternatives.len(), 1);
        assert_eq!(report.alternatives[0].date, date(11));
    }

    #[test]
    fn ranked_days_carry_display_strings() {
        let mut day = weather(10, 100);
        day.temp = 21.34;
        day.wind_speed = 12.0;

        let ranked = rank_days(&[day], "Outdoor Sports");
        assert_eq!(ranked[0].weather.temp, "21.3°C");
        assert_eq!(ranked[0].weather.wind, "12.0 km/h");
        assert_eq!(ranked[0].weather.condition, "Clear");
    }
}
