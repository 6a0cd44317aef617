use crate::infra::build_planner;
use chrono::NaiveDate;
use clap::Args;
use event_planner::config::AppConfig;
use event_planner::error::AppError;
use event_planner::events::InMemoryEventStore;
use event_planner::planner::DateAssessment;
use event_planner::suitability::{
    known_event_types, profile_for, AlternativesOutcome, DEFAULT_EVENT_TYPE,
};
use event_planner::telemetry::{self, LogTarget};
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// City to look up, e.g. "Manchester"
    #[arg(long)]
    pub(crate) location: String,
    /// Event date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: NaiveDate,
    /// Event type; unknown types are scored as Outdoor Sports
    #[arg(long, default_value = "Outdoor Sports")]
    pub(crate) event_type: String,
    /// Print the assessment as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    // stdout carries the report, so logs go to stderr
    telemetry::init(&config.telemetry, LogTarget::Stderr)?;

    if !known_event_types().any(|known| known == args.event_type) {
        warn!(
            event_type = %args.event_type,
            fallback = DEFAULT_EVENT_TYPE,
            "unknown event type; scoring with the fallback profile"
        );
    }

    let planner = build_planner(&config.weather, Arc::new(InMemoryEventStore::default()))?;
    let assessment = planner
        .assess(&args.location, args.date, &args.event_type)
        .await?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&assessment).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        for line in render_assessment(&assessment) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn render_assessment(assessment: &DateAssessment) -> Vec<String> {
    let max_score = profile_for(&assessment.event_type).max_score();
    let mut lines = vec![format!(
        "{} in {} on {}",
        assessment.event_type, assessment.location, assessment.date
    )];

    match &assessment.weather {
        Some(weather) => lines.push(format!(
            "Forecast at {}: {:.1}°C, {}, {:.0}% chance of rain, wind {:.1} km/h",
            weather.time.format("%H:%M"),
            weather.temp,
            weather.condition,
            weather.precipitation_prob * 100.0,
            weather.wind_speed
        )),
        None => lines.push("Forecast: not available for this date".to_string()),
    }

    let suitability = &assessment.suitability;
    lines.push(format!("\nScore: {}/{}", suitability.score, max_score));
    if let Some(message) = &suitability.message {
        lines.push(format!("- {message}"));
    }
    for (criterion, detail) in &suitability.breakdown {
        lines.push(format!("- {}: {}", criterion.label(), detail));
    }

    let alternatives = &assessment.alternatives;
    lines.push(format!("\n{}", alternatives.message));
    let shown = alternatives.alternatives.iter().filter(|day| {
        alternatives.outcome == AlternativesOutcome::NoBetterDate || day.date != assessment.date
    });
    for day in shown {
        lines.push(format!(
            "- {}: {}/{} ({}, {}, wind {})",
            day.date, day.score, max_score, day.weather.temp, day.weather.condition, day.weather.wind
        ));
    }

    lines
}
