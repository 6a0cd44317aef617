//! Rule-based weather suitability scoring and alternative-date ranking.

pub mod alternatives;
pub mod profiles;
pub mod scorer;

pub use alternatives::{
    find_alternatives, rank_days, AlternativesOutcome, AlternativesReport, DaySummary, RankedDay,
};
pub use profiles::{known_event_types, profile_for, EventTypeProfile, DEFAULT_EVENT_TYPE};
pub use scorer::{score_day, score_optional, weather_on, Criterion, SuitabilityResult};
