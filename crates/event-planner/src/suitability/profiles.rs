use serde::Serialize;

/// Profile used whenever an event type has no entry of its own.
pub const DEFAULT_EVENT_TYPE: &str = "Outdoor Sports";

/// Inclusive ideal temperature band in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureRule {
    pub ideal_min: f64,
    pub ideal_max: f64,
    pub points: u32,
}

/// Upper bound that a reading must not exceed to earn its points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CeilingRule {
    pub max: f64,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionRule {
    pub ideal: &'static [&'static str],
    pub points: u32,
}

/// Weather rule set for one event type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventTypeProfile {
    pub event_type: &'static str,
    pub temperature: TemperatureRule,
    /// Maximum precipitation chance, in percent.
    pub precipitation: CeilingRule,
    /// Maximum wind speed, in km/h.
    pub wind: CeilingRule,
    pub condition: ConditionRule,
}

impl EventTypeProfile {
    pub fn max_score(&self) -> u32 {
        self.temperature.points + self.precipitation.points + self.wind.points + self.condition.points
    }
}

static PROFILES: [EventTypeProfile; 3] = [
    EventTypeProfile {
        event_type: DEFAULT_EVENT_TYPE,
        temperature: TemperatureRule {
            ideal_min: 15.0,
            ideal_max: 30.0,
            points: 30,
        },
        precipitation: CeilingRule {
            max: 20.0,
            points: 25,
        },
        wind: CeilingRule {
            max: 20.0,
            points: 20,
        },
        condition: ConditionRule {
            ideal: &["Clear", "Clouds"],
            points: 25,
        },
    },
    EventTypeProfile {
        event_type: "Wedding",
        temperature: TemperatureRule {
            ideal_min: 18.0,
            ideal_max: 28.0,
            points: 30,
        },
        precipitation: CeilingRule {
            max: 10.0,
            points: 30,
        },
        wind: CeilingRule {
            max: 15.0,
            points: 25,
        },
        condition: ConditionRule {
            ideal: &["Clear", "Clouds"],
            points: 15,
        },
    },
    EventTypeProfile {
        event_type: "Hiking Trip",
        temperature: TemperatureRule {
            ideal_min: 10.0,
            ideal_max: 25.0,
            points: 30,
        },
        precipitation: CeilingRule {
            max: 30.0,
            points: 25,
        },
        wind: CeilingRule {
            max: 25.0,
            points: 20,
        },
        condition: ConditionRule {
            ideal: &["Clear", "Clouds", "Mist"],
            points: 25,
        },
    },
];

/// Looks up the profile for an event type.
///
/// Unknown event types silently use the [`DEFAULT_EVENT_TYPE`] profile;
/// callers rely on that instead of an error.
pub fn profile_for(event_type: &str) -> &'static EventTypeProfile {
    PROFILES
        .iter()
        .find(|profile| profile.event_type == event_type)
        .unwrap_or(&PROFILES[0])
}

pub fn known_event_types() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|profile| profile.event_type)
}
