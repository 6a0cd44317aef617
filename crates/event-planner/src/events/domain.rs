use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Process-unique event identifier (UUID v4 text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored event as exposed through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub event_type: String,
}

/// Unvalidated create-event payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
}

/// Validated event awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub event_type: String,
}

impl NewEvent {
    pub fn with_id(self, id: EventId) -> Event {
        Event {
            id,
            name: self.name,
            location: self.location,
            date: self.date,
            event_type: self.event_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required event details.")]
    MissingFields(Vec<&'static str>),
    #[error("Invalid event date '{0}': expected YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("Invalid event payload: expected a JSON object with string fields.")]
    MalformedPayload,
}

impl EventSubmission {
    pub fn validate(self) -> Result<NewEvent, ValidationError> {
        let mut missing = Vec::new();
        let name = required(self.name, "name", &mut missing);
        let location = required(self.location, "location", &mut missing);
        let date = required(self.date, "date", &mut missing);
        let event_type = required(self.event_type, "eventType", &mut missing);

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date.clone()))?;

        Ok(NewEvent {
            name,
            location,
            date,
            event_type,
        })
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match value.map(|raw| raw.trim().to_string()) {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(field);
            String::new()
        }
    }
}
