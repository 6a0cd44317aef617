/// Failure modes when retrieving a forecast from the upstream provider.
///
/// Messages are user-facing; upstream response bodies are never included.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForecastError {
    #[error("Location '{0}' not found.")]
    LocationNotFound(String),
    #[error("Invalid API Key.")]
    InvalidCredentials,
    #[error("Weather service is currently unavailable.")]
    ServiceUnavailable,
}
