use std::future::Future;

use reqwest::StatusCode;
use tracing::warn;

use super::normalizer::RawForecast;
use super::ForecastError;
use crate::config::WeatherConfig;

/// Source of raw 5-day / 3-hour forecasts, queried by free-form location.
pub trait ForecastProvider: Send + Sync {
    fn fetch_forecast(
        &self,
        location: &str,
    ) -> impl Future<Output = Result<RawForecast, ForecastError>> + Send;
}

/// OpenWeatherMap forecast client.
///
/// A failed request is surfaced immediately; there is no retry.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn forecast_url(&self) -> String {
        format!("{}/data/2.5/forecast", self.base_url)
    }
}

impl ForecastProvider for OpenWeatherClient {
    async fn fetch_forecast(&self, location: &str) -> Result<RawForecast, ForecastError> {
        let response = self
            .client
            .get(self.forecast_url())
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|err| {
                warn!(%location, error = %err, "forecast request failed");
                ForecastError::ServiceUnavailable
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(ForecastError::LocationNotFound(location.to_string())),
            StatusCode::UNAUTHORIZED => {
                warn!("forecast provider rejected the configured API key");
                return Err(ForecastError::InvalidCredentials);
            }
            status => {
                warn!(%location, %status, "forecast provider returned an error status");
                return Err(ForecastError::ServiceUnavailable);
            }
        }

        response.json::<RawForecast>().await.map_err(|err| {
            warn!(%location, error = %err, "forecast payload could not be decoded");
            ForecastError::ServiceUnavailable
        })
    }
}
