use std::sync::Arc;

use tracing::{debug, info};

use super::cache::{CacheKey, ForecastCache};
use super::normalizer::normalize;
use super::provider::ForecastProvider;
use super::{DailyWeather, ForecastError};

/// Serves daily forecasts from the cache, fetching upstream on a miss.
pub struct ForecastService<P> {
    provider: P,
    cache: Arc<ForecastCache>,
}

impl<P: ForecastProvider> ForecastService<P> {
    pub fn new(provider: P, cache: Arc<ForecastCache>) -> Self {
        Self { provider, cache }
    }

    pub fn cache(&self) -> &ForecastCache {
        &self.cache
    }

    /// Daily forecast for `location`, oldest date first.
    ///
    /// Concurrent misses for the same location each go upstream; fetches are
    /// not coalesced.
    pub async fn daily_forecast(&self, location: &str) -> Result<Vec<DailyWeather>, ForecastError> {
        let key = CacheKey::weather(location);
        if let Some(cached) = self.cache.get(&key) {
            debug!(%location, "forecast cache hit");
            return Ok(cached);
        }

        info!(%location, "fetching forecast from upstream");
        let raw = self.provider.fetch_forecast(location).await?;
        let daily = normalize(&raw);
        debug!(%location, days = daily.len(), "normalized forecast");

        self.cache.set(key, daily.clone());
        Ok(daily)
    }
}
