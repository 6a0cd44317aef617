//! Time-expiring in-memory cache for normalized forecasts.
//!
//! Entries expire a fixed TTL after they are written. Expiry is checked
//! lazily on lookup; there is no background sweep. The cache is unbounded
//! unless a maximum entry count is configured, in which case expired entries
//! are purged first and then the least recently used entry is evicted.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::DailyWeather;

/// Namespaced cache key derived from a location string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key in the `weather` namespace; case-insensitive on the location.
    pub fn weather(location: &str) -> Self {
        Self(format!("weather_{}", location.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// `None` when the TTL overflows the clock; such entries never expire.
    expires_at: Option<Instant>,
    last_access: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }
}

/// Generic TTL cache guarded by a mutex that is never held across an await.
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    max_entries: Option<usize>,
    entries: Mutex<HashMap<CacheKey, CacheEntry<V>>>,
}

/// Cache of daily forecasts keyed by location.
pub type ForecastCache = TtlCache<Vec<DailyWeather>>;

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            max_entries: None,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Caps the number of live entries. A bound of zero is ignored.
    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries.filter(|max| *max > 0);
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &CacheKey) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn set(&self, key: CacheKey, value: V) {
        self.set_at(key, value, Instant::now());
    }

    pub fn get_at(&self, key: &CacheKey, now: Instant) -> Option<V> {
        let mut entries = self.lock();
        let entry = entries.get_mut(key)?;
        if entry.is_expired(now) {
            entries.remove(key);
            return None;
        }
        entry.last_access = now;
        Some(entry.value.clone())
    }

    pub fn set_at(&self, key: CacheKey, value: V, now: Instant) {
        let mut entries = self.lock();
        if let Some(max) = self.max_entries {
            if !entries.contains_key(&key) && entries.len() >= max {
                entries.retain(|_, entry| !entry.is_expired(now));
                if entries.len() >= max {
                    evict_least_recent(&mut entries);
                }
            }
        }
        entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: now.checked_add(self.ttl),
                last_access: now,
            },
        );
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, including expired ones not yet looked up.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn evict_least_recent<V>(entries: &mut HashMap<CacheKey, CacheEntry<V>>) {
    let oldest = entries
        .iter()
        .min_by_key(|(_, entry)| entry.last_access)
        .map(|(key, _)| key.clone());
    if let Some(key) = oldest {
        entries.remove(&key);
    }
}
