use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::domain::{Event, EventId, NewEvent};

/// Storage abstraction so the planner can be exercised without a filesystem.
pub trait EventStore: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<Event>, StoreError>> + Send;

    /// Persists a new event under a freshly generated identifier.
    fn append(&self, event: NewEvent) -> impl Future<Output = Result<Event, StoreError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("event store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("event store contains invalid data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Events kept as a pretty-printed JSON array in a single file.
///
/// A missing file reads as an empty list. Appends are serialized so
/// concurrent requests cannot lose each other's writes.
#[derive(Debug)]
pub struct JsonFileEventStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFileEventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Event>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_all(&self, events: &[Event]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(events)?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}

impl EventStore for JsonFileEventStore {
    async fn list(&self) -> Result<Vec<Event>, StoreError> {
        self.read_all().await
    }

    async fn append(&self, event: NewEvent) -> Result<Event, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.read_all().await?;
        let event = event.with_id(EventId::generate());
        events.push(event.clone());
        self.write_all(&events).await?;
        debug!(id = %event.id, path = %self.path.display(), "event persisted");
        Ok(event)
    }
}

/// Volatile store for tests and one-off CLI runs.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: Mutex<Vec<Event>>,
}

impl EventStore for InMemoryEventStore {
    async fn list(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn append(&self, event: NewEvent) -> Result<Event, StoreError> {
        let event = event.with_id(EventId::generate());
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(event)
    }
}
