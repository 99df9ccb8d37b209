//! Collaborators the tracker depends on.
//!
//! Each one is injected as a trait object so tests can swap in fakes and the
//! application can plug in SQLite and file-backed implementations.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Session, Task, TaskId, TrackerData};

/// Source of the current instant. Monotonicity across a start/stop pair is the
/// clock's responsibility.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a completed session and notify downstream listeners.
    async fn insert(&self, session: &Session) -> Result<()>;
}

/// Durable single slot for the in-progress session.
///
/// `write` replaces whatever is stored; the slot never holds more than one value.
/// Implementations must survive process restarts.
pub trait TrackerDataStorage: Send + Sync {
    fn read(&self) -> Result<Option<TrackerData>>;
    fn write(&self, data: &TrackerData) -> Result<()>;
    fn clear(&self) -> Result<()>;
}
