//! Errors surfaced by the tracking core.
//!
//! Collaborators (storage, repositories, the database worker) report failures
//! as `anyhow::Error`; the tracker wraps them in [`TrackerError::Storage`] or
//! [`TrackerError::Repository`] so callers can tell an I/O failure apart from
//! an empty tracker.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::TaskId;

#[derive(Error, Debug)]
pub enum TrackerError {
    /// `start` or a manual log referenced a task that does not resolve.
    #[error("Task identified with [id={0}] does not exist")]
    NoSuchTask(TaskId),

    /// `stop` (or elapsed-time sampling) was requested while no session is running.
    #[error("tracker is not running")]
    NotRunning,

    /// `start` was requested while a session is already running.
    #[error("tracker is already running for task {0}")]
    AlreadyRunning(TaskId),

    #[error("session cannot end ({ended_at}) before it starts ({started_at})")]
    InvalidInterval {
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    },

    #[error("tracker storage failure: {0:#}")]
    Storage(anyhow::Error),

    #[error("repository failure: {0:#}")]
    Repository(anyhow::Error),
}

pub type TrackerResult<T> = std::result::Result<T, TrackerError>;
