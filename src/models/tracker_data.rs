use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TaskId;

/// Durable descriptor of the in-progress session. At most one exists at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerData {
    pub task_id: TaskId,
    pub start_time: DateTime<Utc>,
}

impl TrackerData {
    pub fn new(task_id: TaskId, start_time: DateTime<Utc>) -> Self {
        Self {
            task_id,
            start_time,
        }
    }

    /// Milliseconds between the session start and `now`.
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start_time).num_milliseconds()
    }
}
