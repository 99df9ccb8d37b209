use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Task;

/// A completed interval of tracked time.
///
/// `task` is `None` for an anonymous session: the task it was tracked against
/// no longer existed when the session was closed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub task: Option<Task>,
}

impl Session {
    pub fn new(started_at: DateTime<Utc>, ended_at: DateTime<Utc>, task: Option<Task>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at,
            ended_at,
            task,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.task.is_none()
    }

    pub fn duration_ms(&self) -> i64 {
        (self.ended_at - self.started_at).num_milliseconds()
    }
}
