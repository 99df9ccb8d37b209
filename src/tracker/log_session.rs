use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    error::{TrackerError, TrackerResult},
    log_info,
    models::{Session, TaskId},
};

use super::ports::{SessionRepository, TaskRepository};

const ENABLE_LOGS: bool = true;

/// Records time worked without running the tracker, e.g. time the user forgot
/// to start a timer for.
#[derive(Clone)]
pub struct SessionLogger {
    tasks: Arc<dyn TaskRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl SessionLogger {
    pub fn new(tasks: Arc<dyn TaskRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { tasks, sessions }
    }

    pub async fn log(
        &self,
        task_id: TaskId,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> TrackerResult<Session> {
        if ended_at < started_at {
            return Err(TrackerError::InvalidInterval {
                started_at,
                ended_at,
            });
        }

        let task = self
            .tasks
            .find_by_id(task_id)
            .await
            .map_err(TrackerError::Repository)?
            .ok_or(TrackerError::NoSuchTask(task_id))?;

        let session = Session::new(started_at, ended_at, Some(task));
        self.sessions
            .insert(&session)
            .await
            .map_err(TrackerError::Repository)?;

        log_info!(
            "Logged {} ms on task {} (session {})",
            session.duration_ms(),
            task_id,
            session.id
        );
        Ok(session)
    }
}
