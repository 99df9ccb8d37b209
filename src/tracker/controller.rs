use std::sync::Arc;

use futures::{
    future,
    stream::{self, BoxStream},
    Stream, StreamExt,
};
use tokio::sync::Mutex;

use crate::{
    error::{TrackerError, TrackerResult},
    log_debug, log_info, log_warn,
    models::{Session, Task, TaskId, TrackerData},
};

use super::{
    ports::{Clock, SessionRepository, TaskRepository, TrackerDataStorage},
    TrackerStatus,
};

const ENABLE_LOGS: bool = true;

/// Turns start/stop commands plus a clock into durable tracking sessions.
///
/// Whether a session is running is decided by the storage slot alone; the
/// tracker keeps no state of its own beyond its collaborators. Cloning is cheap
/// and clones share the same transition lock.
#[derive(Clone)]
pub struct Tracker {
    inner: Arc<TrackerInner>,
}

struct TrackerInner {
    tasks: Arc<dyn TaskRepository>,
    storage: Arc<dyn TrackerDataStorage>,
    clock: Arc<dyn Clock>,
    sessions: Arc<dyn SessionRepository>,
    // Serialises the read-modify-write of the storage slot in start/stop.
    transition: Mutex<()>,
}

impl TrackerInner {
    fn stored(&self) -> TrackerResult<Option<TrackerData>> {
        self.storage.read().map_err(TrackerError::Storage)
    }

    /// Resolve-or-absent: a missing task is `Ok(None)`, only I/O failures are errors.
    async fn resolve_task(&self, task_id: TaskId) -> TrackerResult<Option<Task>> {
        self.tasks
            .find_by_id(task_id)
            .await
            .map_err(TrackerError::Repository)
    }

    async fn current_task(&self) -> TrackerResult<Option<Task>> {
        match self.stored()? {
            Some(data) => self.resolve_task(data.task_id).await,
            None => Ok(None),
        }
    }

    fn elapsed_ms(&self) -> TrackerResult<i64> {
        let data = self.stored()?.ok_or(TrackerError::NotRunning)?;
        let elapsed = data.elapsed_ms(self.clock.now());
        log_debug!("Tick: {} ms elapsed on task {}", elapsed, data.task_id);
        Ok(elapsed)
    }
}

impl Tracker {
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        storage: Arc<dyn TrackerDataStorage>,
        clock: Arc<dyn Clock>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                tasks,
                storage,
                clock,
                sessions,
                transition: Mutex::new(()),
            }),
        }
    }

    pub fn status(&self) -> TrackerResult<TrackerStatus> {
        self.inner.stored().map(TrackerStatus::from_stored)
    }

    /// Begin tracking `task_id`. Nothing is written unless the task exists and
    /// no other session is running.
    pub async fn start(&self, task_id: TaskId) -> TrackerResult<TrackerData> {
        let _guard = self.inner.transition.lock().await;

        if let Some(current) = self.inner.stored()? {
            log_warn!(
                "Refusing to start task {}: task {} is already being tracked",
                task_id,
                current.task_id
            );
            return Err(TrackerError::AlreadyRunning(current.task_id));
        }

        if self.inner.resolve_task(task_id).await?.is_none() {
            log_warn!("Refusing to start unknown task {}", task_id);
            return Err(TrackerError::NoSuchTask(task_id));
        }

        let data = TrackerData::new(task_id, self.inner.clock.now());
        self.inner
            .storage
            .write(&data)
            .map_err(TrackerError::Storage)?;

        log_info!("Started tracking task {} at {}", task_id, data.start_time);
        Ok(data)
    }

    /// Close the running session and hand it to the session repository.
    ///
    /// A task deleted since `start` does not fail the stop: the session is
    /// kept as anonymous. The slot is cleared only after the session is
    /// persisted, so a failed insert leaves the tracker running.
    pub async fn stop(&self) -> TrackerResult<Session> {
        let _guard = self.inner.transition.lock().await;

        let data = self.inner.stored()?.ok_or(TrackerError::NotRunning)?;
        let task = self.inner.resolve_task(data.task_id).await?;
        let ended_at = self.inner.clock.now();

        let session = Session::new(data.start_time, ended_at, task);
        if session.is_anonymous() {
            log_warn!(
                "Task {} no longer exists; recording session {} as anonymous",
                data.task_id,
                session.id
            );
        }

        self.inner
            .sessions
            .insert(&session)
            .await
            .map_err(TrackerError::Repository)?;
        self.inner.storage.clear().map_err(TrackerError::Storage)?;

        log_info!(
            "Stopped tracking task {} after {} ms (session {})",
            data.task_id,
            session.duration_ms(),
            session.id
        );
        Ok(session)
    }

    /// Emits the tracked task once, or nothing when idle or when the task has
    /// been deleted. Evaluated when first polled.
    pub fn current_task(&self) -> BoxStream<'static, TrackerResult<Task>> {
        let inner = self.inner.clone();
        stream::once(async move { inner.current_task().await })
            .filter_map(|result| future::ready(result.transpose()))
            .boxed()
    }

    /// Emits a single `true`/`false`, evaluated when first polled.
    pub fn is_running(&self) -> BoxStream<'static, TrackerResult<bool>> {
        let inner = self.inner.clone();
        stream::once(async move { inner.stored().map(|data| data.is_some()) }).boxed()
    }

    /// Maps each tick to the milliseconds elapsed since the session started.
    ///
    /// Fails immediately with `NotRunning` when idle. Storage is re-read on
    /// every tick; if the session has been stopped meanwhile the stream yields
    /// one `Err(NotRunning)` and ends.
    pub fn time_elapsed<S>(&self, ticks: S) -> TrackerResult<BoxStream<'static, TrackerResult<i64>>>
    where
        S: Stream + Send + 'static,
    {
        if self.inner.stored()?.is_none() {
            return Err(TrackerError::NotRunning);
        }

        let inner = self.inner.clone();
        let elapsed = ticks
            .map(move |_| inner.elapsed_ms())
            .scan(false, |finished, item| {
                if *finished {
                    return future::ready(None);
                }
                *finished = item.is_err();
                future::ready(Some(item))
            });

        Ok(elapsed.boxed())
    }
}
