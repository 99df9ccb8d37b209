//! In-memory fakes for the tracker's collaborators.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::{
    models::{Session, Task, TaskId, TrackerData},
    tracker::{Clock, SessionRepository, TaskRepository, TrackerDataStorage},
};

pub fn millis(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

/// Hands out queued instants in order, then keeps repeating the last one.
#[derive(Debug, Default)]
pub struct SequenceClock {
    queue: Mutex<VecDeque<DateTime<Utc>>>,
    last: Mutex<Option<DateTime<Utc>>>,
    reads: AtomicUsize,
}

impl SequenceClock {
    pub fn new(instants: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        Self {
            queue: Mutex::new(instants.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn fixed(instant: DateTime<Utc>) -> Self {
        Self::new([instant])
    }

    pub fn push(&self, instant: DateTime<Utc>) {
        self.queue.lock().unwrap().push_back(instant);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for SequenceClock {
    fn now(&self) -> DateTime<Utc> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.queue.lock().unwrap().pop_front() {
            *last = Some(next);
        }
        last.unwrap_or_else(|| millis(0))
    }
}

#[derive(Debug, Default)]
pub struct FakeTaskRepository {
    tasks: Mutex<HashMap<TaskId, Task>>,
    failing: AtomicBool,
}

impl FakeTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(task: Task) -> Self {
        let repo = Self::new();
        repo.insert(task);
        repo
    }

    pub fn insert(&self, task: Task) {
        self.tasks.lock().unwrap().insert(task.id, task);
    }

    pub fn remove(&self, id: TaskId) {
        self.tasks.lock().unwrap().remove(&id);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl TaskRepository for FakeTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("task store unavailable"));
        }
        Ok(self.tasks.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Debug, Default)]
pub struct RecordingSessionRepository {
    inserted: Mutex<Vec<Session>>,
    failing: AtomicBool,
}

impl RecordingSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inserted(&self) -> Vec<Session> {
        self.inserted.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionRepository for RecordingSessionRepository {
    async fn insert(&self, session: &Session) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("session store unavailable"));
        }
        self.inserted.lock().unwrap().push(session.clone());
        Ok(())
    }
}

/// Storage whose every operation fails.
#[derive(Debug, Default)]
pub struct BrokenStorage;

impl TrackerDataStorage for BrokenStorage {
    fn read(&self) -> Result<Option<TrackerData>> {
        Err(anyhow!("preferences backend unavailable"))
    }

    fn write(&self, _data: &TrackerData) -> Result<()> {
        Err(anyhow!("preferences backend unavailable"))
    }

    fn clear(&self) -> Result<()> {
        Err(anyhow!("preferences backend unavailable"))
    }
}
