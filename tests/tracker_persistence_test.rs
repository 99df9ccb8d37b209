//! Tracker wired to the SQLite repositories and the JSON file slot.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use futures::StreamExt;
use tempfile::TempDir;

use journow_lib::{
    Clock, Config, Database, JsonFileTrackerDataStorage, Session, Task, Tracker, TrackerData,
    TrackerDataStorage, TrackerError,
};

struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    fn at(ms: i64) -> Self {
        Self(Mutex::new(millis(ms)))
    }

    fn set(&self, ms: i64) {
        *self.0.lock().unwrap() = millis(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

fn millis(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

struct App {
    db: Database,
    storage: Arc<JsonFileTrackerDataStorage>,
    clock: Arc<ManualClock>,
    tracker: Tracker,
}

fn open_app(config: &Config, clock: Arc<ManualClock>) -> App {
    let db = Database::new(config.database_path()).unwrap();
    let storage = Arc::new(JsonFileTrackerDataStorage::new(config.tracker_data_path()).unwrap());
    let tracker = Tracker::new(
        Arc::new(db.clone()),
        storage.clone(),
        clock.clone(),
        Arc::new(db.clone()),
    );
    App {
        db,
        storage,
        clock,
        tracker,
    }
}

fn setup() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(dir.path().join("data"));
    config.ensure_data_dir().unwrap();
    (dir, config)
}

#[tokio::test]
async fn test_start_stop_persists_session_with_task() {
    let (_dir, config) = setup();
    let app = open_app(&config, Arc::new(ManualClock::at(600_000)));

    let project = app.db.insert_project("journow").await.unwrap();
    let task = app.db.insert_task("test task", Some(project.id)).await.unwrap();

    app.tracker.start(task.id).await.unwrap();
    assert_eq!(
        app.storage.read().unwrap(),
        Some(TrackerData::new(task.id, millis(600_000)))
    );

    app.clock.set(12_000_000);
    let session = app.tracker.stop().await.unwrap();

    let stored = app.db.list_sessions().await.unwrap();
    assert_eq!(stored, vec![session]);
    assert_eq!(stored[0].task.as_ref().unwrap().project, Some(project));
    assert_eq!(stored[0].duration_ms(), 11_400_000);
    assert_eq!(app.storage.read().unwrap(), None);
}

#[tokio::test]
async fn test_deleted_task_yields_anonymous_session() {
    let (_dir, config) = setup();
    let app = open_app(&config, Arc::new(ManualClock::at(600_000)));
    let task = app.db.insert_task("short lived", None).await.unwrap();

    app.tracker.start(task.id).await.unwrap();
    assert!(app.db.delete_task(task.id).await.unwrap());
    assert!(app.tracker.current_task().next().await.is_none());

    app.clock.set(12_000_000);
    let session = app.tracker.stop().await.unwrap();

    assert!(session.is_anonymous());
    let anonymous = app.db.list_anonymous_sessions().await.unwrap();
    assert_eq!(anonymous.len(), 1);
    assert_eq!(anonymous[0].started_at, millis(600_000));
    assert_eq!(anonymous[0].ended_at, millis(12_000_000));
}

#[tokio::test]
async fn test_running_session_survives_restart() {
    let (_dir, config) = setup();
    let task_id = {
        let app = open_app(&config, Arc::new(ManualClock::at(600_000)));
        let task = app.db.insert_task("long haul", None).await.unwrap();
        app.tracker.start(task.id).await.unwrap();
        task.id
    };

    let app = open_app(&config, Arc::new(ManualClock::at(12_000_000)));
    let running: Vec<_> = app.tracker.is_running().collect().await;
    assert!(matches!(running.as_slice(), [Ok(true)]));

    let current: Vec<Task> = app
        .tracker
        .current_task()
        .map(|task| task.unwrap())
        .collect()
        .await;
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id, task_id);

    let session = app.tracker.stop().await.unwrap();
    assert_eq!(session.started_at, millis(600_000));
    assert_eq!(session.ended_at, millis(12_000_000));
}

#[tokio::test]
async fn test_stop_when_idle_writes_nothing() {
    let (_dir, config) = setup();
    let app = open_app(&config, Arc::new(ManualClock::at(0)));

    let err = app.tracker.stop().await.unwrap_err();

    assert!(matches!(err, TrackerError::NotRunning));
    assert!(app.db.list_sessions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_start_unknown_task_leaves_slot_empty() {
    let (_dir, config) = setup();
    let app = open_app(&config, Arc::new(ManualClock::at(0)));

    let err = app.tracker.start(15).await.unwrap_err();

    assert!(matches!(err, TrackerError::NoSuchTask(15)));
    assert!(!config.tracker_data_path().exists());
}

#[tokio::test]
async fn test_session_insert_is_announced() {
    let (_dir, config) = setup();
    let app = open_app(&config, Arc::new(ManualClock::at(1_000)));
    let task = app.db.insert_task("observed", None).await.unwrap();
    let mut events = app.db.subscribe();

    app.tracker.start(task.id).await.unwrap();
    app.clock.set(2_000);
    let session: Session = app.tracker.stop().await.unwrap();

    let event = events.recv().await.unwrap();
    assert_eq!(
        event,
        journow_lib::DataEvent::SessionInserted {
            session_id: session.id
        }
    );
}
