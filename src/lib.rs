//! journow: a personal time tracker.
//!
//! The [`tracker::Tracker`] turns start/stop commands into durable sessions,
//! backed by a single-slot [`tracker::TrackerDataStorage`] that survives
//! restarts. [`db::Database`] provides the SQLite task and session repositories.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod tracker;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use db::{DataEvent, Database};
pub use error::{TrackerError, TrackerResult};
pub use models::{Project, ProjectId, Session, Task, TaskId, TrackerData};
pub use tracker::{
    Clock, JsonFileTrackerDataStorage, MemoryTrackerDataStorage, SessionLogger,
    SessionRepository, SystemClock, TaskRepository, Tracker, TrackerDataStorage, TrackerStatus,
};
pub use utils::init_logging;
