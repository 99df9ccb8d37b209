pub mod controller;
pub mod log_session;
pub mod ports;
pub mod state;
pub mod storage;
pub mod ticks;

pub use controller::Tracker;
pub use log_session::SessionLogger;
pub use ports::{Clock, SessionRepository, SystemClock, TaskRepository, TrackerDataStorage};
pub use state::TrackerStatus;
pub use storage::{JsonFileTrackerDataStorage, MemoryTrackerDataStorage};
pub use ticks::interval_ticks;
