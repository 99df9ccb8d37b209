pub mod session;
pub mod task;
pub mod tracker_data;

pub use session::Session;
pub use task::{Project, ProjectId, Task, TaskId};
pub use tracker_data::TrackerData;
