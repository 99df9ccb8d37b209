use serde::Serialize;

use crate::models::{TaskId, TrackerData};

/// Tracker state as derived from the storage slot. Never cached; every call to
/// `Tracker::status` re-reads storage.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", tag = "status", content = "data")]
pub enum TrackerStatus {
    #[default]
    Idle,
    Running(TrackerData),
}

impl TrackerStatus {
    pub fn from_stored(data: Option<TrackerData>) -> Self {
        match data {
            Some(data) => TrackerStatus::Running(data),
            None => TrackerStatus::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TrackerStatus::Running(_))
    }

    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            TrackerStatus::Running(data) => Some(data.task_id),
            TrackerStatus::Idle => None,
        }
    }

    pub fn data(&self) -> Option<&TrackerData> {
        match self {
            TrackerStatus::Running(data) => Some(data),
            TrackerStatus::Idle => None,
        }
    }
}
