use serde::Serialize;

use crate::models::{ProjectId, TaskId};

/// Change notification published after a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DataEvent {
    #[serde(rename_all = "camelCase")]
    ProjectInserted { project_id: ProjectId },
    #[serde(rename_all = "camelCase")]
    TaskInserted { task_id: TaskId },
    #[serde(rename_all = "camelCase")]
    TaskDeleted { task_id: TaskId },
    #[serde(rename_all = "camelCase")]
    SessionInserted { session_id: String },
    #[serde(rename_all = "camelCase")]
    SessionUpdated { session_id: String },
    #[serde(rename_all = "camelCase")]
    SessionDeleted { session_id: String },
}
