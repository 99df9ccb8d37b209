use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use crate::models::{Project, ProjectId, Task, TaskId};

/// Fixed-width UTC form so stored timestamps sort correctly as text.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

/// Reads `task_id, title, project_id, project name` starting at column `offset`.
pub fn row_to_task(row: &Row, offset: usize) -> rusqlite::Result<Task> {
    let project_id: Option<ProjectId> = row.get(offset + 2)?;
    let project_name: Option<String> = row.get(offset + 3)?;

    Ok(Task {
        id: row.get::<_, TaskId>(offset)?,
        title: row.get(offset + 1)?,
        project: match (project_id, project_name) {
            (Some(id), Some(name)) => Some(Project { id, name }),
            _ => None,
        },
    })
}
