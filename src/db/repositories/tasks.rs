use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    db::{connection::Database, events::DataEvent, helpers::row_to_task},
    models::{ProjectId, Task, TaskId},
    tracker::TaskRepository,
};

fn query_task(conn: &Connection, task_id: TaskId) -> Result<Option<Task>> {
    conn.query_row(
        "SELECT t.task_id, t.title, p.project_id, p.name
         FROM task t
         LEFT JOIN project p ON p.project_id = t.project_id
         WHERE t.task_id = ?1",
        params![task_id],
        |row| row_to_task(row, 0),
    )
    .optional()
    .context("failed to query task")
}

impl Database {
    pub async fn insert_task(
        &self,
        title: impl Into<String>,
        project_id: Option<ProjectId>,
    ) -> Result<Task> {
        let title = title.into();
        let task = self
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO task (title, project_id) VALUES (?1, ?2)",
                    params![title, project_id],
                )
                .context("failed to insert task")?;

                let task_id = conn.last_insert_rowid();
                query_task(conn, task_id)?
                    .ok_or_else(|| anyhow!("task {task_id} not found after insert"))
            })
            .await?;

        self.publish(DataEvent::TaskInserted { task_id: task.id });
        Ok(task)
    }

    pub async fn find_task(&self, task_id: TaskId) -> Result<Option<Task>> {
        self.execute(move |conn| query_task(conn, task_id)).await
    }

    /// Returns `false` when there was no such task. Sessions tracked against
    /// the task become anonymous.
    pub async fn delete_task(&self, task_id: TaskId) -> Result<bool> {
        let deleted = self
            .execute(move |conn| {
                let rows = conn
                    .execute("DELETE FROM task WHERE task_id = ?1", params![task_id])
                    .context("failed to delete task")?;
                Ok(rows > 0)
            })
            .await?;

        if deleted {
            self.publish(DataEvent::TaskDeleted { task_id });
        }
        Ok(deleted)
    }
}

#[async_trait]
impl TaskRepository for Database {
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>> {
        self.find_task(id).await
    }
}
