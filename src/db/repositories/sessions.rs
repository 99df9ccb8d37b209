use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, Row};

use crate::{
    db::{
        connection::Database,
        events::DataEvent,
        helpers::{format_datetime, parse_datetime, row_to_task},
    },
    models::{Session, TaskId},
    tracker::SessionRepository,
};

const SELECT_SESSIONS: &str = "SELECT s.session_id, s.started_at, s.ended_at,
        t.task_id, t.title, p.project_id, p.name
     FROM session s
     LEFT JOIN task t ON t.task_id = s.task_id
     LEFT JOIN project p ON p.project_id = t.project_id";

fn row_to_session(row: &Row) -> Result<Session> {
    let started_at: String = row.get(1)?;
    let ended_at: String = row.get(2)?;
    let task_id: Option<TaskId> = row.get(3)?;

    Ok(Session {
        id: row.get(0)?,
        started_at: parse_datetime(&started_at, "started_at")?,
        ended_at: parse_datetime(&ended_at, "ended_at")?,
        task: match task_id {
            Some(_) => Some(row_to_task(row, 3)?),
            None => None,
        },
    })
}

fn query_sessions(conn: &Connection, filter: &str) -> Result<Vec<Session>> {
    let sql = format!("{SELECT_SESSIONS} {filter} ORDER BY s.started_at DESC");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;

    let mut sessions = Vec::new();
    while let Some(row) = rows.next()? {
        sessions.push(row_to_session(row)?);
    }
    Ok(sessions)
}

impl Database {
    pub async fn insert_session(&self, session: &Session) -> Result<()> {
        let record = session.clone();
        let session_id = record.id.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO session (session_id, started_at, ended_at, task_id)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.id,
                    format_datetime(&record.started_at),
                    format_datetime(&record.ended_at),
                    record.task.as_ref().map(|task| task.id),
                ],
            )
            .context("failed to insert session")?;
            Ok(())
        })
        .await?;

        self.publish(DataEvent::SessionInserted { session_id });
        Ok(())
    }

    /// All sessions, newest first.
    pub async fn list_sessions(&self) -> Result<Vec<Session>> {
        self.execute(|conn| query_sessions(conn, "")).await
    }

    /// Sessions whose task was deleted while they were tracked or afterwards.
    pub async fn list_anonymous_sessions(&self) -> Result<Vec<Session>> {
        self.execute(|conn| query_sessions(conn, "WHERE s.task_id IS NULL"))
            .await
    }

    /// Attach a session, typically an anonymous one, to an existing task.
    pub async fn assign_session_task(&self, session_id: &str, task_id: TaskId) -> Result<()> {
        let id = session_id.to_string();
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let task_exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM task WHERE task_id = ?1)",
                params![task_id],
                |row| row.get(0),
            )?;
            if !task_exists {
                bail!("task {task_id} does not exist");
            }

            let rows = tx
                .execute(
                    "UPDATE session SET task_id = ?1 WHERE session_id = ?2",
                    params![task_id, id],
                )
                .context("failed to reassign session")?;
            if rows == 0 {
                bail!("session {id} not found");
            }

            tx.commit()?;
            Ok(())
        })
        .await?;

        self.publish(DataEvent::SessionUpdated {
            session_id: session_id.to_string(),
        });
        Ok(())
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<bool> {
        let id = session_id.to_string();
        let deleted = self
            .execute(move |conn| {
                let rows = conn
                    .execute("DELETE FROM session WHERE session_id = ?1", params![id])
                    .context("failed to delete session")?;
                Ok(rows > 0)
            })
            .await?;

        if deleted {
            self.publish(DataEvent::SessionDeleted {
                session_id: session_id.to_string(),
            });
        }
        Ok(deleted)
    }
}

#[async_trait]
impl SessionRepository for Database {
    async fn insert(&self, session: &Session) -> Result<()> {
        self.insert_session(session).await
    }
}
