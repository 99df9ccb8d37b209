use anyhow::{anyhow, Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::{
    db::{connection::Database, events::DataEvent},
    models::{Project, ProjectId},
};

impl Database {
    pub async fn insert_project(&self, name: impl Into<String>) -> Result<Project> {
        let name = name.into();
        let project = self
            .execute(move |conn| {
                conn.execute("INSERT INTO project (name) VALUES (?1)", params![name])
                    .context("failed to insert project")?;
                Ok(Project {
                    id: conn.last_insert_rowid(),
                    name,
                })
            })
            .await?;

        self.publish(DataEvent::ProjectInserted {
            project_id: project.id,
        });
        Ok(project)
    }

    pub async fn find_project(&self, project_id: ProjectId) -> Result<Option<Project>> {
        self.execute(move |conn| {
            conn.query_row(
                "SELECT project_id, name FROM project WHERE project_id = ?1",
                params![project_id],
                |row| {
                    Ok(Project {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(|err| anyhow!(err).context("failed to query project"))
        })
        .await
    }
}
