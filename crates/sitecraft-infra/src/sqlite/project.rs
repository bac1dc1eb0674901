//! SQLite-backed `ProjectRepository`: the permanent store a commit migrates
//! a draft into exactly once (§4.E step 6).
//!
//! `config_json` is persisted as a `TEXT` column holding the already
//! canonicalized JSON string rather than SQLite's non-existent native
//! `jsonb` type.

use chrono::{DateTime, Utc};
use sqlx::Row;

use sitecraft_core::repository::project::ProjectRepository;
use sitecraft_types::error::RepositoryError;
use sitecraft_types::ids::{ConfigId, DraftId, ProjectId};
use sitecraft_types::project::{Owner, Project, ProjectConfig, ProjectStatus};

use super::pool::DatabasePool;

pub struct SqliteProjectRepository {
    pool: DatabasePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ProjectRow {
    id: String,
    owner_user_id: String,
    owner_tenant_id: Option<String>,
    draft_id: String,
    status: String,
    created_at: String,
    updated_at: String,
}

impl ProjectRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_user_id: row.try_get("owner_user_id")?,
            owner_tenant_id: row.try_get("owner_tenant_id")?,
            draft_id: row.try_get("draft_id")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_project(self) -> Result<Project, RepositoryError> {
        let project_id: ProjectId = self
            .id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid project id: {e}")))?;
        let draft_id: DraftId = self
            .draft_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid draft id: {e}")))?;
        let status: ProjectStatus = self.status.parse().map_err(RepositoryError::Query)?;

        Ok(Project {
            project_id,
            owner: Owner {
                user_id: self.owner_user_id,
                tenant_id: self.owner_tenant_id,
            },
            draft_id,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
            status,
        })
    }
}

struct ProjectConfigRow {
    id: String,
    project_id: String,
    schema_version: i64,
    config_version: String,
    template_id: String,
    template_version: i64,
    config_json: String,
    config_hash: String,
    created_at: String,
}

impl ProjectConfigRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            project_id: row.try_get("project_id")?,
            schema_version: row.try_get("schema_version")?,
            config_version: row.try_get("config_version")?,
            template_id: row.try_get("template_id")?,
            template_version: row.try_get("template_version")?,
            config_json: row.try_get("config_json")?,
            config_hash: row.try_get("config_hash")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_project_config(self) -> Result<ProjectConfig, RepositoryError> {
        let config_id: ConfigId = self
            .id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid config id: {e}")))?;
        let project_id: ProjectId = self
            .project_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid project id: {e}")))?;
        let config_json = serde_json::from_str(&self.config_json)
            .map_err(|e| RepositoryError::Query(format!("invalid config JSON: {e}")))?;

        Ok(ProjectConfig {
            config_id,
            project_id,
            schema_version: self.schema_version as u32,
            config_version: self.config_version,
            template_id: self.template_id,
            template_version: self.template_version as u32,
            config_json,
            config_hash: self.config_hash,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl ProjectRepository for SqliteProjectRepository {
    async fn find_by_draft_id(
        &self,
        draft_id: &DraftId,
    ) -> Result<Option<(Project, ProjectConfig)>, RepositoryError> {
        let project_row = sqlx::query("SELECT * FROM projects WHERE draft_id = ?")
            .bind(draft_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(project_row) = project_row else {
            return Ok(None);
        };
        let project = ProjectRow::from_row(&project_row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_project()?;

        let config_row = sqlx::query(
            "SELECT * FROM project_configs WHERE project_id = ? ORDER BY created_at DESC LIMIT 1",
        )
        .bind(project.project_id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(config_row) = config_row else {
            return Err(RepositoryError::Query(format!(
                "project '{}' has no config",
                project.project_id
            )));
        };
        let config = ProjectConfigRow::from_row(&config_row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_project_config()?;

        Ok(Some((project, config)))
    }

    async fn insert_project_and_config(
        &self,
        project: &Project,
        config: &ProjectConfig,
    ) -> Result<(), RepositoryError> {
        let config_json = serde_json::to_string(&config.config_json)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let project_insert = sqlx::query(
            "INSERT INTO projects (id, owner_user_id, owner_tenant_id, draft_id, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(project.project_id.to_string())
        .bind(&project.owner.user_id)
        .bind(&project.owner.tenant_id)
        .bind(project.draft_id.to_string())
        .bind(project.status.as_str())
        .bind(format_datetime(&project.created_at))
        .bind(format_datetime(&project.updated_at))
        .execute(&mut *tx)
        .await;

        if let Err(sqlx::Error::Database(db_err)) = &project_insert {
            if db_err.message().contains("UNIQUE") {
                return Err(RepositoryError::Conflict(format!(
                    "project already committed for draft '{}'",
                    project.draft_id
                )));
            }
        }
        project_insert.map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "INSERT INTO project_configs (id, project_id, schema_version, config_version, template_id, template_version, config_json, config_hash, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(config.config_id.to_string())
        .bind(config.project_id.to_string())
        .bind(config.schema_version)
        .bind(&config.config_version)
        .bind(&config.template_id)
        .bind(config.template_version)
        .bind(&config_json)
        .bind(&config.config_hash)
        .bind(format_datetime(&config.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sitecraft_types::project::CommitStatus;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_project_and_config(draft_id: DraftId) -> (Project, ProjectConfig) {
        let now = Utc::now();
        let project_id = ProjectId::generate();
        let project = Project {
            project_id: project_id.clone(),
            owner: Owner {
                user_id: "user_1".to_string(),
                tenant_id: None,
            },
            draft_id,
            created_at: now,
            updated_at: now,
            status: ProjectStatus::Ready,
        };
        let config = ProjectConfig {
            config_id: ConfigId::generate(),
            project_id,
            schema_version: 1,
            config_version: "1.0.0".to_string(),
            template_id: "tech".to_string(),
            template_version: 1,
            config_json: json!({"brand": {"name": "Acme"}}),
            config_hash: "deadbeef".to_string(),
            created_at: now,
        };
        (project, config)
    }

    #[tokio::test]
    async fn insert_then_find_by_draft_id_round_trips() {
        let pool = test_pool().await;
        let repo = SqliteProjectRepository::new(pool);
        let draft_id = DraftId::generate();
        let (project, config) = make_project_and_config(draft_id.clone());

        repo.insert_project_and_config(&project, &config).await.unwrap();

        let (found_project, found_config) = repo.find_by_draft_id(&draft_id).await.unwrap().unwrap();
        assert_eq!(found_project.project_id, project.project_id);
        assert_eq!(found_config.config_hash, "deadbeef");
        assert_eq!(found_config.config_json, json!({"brand": {"name": "Acme"}}));
    }

    #[tokio::test]
    async fn find_by_draft_id_returns_none_when_absent() {
        let pool = test_pool().await;
        let repo = SqliteProjectRepository::new(pool);
        assert!(repo.find_by_draft_id(&DraftId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_insert_for_same_draft_conflicts() {
        let pool = test_pool().await;
        let repo = SqliteProjectRepository::new(pool);
        let draft_id = DraftId::generate();
        let (project, config) = make_project_and_config(draft_id.clone());
        repo.insert_project_and_config(&project, &config).await.unwrap();

        let (mut other_project, mut other_config) = make_project_and_config(draft_id);
        other_project.project_id = ProjectId::generate();
        other_config.project_id = other_project.project_id.clone();
        other_config.config_id = ConfigId::generate();

        let err = repo
            .insert_project_and_config(&other_project, &other_config)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[test]
    fn commit_status_values_are_distinct() {
        assert_ne!(CommitStatus::Migrated, CommitStatus::AlreadyCommitted);
    }
}
