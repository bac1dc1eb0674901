use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{ConfigId, DraftId, ProjectId};

/// Permanent ownership record for a committed project. `userId` is
/// externally issued; this service never manages user accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Draft,
    Ready,
    Published,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "DRAFT",
            ProjectStatus::Ready => "READY",
            ProjectStatus::Published => "PUBLISHED",
            ProjectStatus::Archived => "ARCHIVED",
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(ProjectStatus::Draft),
            "READY" => Ok(ProjectStatus::Ready),
            "PUBLISHED" => Ok(ProjectStatus::Published),
            "ARCHIVED" => Ok(ProjectStatus::Archived),
            other => Err(format!("invalid project status: '{other}'")),
        }
    }
}

/// Permanent record created exactly once per origin draft (§3.1 `Project`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: ProjectId,
    pub owner: Owner,
    pub draft_id: DraftId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: ProjectStatus,
}

/// The durable, published-config snapshot tied 1:1 to its project at
/// commit time (§3.1 `ProjectConfig`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub config_id: ConfigId,
    pub project_id: ProjectId,
    pub schema_version: u32,
    pub config_version: String,
    pub template_id: String,
    pub template_version: u32,
    pub config_json: Value,
    pub config_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a commit attempt, returned to the HTTP boundary (§4.E step 9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitStatus {
    Migrated,
    AlreadyCommitted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitOutcome {
    pub project_id: ProjectId,
    pub config_id: ConfigId,
    pub status: CommitStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_status_roundtrip() {
        for status in [
            ProjectStatus::Draft,
            ProjectStatus::Ready,
            ProjectStatus::Published,
            ProjectStatus::Archived,
        ] {
            let s = status.as_str();
            let parsed: ProjectStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }
}
