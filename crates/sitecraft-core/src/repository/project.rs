//! `ProjectRepository`: the only trait that touches the relational store
//! (§4.E step 6, §5 "only Commit writes").

use std::future::Future;

use sitecraft_types::error::RepositoryError;
use sitecraft_types::ids::DraftId;
use sitecraft_types::project::{Project, ProjectConfig};

pub trait ProjectRepository: Send + Sync {
    /// Looks up the project (and its current config) committed from a
    /// given origin draft, if any. Used for the idempotency check in
    /// §4.E step 2.
    fn find_by_draft_id(
        &self,
        draft_id: &DraftId,
    ) -> impl Future<Output = Result<Option<(Project, ProjectConfig)>, RepositoryError>> + Send;

    /// Inserts a Project and its ProjectConfig in a single transaction
    /// (§4.E step 6). Implementations must map a `UNIQUE(draft_id)`
    /// violation to `RepositoryError::Conflict` so the caller can treat
    /// it as an idempotent replay rather than a hard failure.
    fn insert_project_and_config(
        &self,
        project: &Project,
        config: &ProjectConfig,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
