//! Commit coordinator service (§4.E): acquires the distributed lock,
//! checks idempotency, generates the publish-ready config, persists it
//! atomically, and cleans up best-effort.

use chrono::{DateTime, Utc};

use sitecraft_types::error::{CommitError, RepositoryError};
use sitecraft_types::ids::DraftId;
use sitecraft_types::project::{CommitOutcome, CommitStatus, Owner, Project, ProjectConfig, ProjectStatus};

use crate::canonical::content_hash_excluding;
use crate::commit::lock::DistributedLock;
use crate::commit::{lock_key, COMMIT_LOCK_TTL_SECONDS};
use crate::draft::store::DraftStore;
use crate::generator::{self, registry::TemplateRegistry};
use crate::repository::project::ProjectRepository;
use crate::service::ServiceError;

pub struct CommitRequest {
    pub draft_id: DraftId,
    pub owner: Owner,
}

pub struct CommitService<L, R, S, T> {
    lock: L,
    repository: R,
    draft_store: S,
    registry: T,
}

impl<L, R, S, T> CommitService<L, R, S, T>
where
    L: DistributedLock,
    R: ProjectRepository,
    S: DraftStore,
    T: TemplateRegistry,
{
    pub fn new(lock: L, repository: R, draft_store: S, registry: T) -> Self {
        Self {
            lock,
            repository,
            draft_store,
            registry,
        }
    }

    /// Runs the full state machine of §4.E. Returns `Migrated` (first
    /// successful write) or `AlreadyCommitted` (idempotent replay); the
    /// HTTP boundary maps these to `201` and `200` respectively.
    pub async fn commit(&self, request: CommitRequest, now: DateTime<Utc>) -> Result<CommitOutcome, ServiceError> {
        let key = lock_key(&request.draft_id);

        let acquired = self.lock.acquire(&key, COMMIT_LOCK_TTL_SECONDS).await?;
        if !acquired {
            // Another writer holds the lock; before reporting busy, check
            // whether it already finished the commit (§4.E step 2 also
            // applies to the lock-lost path described in §5).
            if let Some(outcome) = self.existing_commit(&request.draft_id).await? {
                return Ok(outcome);
            }
            return Err(ServiceError::from(CommitError::InProgress));
        }

        let result = self.commit_locked(&request, now).await;

        let _ = self.lock.release(&key).await;

        result
    }

    async fn existing_commit(&self, draft_id: &DraftId) -> Result<Option<CommitOutcome>, ServiceError> {
        let existing = self.repository.find_by_draft_id(draft_id).await?;
        Ok(existing.map(|(project, config)| CommitOutcome {
            project_id: project.project_id,
            config_id: config.config_id,
            status: CommitStatus::AlreadyCommitted,
        }))
    }

    async fn commit_locked(
        &self,
        request: &CommitRequest,
        now: DateTime<Utc>,
    ) -> Result<CommitOutcome, ServiceError> {
        if let Some(outcome) = self.existing_commit(&request.draft_id).await? {
            return Ok(outcome);
        }

        let draft = match self.draft_store.find_by_id(&request.draft_id, false).await? {
            Some(draft) if draft.is_expired(now) => {
                let _ = self.draft_store.delete(&request.draft_id).await;
                return Err(ServiceError::from(CommitError::DraftExpired));
            }
            Some(draft) => draft,
            None => return Err(ServiceError::from(CommitError::DraftNotFound)),
        };

        let site_config = generator::generate(&draft, &self.registry, now)?;
        let config_json = serde_json::to_value(&site_config)
            .map_err(|e| ServiceError::Validation(format!("config serialization error: {e}")))?;
        let config_hash = content_hash_excluding(&config_json, &["configId", "generatedAt"]);

        let project = Project {
            project_id: sitecraft_types::ids::ProjectId::generate(),
            owner: request.owner.clone(),
            draft_id: request.draft_id.clone(),
            created_at: now,
            updated_at: now,
            status: ProjectStatus::Draft,
        };
        let project_config = ProjectConfig {
            config_id: site_config.config_id.clone(),
            project_id: project.project_id.clone(),
            schema_version: site_config.schema_version,
            config_version: site_config.config_version.clone(),
            template_id: site_config.generator.template_id.clone(),
            template_version: site_config.generator.template_version,
            config_json,
            config_hash,
            created_at: now,
        };

        match self.repository.insert_project_and_config(&project, &project_config).await {
            Ok(()) => {
                let _ = self.draft_store.delete(&request.draft_id).await;
                Ok(CommitOutcome {
                    project_id: project.project_id,
                    config_id: project_config.config_id,
                    status: CommitStatus::Migrated,
                })
            }
            Err(RepositoryError::Conflict(_)) => {
                // Another writer raced past a lost lock; the unique
                // constraint is the correctness floor (§9 "Locks").
                match self.existing_commit(&request.draft_id).await? {
                    Some(outcome) => Ok(outcome),
                    None => Err(ServiceError::from(RepositoryError::Conflict(
                        "commit race detected but no existing project found".to_string(),
                    ))),
                }
            }
            Err(other) => Err(ServiceError::from(other)),
        }
    }
}
