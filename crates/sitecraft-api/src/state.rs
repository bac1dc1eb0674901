//! Wires concrete infrastructure adapters into the generic core services
//! and holds the bundle every HTTP handler receives as axum state.

use std::sync::Arc;

use sitecraft_core::service::commit_service::CommitService;
use sitecraft_core::service::draft_service::DraftService;
use sitecraft_infra::blob::HttpAssetMetadataProvider;
use sitecraft_infra::config::AppConfig;
use sitecraft_infra::redis::{RedisDraftStore, RedisLock};
use sitecraft_infra::sqlite::{DatabasePool, SqliteProjectRepository};
use sitecraft_infra::template::StaticTemplateRegistry;

/// `DraftService` generic over the production adapters.
pub type ConcreteDraftService =
    DraftService<RedisDraftStore, HttpAssetMetadataProvider, StaticTemplateRegistry>;

/// `CommitService` generic over the production adapters.
pub type ConcreteCommitService =
    CommitService<RedisLock, SqliteProjectRepository, RedisDraftStore, StaticTemplateRegistry>;

/// Bundle handed to every handler via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub draft_service: Arc<ConcreteDraftService>,
    pub commit_service: Arc<ConcreteCommitService>,
    pub internal_token: Arc<str>,
    pub cors_origins: Arc<[String]>,
}

impl AppState {
    /// Opens the draft store, the relational store, and the blob-metadata
    /// client, then wires them behind the two generic services.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let draft_store = RedisDraftStore::connect(&config.redis_url).await?;
        let lock = RedisLock::new(draft_store.connection_manager());
        let assets = HttpAssetMetadataProvider::new(config.asset_store_url.clone());
        let registry = StaticTemplateRegistry::new();

        let db_pool = DatabasePool::new(&config.database_url).await?;
        let repository = SqliteProjectRepository::new(db_pool);

        let draft_service = DraftService::new(
            draft_store.clone(),
            assets,
            registry,
            config.draft_ttl_seconds,
        );
        let commit_service = CommitService::new(lock, repository, draft_store, registry);

        Ok(Self {
            draft_service: Arc::new(draft_service),
            commit_service: Arc::new(commit_service),
            internal_token: Arc::from(config.internal_token.as_str()),
            cors_origins: Arc::from(config.cors_origin_list()),
        })
    }
}
