//! Generic services wiring the draft store, generator, renderer, and
//! commit coordinator behind a single `ServiceError` the HTTP boundary
//! maps to the wire error taxonomy of §7.

pub mod commit_service;
pub mod draft_service;

use thiserror::Error;

use sitecraft_types::error::{AssetError, CommitError, DraftError, GeneratorError, RenderError, RepositoryError};

/// Composes every domain error this crate's services can produce, plus
/// the one kind (`Validation`) that only ever originates at a service
/// boundary rather than from a storage adapter.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}
