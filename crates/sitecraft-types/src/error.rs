use thiserror::Error;

/// Errors from draft store operations (§4.B).
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("draft already exists")]
    AlreadyExists,

    #[error("draft not found")]
    NotFound,

    #[error("draft expired")]
    Expired,

    #[error("concurrent update conflict after retries")]
    Conflict,

    #[error("draft store error: {0}")]
    Store(String),

    #[error("invalid brand name: {0}")]
    InvalidBrandName(String),
}

/// Errors from the template engine and config generator (§4.C).
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid brand name: {0}")]
    InvalidBrandName(String),

    #[error("template '{0}' not found")]
    TemplateNotFound(String),
}

/// Errors from the safe preview renderer (§4.D).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsafe content detected in section '{section_id}'")]
    Unsafe { section_id: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from the commit coordinator (§4.E).
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("commit already in progress for this draft")]
    InProgress,

    #[error("draft not found")]
    DraftNotFound,

    #[error("draft expired")]
    DraftExpired,

    #[error("generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("lock error: {0}")]
    Lock(String),
}

/// Errors from the relational project/project-config store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the blob-metadata adapter.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found")]
    NotFound,

    #[error("asset metadata adapter error: {0}")]
    Adapter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_error_display() {
        assert_eq!(DraftError::AlreadyExists.to_string(), "draft already exists");
    }

    #[test]
    fn commit_error_wraps_generator() {
        let err = CommitError::from(GeneratorError::TemplateNotFound("x".into()));
        assert!(err.to_string().contains("template 'x' not found"));
    }

    #[test]
    fn repository_error_display() {
        let err = RepositoryError::Conflict("unique violation".into());
        assert_eq!(err.to_string(), "conflict: unique violation");
    }
}
