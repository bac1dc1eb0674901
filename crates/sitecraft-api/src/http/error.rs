//! Maps `ServiceError` (and the boundary's own validation/auth failures)
//! onto the wire error taxonomy of §7: `{error, message, details?}` plus
//! an HTTP status, rather than the generic envelope a bigger API surface
//! might use.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use sitecraft_core::service::ServiceError;
use sitecraft_types::error::{AssetError, CommitError, DraftError, GeneratorError, RenderError, RepositoryError};

/// Application-level error that maps to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    Service(ServiceError),
    Unauthorized(String),
    Validation(String),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        AppError::Service(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

fn service_error_status(err: &ServiceError) -> (StatusCode, &'static str) {
    match err {
        ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "InvalidInput"),

        ServiceError::Draft(DraftError::NotFound) => (StatusCode::NOT_FOUND, "DraftNotFound"),
        ServiceError::Draft(DraftError::Expired) => (StatusCode::GONE, "DraftExpired"),
        ServiceError::Draft(DraftError::InvalidBrandName(_)) => (StatusCode::BAD_REQUEST, "InvalidInput"),
        ServiceError::Draft(DraftError::AlreadyExists | DraftError::Conflict | DraftError::Store(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal")
        }

        ServiceError::Generator(GeneratorError::InvalidBrandName(_)) => (StatusCode::BAD_REQUEST, "InvalidInput"),
        ServiceError::Generator(GeneratorError::TemplateNotFound(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal")
        }

        ServiceError::Render(RenderError::Unsafe { .. }) => (StatusCode::INTERNAL_SERVER_ERROR, "PreviewUnsafe"),
        ServiceError::Render(RenderError::Serialization(_)) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal"),

        ServiceError::Commit(CommitError::InProgress) => (StatusCode::CONFLICT, "CommitInProgress"),
        ServiceError::Commit(CommitError::DraftNotFound) => (StatusCode::NOT_FOUND, "DraftNotFound"),
        ServiceError::Commit(CommitError::DraftExpired) => (StatusCode::GONE, "DraftExpired"),
        ServiceError::Commit(CommitError::Generator(GeneratorError::InvalidBrandName(_))) => {
            (StatusCode::BAD_REQUEST, "InvalidInput")
        }
        ServiceError::Commit(CommitError::Generator(GeneratorError::TemplateNotFound(_))) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal")
        }
        ServiceError::Commit(CommitError::Repository(_) | CommitError::Lock(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal")
        }

        ServiceError::Repository(RepositoryError::NotFound) => (StatusCode::NOT_FOUND, "DraftNotFound"),
        ServiceError::Repository(
            RepositoryError::Connection(_) | RepositoryError::Query(_) | RepositoryError::Conflict(_),
        ) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal"),

        ServiceError::Asset(AssetError::NotFound) => (StatusCode::NOT_FOUND, "AssetNotFound"),
        ServiceError::Asset(AssetError::Adapter(_)) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Service(err) => {
                let (status, code) = service_error_status(err);
                (status, code, err.to_string())
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "Unauthorized", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "InvalidInput", msg.clone()),
        };

        (status, Json(ErrorBody { error: code, message, details: None })).into_response()
    }
}
