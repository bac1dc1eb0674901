//! `POST /drafts/{draftId}/commit` (§6.1, §4.E). Requires the internal
//! token; returns `201` for a first-time migration and `200` for an
//! idempotent replay (§7 "DraftAlreadyCommitted").

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use sitecraft_core::service::commit_service::CommitRequest;
use sitecraft_types::project::{CommitStatus, Owner};

use crate::http::error::AppError;
use crate::http::extractors::auth::InternalToken;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerBody {
    user_id: String,
    #[serde(default)]
    tenant_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitBody {
    owner: OwnerBody,
}

pub async fn commit(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
    _auth: InternalToken,
    Json(body): Json<CommitBody>,
) -> Result<Response, AppError> {
    let draft_id = draft_id
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid draftId '{draft_id}'")))?;

    let owner = Owner {
        user_id: body.owner.user_id,
        tenant_id: body.owner.tenant_id,
    };

    let outcome = state
        .commit_service
        .commit(CommitRequest { draft_id, owner }, chrono::Utc::now())
        .await?;

    let status = match outcome.status {
        CommitStatus::Migrated => StatusCode::CREATED,
        CommitStatus::AlreadyCommitted => StatusCode::OK,
    };

    Ok((status, Json(outcome)).into_response())
}
