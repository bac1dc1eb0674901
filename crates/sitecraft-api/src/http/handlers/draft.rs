//! `POST /drafts`, `PATCH /drafts/{draftId}`, `GET /drafts/{draftId}`
//! (§6.1). Success responses return the `Draft` domain object directly,
//! not a generic envelope.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use sitecraft_core::service::draft_service::{CreateDraftRequest, UpdateDraftRequest};
use sitecraft_types::draft::{Draft, DraftMeta};
use sitecraft_types::patch::{self, Patch};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndustryBody {
    code: String,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogoBody {
    asset_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftBody {
    brand_name: String,
    industry: IndustryBody,
    #[serde(default)]
    logo: Option<LogoBody>,
    #[serde(default)]
    ttl_seconds: Option<i64>,
}

impl CreateDraftBody {
    fn into_request(self) -> Result<CreateDraftRequest, AppError> {
        let logo_asset_id = match self.logo {
            Some(logo) => Some(
                logo.asset_id
                    .parse()
                    .map_err(|_| AppError::Validation(format!("invalid assetId '{}'", logo.asset_id)))?,
            ),
            None => None,
        };

        Ok(CreateDraftRequest {
            brand_name: self.brand_name,
            industry_code: self.industry.code,
            industry_label: self.industry.label,
            logo_asset_id,
            ttl_seconds: self.ttl_seconds,
            meta: DraftMeta::default(),
        })
    }
}

/// `POST /drafts`.
pub async fn create_draft(
    State(state): State<AppState>,
    Json(body): Json<CreateDraftBody>,
) -> Result<Json<Draft>, AppError> {
    let request = body.into_request()?;
    let draft = state.draft_service.create_draft(request, chrono::Utc::now()).await?;
    Ok(Json(draft))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDraftBody {
    #[serde(default, deserialize_with = "patch::field")]
    brand_name: Patch<String>,
    #[serde(default, deserialize_with = "patch::field")]
    industry: Patch<IndustryBody>,
    #[serde(default, deserialize_with = "patch::field")]
    logo: Patch<LogoBody>,
}

impl UpdateDraftBody {
    fn into_request(self) -> Result<UpdateDraftRequest, AppError> {
        let brand_name = match self.brand_name {
            Patch::Clear => return Err(AppError::Validation("brandName cannot be cleared".to_string())),
            other => other,
        };

        let industry = match self.industry {
            Patch::Set(body) => Patch::Set((body.code, body.label)),
            Patch::Clear => return Err(AppError::Validation("industry cannot be cleared".to_string())),
            Patch::Unset => Patch::Unset,
        };

        let logo = match self.logo {
            Patch::Set(body) => Patch::Set(
                body.asset_id
                    .parse()
                    .map_err(|_| AppError::Validation(format!("invalid assetId '{}'", body.asset_id)))?,
            ),
            Patch::Clear => Patch::Clear,
            Patch::Unset => Patch::Unset,
        };

        Ok(UpdateDraftRequest { brand_name, industry, logo })
    }
}

/// `PATCH /drafts/{draftId}`.
pub async fn update_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
    Json(body): Json<UpdateDraftBody>,
) -> Result<Json<Draft>, AppError> {
    let draft_id = draft_id
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid draftId '{draft_id}'")))?;
    let request = body.into_request()?;
    let draft = state
        .draft_service
        .update_draft(&draft_id, request, chrono::Utc::now())
        .await?;
    Ok(Json(draft))
}

/// `GET /drafts/{draftId}`. Never slides the TTL.
pub async fn get_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
) -> Result<Json<Draft>, AppError> {
    let draft_id = draft_id
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid draftId '{draft_id}'")))?;
    let draft = state.draft_service.get_draft(&draft_id, chrono::Utc::now()).await?;
    Ok(Json(draft))
}
