//! Generic draft lifecycle service: wires a `DraftStore` and an
//! `AssetMetadataProvider` behind the `CreateDraft` / `UpdateDraft` /
//! `GetDraft` / `GetPreview` operations of §4.B and §6.1.

use chrono::{DateTime, Utc};

use sitecraft_types::draft::{BrandProfile, Draft, DraftMeta};
use sitecraft_types::error::{AssetError, DraftError};
use sitecraft_types::ids::{AssetId, DraftId};
use sitecraft_types::industry::IndustryInfo;
use sitecraft_types::patch::Patch;

use crate::blob::AssetMetadataProvider;
use crate::draft::store::DraftStore;
use crate::generator::{self, registry::TemplateRegistry};
use crate::preview::{self, PreviewFormat, PreviewOutput};
use crate::service::ServiceError;

/// Fallback sliding TTL for callers (tests, local tooling) that don't
/// have a configured `AppConfig::draft_ttl_seconds` to pass into
/// `DraftService::new`. Production wiring threads the configured value
/// instead (see `sitecraft-api::state::AppState::init`).
pub const DEFAULT_TTL_SECONDS: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct CreateDraftRequest {
    pub brand_name: String,
    pub industry_code: String,
    pub industry_label: Option<String>,
    pub logo_asset_id: Option<AssetId>,
    pub ttl_seconds: Option<i64>,
    pub meta: DraftMeta,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDraftRequest {
    pub brand_name: Patch<String>,
    pub industry: Patch<(String, Option<String>)>,
    pub logo: Patch<AssetId>,
}

pub struct DraftService<S, A, T> {
    store: S,
    assets: A,
    registry: T,
    default_ttl_seconds: i64,
}

impl<S, A, T> DraftService<S, A, T>
where
    S: DraftStore,
    A: AssetMetadataProvider,
    T: TemplateRegistry,
{
    /// `default_ttl_seconds` is the sliding TTL applied to `create_draft`
    /// when a request omits `ttlSeconds` -- sourced from `AppConfig`'s
    /// `SITECRAFT_DRAFT_TTL_SECONDS` (§6.3) rather than hardcoded, so a
    /// deployment's configured default actually takes effect.
    pub fn new(store: S, assets: A, registry: T, default_ttl_seconds: i64) -> Self {
        Self {
            store,
            assets,
            registry,
            default_ttl_seconds,
        }
    }

    async fn resolve_logo(&self, asset_id: &AssetId) -> Result<sitecraft_types::draft::AssetInfo, ServiceError> {
        self.assets
            .get_asset(asset_id)
            .await?
            .ok_or(AssetError::NotFound)
            .map_err(ServiceError::from)
    }

    /// `POST /drafts` (§6.1). Validates brand name bounds, maps the
    /// industry code, and resolves the logo reference through the
    /// blob-metadata adapter if one was supplied.
    pub async fn create_draft(
        &self,
        request: CreateDraftRequest,
        now: DateTime<Utc>,
    ) -> Result<Draft, ServiceError> {
        let logo = match request.logo_asset_id {
            Some(asset_id) => Some(self.resolve_logo(&asset_id).await?),
            None => None,
        };

        let industry = IndustryInfo::new(&request.industry_code, request.industry_label);
        let profile = BrandProfile::new(&request.brand_name, industry, logo)?;

        let ttl_seconds = request.ttl_seconds.unwrap_or(self.default_ttl_seconds);
        let draft = Draft::new(profile, ttl_seconds, request.meta, now);

        self.store.save(&draft).await?;
        Ok(draft)
    }

    /// `PATCH /drafts/{id}` (§6.1). Any subset of `{brandName, industry,
    /// logo}`; `logo: null` clears it. Applies under optimistic
    /// compare-and-set and slides the TTL.
    pub async fn update_draft(
        &self,
        draft_id: &DraftId,
        patch: UpdateDraftRequest,
        now: DateTime<Utc>,
    ) -> Result<Draft, ServiceError> {
        let resolved_logo = match &patch.logo {
            Patch::Set(asset_id) => Some(Some(self.resolve_logo(asset_id).await?)),
            Patch::Clear => Some(None),
            Patch::Unset => None,
        };

        let brand_name = match &patch.brand_name {
            Patch::Set(name) => Some(name.clone()),
            Patch::Clear | Patch::Unset => None,
        };
        let industry = match &patch.industry {
            Patch::Set((code, label)) => Some(IndustryInfo::new(code, label.clone())),
            Patch::Clear | Patch::Unset => None,
        };

        let updated = self
            .store
            .update_with_lock(draft_id, move |mut draft| {
                if let Some(name) = &brand_name {
                    draft.brand_profile.brand_name =
                        sitecraft_types::draft::normalize_brand_name(name)?;
                }
                if let Some(industry) = &industry {
                    draft.brand_profile.industry = industry.clone();
                }
                if let Some(logo) = &resolved_logo {
                    draft.brand_profile.logo = logo.clone();
                }
                draft.touch(now);
                Ok(draft)
            })
            .await?;

        Ok(updated)
    }

    /// `GET /drafts/{id}` (§6.1). Never slides the TTL. A record whose
    /// TTL has genuinely elapsed is reported `NotFound`; one whose local
    /// clock proves it outlived its `expiresAt` despite still being
    /// present in the store is reported `Expired` (§7).
    pub async fn get_draft(&self, draft_id: &DraftId, now: DateTime<Utc>) -> Result<Draft, ServiceError> {
        match self.store.find_by_id(draft_id, false).await? {
            Some(draft) if draft.is_expired(now) => {
                let _ = self.store.delete(draft_id).await;
                Err(ServiceError::from(DraftError::Expired))
            }
            Some(draft) => Ok(draft),
            None => Err(ServiceError::from(DraftError::NotFound)),
        }
    }

    /// `GET /drafts/{id}/preview` and `GET /p/{id}` (§6.1). Slides the
    /// TTL, regenerates the `SiteConfig`, and renders a sanitized
    /// preview.
    pub async fn get_preview(
        &self,
        draft_id: &DraftId,
        format: PreviewFormat,
        now: DateTime<Utc>,
    ) -> Result<PreviewOutput, ServiceError> {
        let draft = match self.store.find_by_id(draft_id, true).await? {
            Some(draft) if draft.is_expired(now) => {
                let _ = self.store.delete(draft_id).await;
                return Err(ServiceError::from(DraftError::Expired));
            }
            Some(draft) => draft,
            None => return Err(ServiceError::from(DraftError::NotFound)),
        };

        let config = generator::generate(&draft, &self.registry, now)?;
        let output = preview::render(&config, format, now)?;

        let mut updated = draft;
        updated.preview.mode = match format {
            PreviewFormat::Html => sitecraft_types::draft::PreviewMode::Html,
            PreviewFormat::Json => sitecraft_types::draft::PreviewMode::Json,
        };
        updated.preview.last_generated_at = Some(now);
        updated.preview.etag = Some(output.etag().to_string());
        let _ = self.store.update(&updated).await;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_registry;
    use dashmap::DashMap;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct FakeDraftStore {
        drafts: Arc<DashMap<String, Draft>>,
    }

    impl DraftStore for FakeDraftStore {
        async fn save(&self, draft: &Draft) -> Result<(), DraftError> {
            if self.drafts.contains_key(draft.draft_id.as_str()) {
                return Err(DraftError::AlreadyExists);
            }
            self.drafts.insert(draft.draft_id.to_string(), draft.clone());
            Ok(())
        }

        async fn update(&self, draft: &Draft) -> Result<(), DraftError> {
            if !self.drafts.contains_key(draft.draft_id.as_str()) {
                return Err(DraftError::NotFound);
            }
            self.drafts.insert(draft.draft_id.to_string(), draft.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &DraftId, slide: bool) -> Result<Option<Draft>, DraftError> {
            let Some(mut entry) = self.drafts.get_mut(id.as_str()) else {
                return Ok(None);
            };
            if slide {
                let now = entry.updated_at;
                entry.touch(now);
            }
            Ok(Some(entry.clone()))
        }

        async fn exists(&self, id: &DraftId) -> Result<bool, DraftError> {
            Ok(self.drafts.contains_key(id.as_str()))
        }

        async fn delete(&self, id: &DraftId) -> Result<(), DraftError> {
            self.drafts.remove(id.as_str());
            Ok(())
        }

        async fn get_ttl(&self, id: &DraftId) -> Result<Option<i64>, DraftError> {
            Ok(self.drafts.get(id.as_str()).map(|d| d.ttl_seconds))
        }

        async fn update_with_lock<F>(&self, id: &DraftId, transform: F) -> Result<Draft, DraftError>
        where
            F: Fn(Draft) -> Result<Draft, DraftError> + Send + Sync,
        {
            let Some(current) = self.drafts.get(id.as_str()).map(|d| d.clone()) else {
                return Err(DraftError::NotFound);
            };
            let updated = transform(current)?;
            self.drafts.insert(id.to_string(), updated.clone());
            Ok(updated)
        }
    }

    #[derive(Clone, Default)]
    struct FakeAssetProvider {
        assets: Arc<DashMap<String, sitecraft_types::draft::AssetInfo>>,
    }

    impl AssetMetadataProvider for FakeAssetProvider {
        async fn get_asset(
            &self,
            asset_id: &AssetId,
        ) -> Result<Option<sitecraft_types::draft::AssetInfo>, AssetError> {
            Ok(self.assets.get(asset_id.as_str()).map(|a| a.clone()))
        }
    }

    fn asset_fixture(id: &str) -> sitecraft_types::draft::AssetInfo {
        sitecraft_types::draft::AssetInfo {
            asset_id: id.parse().unwrap(),
            url: format!("https://cdn.example/{id}.png"),
            mime_type: "image/png".to_string(),
            width: Some(200),
            height: Some(200),
            bytes: 1024,
            sha256: "hhh".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    fn service() -> DraftService<FakeDraftStore, FakeAssetProvider, impl TemplateRegistry> {
        DraftService::new(
            FakeDraftStore::default(),
            FakeAssetProvider::default(),
            test_registry(),
            DEFAULT_TTL_SECONDS,
        )
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let svc = service();
        let now = Utc::now();
        let draft = svc
            .create_draft(
                CreateDraftRequest {
                    brand_name: "Acme".to_string(),
                    industry_code: "tech".to_string(),
                    industry_label: None,
                    logo_asset_id: None,
                    ttl_seconds: Some(60),
                    meta: DraftMeta::default(),
                },
                now,
            )
            .await
            .unwrap();

        let fetched = svc.get_draft(&draft.draft_id, now).await.unwrap();
        assert_eq!(fetched.draft_id, draft.draft_id);
        assert_eq!(fetched.expires_at, draft.created_at + chrono::Duration::seconds(60));
    }

    #[tokio::test]
    async fn create_rejects_unknown_asset() {
        let svc = service();
        let err = svc
            .create_draft(
                CreateDraftRequest {
                    brand_name: "Acme".to_string(),
                    industry_code: "tech".to_string(),
                    industry_label: None,
                    logo_asset_id: Some("ast_missing".parse().unwrap()),
                    ttl_seconds: None,
                    meta: DraftMeta::default(),
                },
                Utc::now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Asset(AssetError::NotFound)));
    }

    #[tokio::test]
    async fn create_resolves_known_asset() {
        let svc = service();
        svc.assets.assets.insert("ast_1".to_string(), asset_fixture("ast_1"));
        let draft = svc
            .create_draft(
                CreateDraftRequest {
                    brand_name: "Acme".to_string(),
                    industry_code: "tech".to_string(),
                    industry_label: None,
                    logo_asset_id: Some("ast_1".parse().unwrap()),
                    ttl_seconds: None,
                    meta: DraftMeta::default(),
                },
                Utc::now(),
            )
            .await
            .unwrap();
        assert!(draft.brand_profile.logo.is_some());
    }

    #[tokio::test]
    async fn update_draft_slides_ttl_and_changes_brand_name() {
        let svc = service();
        let now = Utc::now();
        let draft = svc
            .create_draft(
                CreateDraftRequest {
                    brand_name: "Acme".to_string(),
                    industry_code: "tech".to_string(),
                    industry_label: None,
                    logo_asset_id: None,
                    ttl_seconds: Some(60),
                    meta: DraftMeta::default(),
                },
                now,
            )
            .await
            .unwrap();

        let later = now + chrono::Duration::seconds(30);
        let updated = svc
            .update_draft(
                &draft.draft_id,
                UpdateDraftRequest {
                    brand_name: Patch::Set("Acme Two".to_string()),
                    ..Default::default()
                },
                later,
            )
            .await
            .unwrap();

        assert_eq!(updated.brand_profile.brand_name, "Acme Two");
        assert_eq!(updated.expires_at, later + chrono::Duration::seconds(60));
    }

    #[tokio::test]
    async fn update_clears_logo_on_explicit_null() {
        let svc = service();
        svc.assets.assets.insert("ast_1".to_string(), asset_fixture("ast_1"));
        let now = Utc::now();
        let draft = svc
            .create_draft(
                CreateDraftRequest {
                    brand_name: "Acme".to_string(),
                    industry_code: "tech".to_string(),
                    industry_label: None,
                    logo_asset_id: Some("ast_1".parse().unwrap()),
                    ttl_seconds: Some(60),
                    meta: DraftMeta::default(),
                },
                now,
            )
            .await
            .unwrap();
        assert!(draft.brand_profile.logo.is_some());

        let updated = svc
            .update_draft(
                &draft.draft_id,
                UpdateDraftRequest {
                    logo: Patch::Clear,
                    ..Default::default()
                },
                now,
            )
            .await
            .unwrap();
        assert!(updated.brand_profile.logo.is_none());
    }

    #[tokio::test]
    async fn get_draft_reports_not_found_for_absent_id() {
        let svc = service();
        let err = svc
            .get_draft(&"drf_missing".parse().unwrap(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Draft(DraftError::NotFound)));
    }

    #[tokio::test]
    async fn get_draft_reports_expired_when_clock_has_elapsed() {
        let svc = service();
        let now = Utc::now();
        let draft = svc
            .create_draft(
                CreateDraftRequest {
                    brand_name: "Acme".to_string(),
                    industry_code: "tech".to_string(),
                    industry_label: None,
                    logo_asset_id: None,
                    ttl_seconds: Some(2),
                    meta: DraftMeta::default(),
                },
                now,
            )
            .await
            .unwrap();

        let later = now + chrono::Duration::seconds(5);
        let err = svc.get_draft(&draft.draft_id, later).await.unwrap_err();
        assert!(matches!(err, ServiceError::Draft(DraftError::Expired)));
    }

    #[tokio::test]
    async fn preview_produces_stable_etag_and_slides_ttl() {
        let svc = service();
        let now = Utc::now();
        let draft = svc
            .create_draft(
                CreateDraftRequest {
                    brand_name: "Acme".to_string(),
                    industry_code: "tech".to_string(),
                    industry_label: None,
                    logo_asset_id: None,
                    ttl_seconds: Some(60),
                    meta: DraftMeta::default(),
                },
                now,
            )
            .await
            .unwrap();

        let first = svc
            .get_preview(&draft.draft_id, PreviewFormat::Html, now)
            .await
            .unwrap();
        let second = svc
            .get_preview(&draft.draft_id, PreviewFormat::Html, now + chrono::Duration::seconds(1))
            .await
            .unwrap();
        assert_eq!(first.etag(), second.etag());
    }
}
