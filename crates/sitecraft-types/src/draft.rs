use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::ids::{AssetId, DraftId};
use crate::industry::IndustryInfo;

/// Metadata describing a previously uploaded logo. The core never reads the
/// underlying bytes; this record is all it ever consumes from the
/// blob-metadata adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    pub asset_id: AssetId,
    pub url: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub bytes: u64,
    pub sha256: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Normalizes a raw brand name per §4.A: trim, drop C0/DEL control code
/// points, collapse whitespace runs, reject empty. Bounds to 1..=100 code
/// points (§3.1 `BrandProfile`, §8 boundary behavior: 100 allowed, 101
/// rejected) — overlong names are a validation error, not silently
/// truncated, so a caller never observes a stored brand name other than
/// the one they submitted.
pub fn normalize_brand_name(raw: &str) -> Result<String, DraftError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(*c, '\u{0000}'..='\u{001F}' | '\u{007F}'))
        .collect();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim();

    if trimmed.is_empty() {
        return Err(DraftError::InvalidBrandName(
            "brand name must not be empty".to_string(),
        ));
    }

    if trimmed.chars().count() > 100 {
        return Err(DraftError::InvalidBrandName(
            "brand name must not exceed 100 code points".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}

/// `{ schemaVersion, brandName, industry, logo? }` — the user-supplied
/// identity a draft and its generated config are derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub brand_name: String,
    pub industry: IndustryInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<AssetInfo>,
}

fn default_schema_version() -> u32 {
    1
}

impl BrandProfile {
    /// Constructs a profile, normalizing `brand_name` and mapping unknown
    /// industry codes to `other`. Rejects empty/overlong names.
    pub fn new(
        brand_name: &str,
        industry: IndustryInfo,
        logo: Option<AssetInfo>,
    ) -> Result<Self, DraftError> {
        let brand_name = normalize_brand_name(brand_name)?;
        Ok(Self {
            schema_version: default_schema_version(),
            brand_name,
            industry,
            logo,
        })
    }
}

/// Always `DRAFT` in this core; carried explicitly for wire-format parity
/// with the permanent `ProjectStatus` enum and forward schema evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftStatus {
    Draft,
}

impl Default for DraftStatus {
    fn default() -> Self {
        DraftStatus::Draft
    }
}

/// Which generator produced the draft's most recent config, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorRef {
    pub engine: String,
    pub engine_version: String,
    pub template_id: String,
    pub locale: String,
}

impl Default for GeneratorRef {
    fn default() -> Self {
        Self {
            engine: "sitecraft-generator".to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            template_id: String::new(),
            locale: "en".to_string(),
        }
    }
}

/// Preview format and cache-identity bookkeeping embedded in the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    Html,
    Json,
}

impl Default for PreviewMode {
    fn default() -> Self {
        PreviewMode::Html
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewState {
    pub mode: PreviewMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Request provenance, never user-facing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent_hash: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_source() -> String {
    "api".to_string()
}

/// The primary temporary object (§3.1). `createdAt ≤ updatedAt ≤ expiresAt`
/// and `expiresAt = updatedAt + ttlSeconds` are invariants the draft store
/// layer is responsible for re-establishing on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub draft_id: DraftId,
    pub status: DraftStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub ttl_seconds: i64,
    pub brand_profile: BrandProfile,
    pub generator: GeneratorRef,
    pub preview: PreviewState,
    pub meta: DraftMeta,
}

impl Draft {
    /// Builds a new draft at `now` with the given TTL, computing
    /// `expiresAt` per the invariant in §3.1.
    pub fn new(
        brand_profile: BrandProfile,
        ttl_seconds: i64,
        meta: DraftMeta,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: default_schema_version(),
            draft_id: DraftId::generate(),
            status: DraftStatus::Draft,
            created_at: now,
            updated_at: now,
            expires_at: now + chrono::Duration::seconds(ttl_seconds),
            ttl_seconds,
            brand_profile,
            generator: GeneratorRef::default(),
            preview: PreviewState::default(),
            meta,
        }
    }

    /// Re-establishes `updatedAt`/`expiresAt` after a mutation, as every
    /// `update` and sliding-TTL read must.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.expires_at = now + chrono::Duration::seconds(self.ttl_seconds);
    }

    /// Semantic expiration check to guard against clock skew between the
    /// draft store and the service (§4.B).
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::industry::IndustryInfo;

    #[test]
    fn normalizes_whitespace_and_control_chars() {
        let normalized = normalize_brand_name("  Acme\u{0}  \t\tCo  ").unwrap();
        assert_eq!(normalized, "Acme Co");
    }

    #[test]
    fn empty_brand_name_rejected() {
        assert!(normalize_brand_name("   ").is_err());
    }

    #[test]
    fn length_100_allowed_101_rejected() {
        let hundred = "a".repeat(100);
        assert_eq!(normalize_brand_name(&hundred).unwrap().chars().count(), 100);
        let hundred_one = "a".repeat(101);
        assert!(normalize_brand_name(&hundred_one).is_err());
    }

    #[test]
    fn draft_invariants_hold_on_create() {
        let now = Utc::now();
        let profile =
            BrandProfile::new("Acme", IndustryInfo::new("tech", None), None).unwrap();
        let draft = Draft::new(profile, 86400, DraftMeta::default(), now);
        assert_eq!(draft.created_at, draft.updated_at);
        assert_eq!(draft.expires_at, draft.updated_at + chrono::Duration::seconds(86400));
        assert!(draft.created_at <= draft.updated_at);
        assert!(draft.updated_at <= draft.expires_at);
    }

    #[test]
    fn touch_recomputes_expiry_from_updated_at() {
        let now = Utc::now();
        let profile =
            BrandProfile::new("Acme", IndustryInfo::new("tech", None), None).unwrap();
        let mut draft = Draft::new(profile, 60, DraftMeta::default(), now);
        let later = now + chrono::Duration::seconds(30);
        draft.touch(later);
        assert_eq!(draft.updated_at, later);
        assert_eq!(draft.expires_at, later + chrono::Duration::seconds(60));
    }

    #[test]
    fn is_expired_checks_expires_at() {
        let now = Utc::now();
        let profile =
            BrandProfile::new("Acme", IndustryInfo::new("tech", None), None).unwrap();
        let draft = Draft::new(profile, 2, DraftMeta::default(), now);
        assert!(!draft.is_expired(now + chrono::Duration::seconds(1)));
        assert!(draft.is_expired(now + chrono::Duration::seconds(3)));
    }
}
