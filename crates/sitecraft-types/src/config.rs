use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{ConfigId, DraftId};

/// Publish-ready configuration derived deterministically from a draft and a
/// template (§3.1 `SiteConfig`). Equal `(draft, template, engine version)`
/// triples must serialize to byte-identical canonical JSON, save for
/// `configId` and `generatedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub schema_version: u32,
    pub config_version: String,
    pub config_id: ConfigId,
    pub draft_id: DraftId,
    pub generated_at: DateTime<Utc>,
    pub generator: ConfigGeneratorRef,
    pub brand: BrandBlock,
    pub site: SiteBlock,
    pub theme: ThemeBlock,
    pub pages: Vec<PageConfig>,
    pub assets: Vec<AssetRef>,
    pub publishing: PublishingBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigGeneratorRef {
    pub engine: String,
    pub engine_version: String,
    pub template_id: String,
    pub template_version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandBlock {
    pub name: String,
    pub industry: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<AssetRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRef {
    pub asset_id: String,
    pub url: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoBlock {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image_asset_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingBlock {
    pub base_path: String,
    pub trailing_slash: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteBlock {
    pub language: String,
    pub title: String,
    pub description: String,
    pub routing: RoutingBlock,
    pub seo: SeoBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub muted_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub scale: f64,
}

/// Radius token. Concrete pixel mapping lives in the renderer (§4.D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusToken {
    None,
    Sm,
    Md,
    Lg,
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeBlock {
    pub theme_id: String,
    pub palette: Palette,
    pub typography: Typography,
    pub radius: RadiusToken,
    pub spacing: String,
}

/// A section is a tagged variant over the closed renderer whitelist
/// (§4.D). `props` remains a free-form JSON object; the renderer is
/// responsible for escaping and type-dispatch, not this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: String,
    pub props: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub id: String,
    pub path: String,
    pub title: String,
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingConstraintsValue {
    pub max_pages: u32,
    pub max_sections_per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingOutput {
    pub format: String,
    pub entry_page_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingBlock {
    pub target: String,
    pub output: PublishingOutput,
    pub constraints: PublishingConstraintsValue,
}
