use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{Palette, PublishingConstraintsValue, RadiusToken, Typography};

/// A section template: a tagged type plus tokenized `props`. Resolution
/// walks `props` recursively, substituting the closed token vocabulary
/// (§4.C step 5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTemplate {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: String,
    pub props: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTemplate {
    pub id: String,
    pub path: String,
    /// Tokenized page title, resolved the same way section props are.
    pub title: String,
    pub sections: Vec<SectionTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDefaults {
    pub theme_id: String,
    pub palette: Palette,
    pub typography: Typography,
    pub radius: RadiusToken,
    pub spacing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoDefaults {
    /// Tokenized; combined with the brand name per §4.C step 7.
    pub title_suffix: String,
    /// Tokenized description.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingDefaults {
    pub target: String,
    pub output_format: String,
    pub constraints: PublishingConstraintsValue,
}

/// A registered, versioned, industry-specific template (§4.C).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    pub template_id: String,
    pub template_version: u32,
    pub theme: ThemeDefaults,
    pub seo: SeoDefaults,
    pub pages: Vec<PageTemplate>,
    pub publishing: PublishingDefaults,
}
