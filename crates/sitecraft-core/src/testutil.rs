//! Shared fixtures for unit tests across this crate. Not part of the
//! public API.

use chrono::Utc;
use sitecraft_types::config::{Palette, RadiusToken, Typography};
use sitecraft_types::draft::{BrandProfile, Draft, DraftMeta};
use sitecraft_types::industry::IndustryInfo;
use sitecraft_types::template::{
    PageTemplate, PublishingDefaults, SectionTemplate, SeoDefaults, TemplateDefinition,
    ThemeDefaults,
};
use sitecraft_types::config::PublishingConstraintsValue;

use crate::generator::registry::{TemplateRegistry, DEFAULT_TEMPLATE_ID};

pub fn sample_draft(brand_name: &str, industry_code: &str) -> Draft {
    let profile = BrandProfile::new(
        brand_name,
        IndustryInfo::new(industry_code, None),
        None,
    )
    .unwrap();
    Draft::new(profile, 86400, DraftMeta::default(), Utc::now())
}

fn theme_defaults(theme_id: &str) -> ThemeDefaults {
    ThemeDefaults {
        theme_id: theme_id.to_string(),
        palette: Palette {
            primary: "#0f172a".to_string(),
            accent: "#2563eb".to_string(),
            background: "#ffffff".to_string(),
            surface: "#f8fafc".to_string(),
            text: "#0f172a".to_string(),
            muted_text: "#64748b".to_string(),
        },
        typography: Typography {
            font_family: "Inter".to_string(),
            scale: 1.0,
        },
        radius: RadiusToken::Md,
        spacing: "comfortable".to_string(),
    }
}

fn template(template_id: &str, title_suffix: &str) -> TemplateDefinition {
    TemplateDefinition {
        template_id: template_id.to_string(),
        template_version: 1,
        theme: theme_defaults(template_id),
        seo: SeoDefaults {
            title_suffix: title_suffix.to_string(),
            description: "{{brandName}} serves {{industryLabel}} customers.".to_string(),
        },
        pages: vec![PageTemplate {
            id: "home".to_string(),
            path: "/".to_string(),
            title: "{{brandName}} Home".to_string(),
            sections: vec![SectionTemplate {
                id: "hero-1".to_string(),
                section_type: "hero".to_string(),
                props: serde_json::json!({
                    "heading": "{{brandName}}",
                    "logo": "{{logoAssetId}}",
                }),
            }],
        }],
        publishing: PublishingDefaults {
            target: "static".to_string(),
            output_format: "html".to_string(),
            constraints: PublishingConstraintsValue {
                max_pages: 10,
                max_sections_per_page: 20,
            },
        },
    }
}

struct TestRegistry;

impl TemplateRegistry for TestRegistry {
    fn lookup_by_industry(&self, industry_code: &str) -> (String, u32) {
        match industry_code {
            "tech" => ("tech".to_string(), 1),
            _ => (DEFAULT_TEMPLATE_ID.to_string(), 1),
        }
    }

    fn load(&self, template_id: &str) -> TemplateDefinition {
        match template_id {
            "tech" => template("tech", "IT Services For Growth"),
            _ => template(DEFAULT_TEMPLATE_ID, "Online Presence"),
        }
    }
}

pub fn test_registry() -> impl TemplateRegistry {
    TestRegistry
}
