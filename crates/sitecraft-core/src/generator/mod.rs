//! The deterministic template-driven configuration generator (§4.C):
//! industry -> template mapping, token resolution, theme/palette
//! selection, page/section synthesis.

pub mod registry;
pub mod slug;
pub mod tokens;

use chrono::{DateTime, Utc};
use sitecraft_types::config::{
    AssetRef, BrandBlock, ConfigGeneratorRef, PageConfig, PublishingBlock, PublishingOutput,
    RoutingBlock, SeoBlock, SectionConfig, SiteBlock, SiteConfig, ThemeBlock,
};
use sitecraft_types::draft::{normalize_brand_name, Draft};
use sitecraft_types::error::GeneratorError;
use sitecraft_types::ids::ConfigId;
use sitecraft_types::template::TemplateDefinition;

use self::registry::TemplateRegistry;
use self::tokens::TokenContext;

/// Fixed `configVersion` for schema v1 (§4.C step 10).
pub const CONFIG_VERSION: &str = "1.0.0";
const GENERATOR_ENGINE: &str = "sitecraft-generator";

/// Runs the full generation algorithm (§4.C steps 1-10), producing a
/// `SiteConfig` that is a pure function of `(draft, registry, engine
/// version)` except for `configId` and `generatedAt`.
pub fn generate(
    draft: &Draft,
    registry: &dyn TemplateRegistry,
    now: DateTime<Utc>,
) -> Result<SiteConfig, GeneratorError> {
    let brand_name = normalize_brand_name(&draft.brand_profile.brand_name)
        .map_err(|e| GeneratorError::InvalidBrandName(e.to_string()))?;

    let (template_id, _industry_template_version) =
        registry.lookup_by_industry(draft.brand_profile.industry.code.as_str());
    let template = registry.load(&template_id);

    let slug = self::slug::slug(&brand_name);

    let logo_url = draft.brand_profile.logo.as_ref().map(|l| l.url.clone());
    let logo_asset_id = draft
        .brand_profile
        .logo
        .as_ref()
        .map(|l| l.asset_id.to_string());

    let ctx = TokenContext {
        brand_name: brand_name.clone(),
        industry_label: draft.brand_profile.industry.label.clone(),
        logo_url: logo_url.clone(),
        logo_asset_id: logo_asset_id.clone(),
        slug: slug.clone(),
    };

    let brand = BrandBlock {
        name: brand_name.clone(),
        industry: draft.brand_profile.industry.code.as_str().to_string(),
        slug: slug.clone(),
        logo: draft.brand_profile.logo.as_ref().map(|l| AssetRef {
            asset_id: l.asset_id.to_string(),
            url: l.url.clone(),
            mime_type: l.mime_type.clone(),
            width: l.width,
            height: l.height,
        }),
    };

    let theme = ThemeBlock {
        theme_id: template.theme.theme_id.clone(),
        palette: template.theme.palette.clone(),
        typography: template.theme.typography.clone(),
        radius: template.theme.radius,
        spacing: template.theme.spacing.clone(),
    };

    let pages = compose_pages(&template, &ctx);

    let title_suffix = ctx.resolve(&template.seo.title_suffix);
    let site = SiteBlock {
        language: "en".to_string(),
        title: format!("{brand_name} \u{2014} {title_suffix}"),
        description: ctx.resolve(&template.seo.description),
        routing: RoutingBlock {
            base_path: format!("/{slug}"),
            trailing_slash: false,
        },
        seo: SeoBlock {
            title: format!("{brand_name} \u{2014} {title_suffix}"),
            description: ctx.resolve(&template.seo.description),
            og_image_asset_id: logo_asset_id.clone(),
        },
    };

    let assets = draft
        .brand_profile
        .logo
        .as_ref()
        .map(|l| {
            vec![AssetRef {
                asset_id: l.asset_id.to_string(),
                url: l.url.clone(),
                mime_type: l.mime_type.clone(),
                width: l.width,
                height: l.height,
            }]
        })
        .unwrap_or_default();

    let publishing = PublishingBlock {
        target: template.publishing.target.clone(),
        output: PublishingOutput {
            format: template.publishing.output_format.clone(),
            entry_page_id: pages.first().map(|p| p.id.clone()).unwrap_or_default(),
        },
        constraints: template.publishing.constraints.clone(),
    };

    Ok(SiteConfig {
        schema_version: 1,
        config_version: CONFIG_VERSION.to_string(),
        config_id: ConfigId::generate(),
        draft_id: draft.draft_id.clone(),
        generated_at: now,
        generator: ConfigGeneratorRef {
            engine: GENERATOR_ENGINE.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            template_id: template.template_id.clone(),
            template_version: template.template_version,
        },
        brand,
        site,
        theme,
        pages,
        assets,
        publishing,
    })
}

fn compose_pages(template: &TemplateDefinition, ctx: &TokenContext) -> Vec<PageConfig> {
    template
        .pages
        .iter()
        .map(|page| PageConfig {
            id: page.id.clone(),
            path: page.path.clone(),
            title: ctx.resolve(&page.title),
            sections: page
                .sections
                .iter()
                .map(|section| SectionConfig {
                    id: section.id.clone(),
                    section_type: section.section_type.clone(),
                    props: ctx.resolve_value(&section.props),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::content_hash_excluding;
    use crate::testutil::{sample_draft, test_registry};
    use serde_json::to_value;

    #[test]
    fn generator_is_deterministic_modulo_config_id_and_generated_at() {
        let draft = sample_draft("Acme", "tech");
        let registry = test_registry();
        let now = Utc::now();

        let a = generate(&draft, &registry, now).unwrap();
        let b = generate(&draft, &registry, now + chrono::Duration::seconds(5)).unwrap();

        let hash_a = content_hash_excluding(&to_value(&a).unwrap(), &["configId", "generatedAt"]);
        let hash_b = content_hash_excluding(&to_value(&b).unwrap(), &["configId", "generatedAt"]);
        assert_eq!(hash_a, hash_b);
        assert_ne!(a.config_id, b.config_id);
    }

    #[test]
    fn unknown_industry_falls_back_to_default_template() {
        let draft = sample_draft("Acme", "unknown-industry");
        let registry = test_registry();
        let config = generate(&draft, &registry, Utc::now()).unwrap();
        assert_eq!(config.generator.template_id, "default");
    }

    #[test]
    fn site_title_uses_brand_name_and_template_suffix() {
        let draft = sample_draft("Acme", "tech");
        let registry = test_registry();
        let config = generate(&draft, &registry, Utc::now()).unwrap();
        assert!(config.site.title.starts_with("Acme \u{2014} "));
    }

    #[test]
    fn og_image_asset_id_is_null_without_logo() {
        let draft = sample_draft("Acme", "tech");
        let registry = test_registry();
        let config = generate(&draft, &registry, Utc::now()).unwrap();
        assert!(config.site.seo.og_image_asset_id.is_none());
        assert!(config.assets.is_empty());
    }
}
