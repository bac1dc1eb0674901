//! `StaticTemplateRegistry`: the compiled-once `TemplateRegistry` backing
//! production generation (§4.C.2). Each of the eight closed industry
//! codes maps to its own template; everything else (including `other`)
//! falls back to `default`.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::json;

use sitecraft_core::generator::registry::{TemplateRegistry, DEFAULT_TEMPLATE_ID};
use sitecraft_types::config::{Palette, PublishingConstraintsValue, RadiusToken, Typography};
use sitecraft_types::template::{
    PageTemplate, PublishingDefaults, SectionTemplate, SeoDefaults, TemplateDefinition,
    ThemeDefaults,
};

struct Spec {
    template_id: &'static str,
    theme_id: &'static str,
    palette: Palette,
    title_suffix: &'static str,
    description: &'static str,
    hero_heading: &'static str,
    hero_subheading: &'static str,
    about_body: &'static str,
}

fn palette(primary: &str, accent: &str, background: &str, surface: &str, text: &str, muted: &str) -> Palette {
    Palette {
        primary: primary.to_string(),
        accent: accent.to_string(),
        background: background.to_string(),
        surface: surface.to_string(),
        text: text.to_string(),
        muted_text: muted.to_string(),
    }
}

fn specs() -> Vec<Spec> {
    vec![
        Spec {
            template_id: "tech",
            theme_id: "tech-slate",
            palette: palette("#0f172a", "#2563eb", "#ffffff", "#f8fafc", "#0f172a", "#64748b"),
            title_suffix: "IT-услуги для роста бизнеса",
            description: "{{brandName}} builds technology solutions for {{industryLabel}} teams.",
            hero_heading: "{{brandName}} \u{2014} IT-услуги для роста бизнеса",
            hero_subheading: "Modern engineering for ambitious products.",
            about_body: "We partner with growing teams to ship reliable software.",
        },
        Spec {
            template_id: "finance",
            theme_id: "finance-emerald",
            palette: palette("#064e3b", "#059669", "#ffffff", "#f0fdf4", "#052e1d", "#4b5563"),
            title_suffix: "Trusted financial guidance",
            description: "{{brandName}} helps {{industryLabel}} clients plan with confidence.",
            hero_heading: "{{brandName}} \u{2014} Trusted financial guidance",
            hero_subheading: "Clear advice, measured risk, steady growth.",
            about_body: "Our advisors bring decades of experience to every plan.",
        },
        Spec {
            template_id: "healthcare",
            theme_id: "healthcare-sky",
            palette: palette("#0c4a6e", "#0284c7", "#ffffff", "#f0f9ff", "#0c4a6e", "#64748b"),
            title_suffix: "Care you can rely on",
            description: "{{brandName}} provides {{industryLabel}} services to the community.",
            hero_heading: "{{brandName}} \u{2014} Care you can rely on",
            hero_subheading: "Compassionate care, modern facilities.",
            about_body: "Our practitioners put patients first at every visit.",
        },
        Spec {
            template_id: "retail",
            theme_id: "retail-amber",
            palette: palette("#78350f", "#d97706", "#ffffff", "#fffbeb", "#451a03", "#92400e"),
            title_suffix: "Shop the collection",
            description: "{{brandName}} brings curated {{industryLabel}} products to every customer.",
            hero_heading: "{{brandName}} \u{2014} Shop the collection",
            hero_subheading: "New arrivals every week.",
            about_body: "We source products our customers keep coming back for.",
        },
        Spec {
            template_id: "education",
            theme_id: "education-indigo",
            palette: palette("#312e81", "#4f46e5", "#ffffff", "#eef2ff", "#1e1b4b", "#4338ca"),
            title_suffix: "Learning that lasts",
            description: "{{brandName}} delivers {{industryLabel}} programs for every learner.",
            hero_heading: "{{brandName}} \u{2014} Learning that lasts",
            hero_subheading: "Courses designed by practitioners, not theorists.",
            about_body: "Our instructors have taught thousands of students.",
        },
        Spec {
            template_id: "real-estate",
            theme_id: "real-estate-stone",
            palette: palette("#44403c", "#b45309", "#ffffff", "#fafaf9", "#1c1917", "#78716c"),
            title_suffix: "Find your next address",
            description: "{{brandName}} connects buyers and sellers in {{industryLabel}}.",
            hero_heading: "{{brandName}} \u{2014} Find your next address",
            hero_subheading: "Local expertise, honest numbers.",
            about_body: "We guide every transaction from first tour to closing.",
        },
        Spec {
            template_id: "consulting",
            theme_id: "consulting-graphite",
            palette: palette("#1f2937", "#6366f1", "#ffffff", "#f3f4f6", "#111827", "#6b7280"),
            title_suffix: "Strategy, delivered",
            description: "{{brandName}} advises {{industryLabel}} organizations on what to do next.",
            hero_heading: "{{brandName}} \u{2014} Strategy, delivered",
            hero_subheading: "Practical plans, not slide decks.",
            about_body: "We work alongside your team until the plan ships.",
        },
        Spec {
            template_id: "restaurant",
            theme_id: "restaurant-terracotta",
            palette: palette("#7c2d12", "#ea580c", "#ffffff", "#fff7ed", "#431407", "#9a3412"),
            title_suffix: "Made fresh, served daily",
            description: "{{brandName}} serves {{industryLabel}} dishes made from scratch.",
            hero_heading: "{{brandName}} \u{2014} Made fresh, served daily",
            hero_subheading: "A seasonal menu, a warm room.",
            about_body: "Every dish starts with ingredients from local growers.",
        },
        Spec {
            template_id: DEFAULT_TEMPLATE_ID,
            theme_id: "default-neutral",
            palette: palette("#18181b", "#3b82f6", "#ffffff", "#fafafa", "#18181b", "#71717a"),
            title_suffix: "Online presence, done right",
            description: "{{brandName}} serves {{industryLabel}} customers online.",
            hero_heading: "{{brandName}}",
            hero_subheading: "A new site built for {{industryLabel}}.",
            about_body: "We're glad you're here. Learn more about what we do.",
        },
    ]
}

fn build_template(spec: &Spec) -> TemplateDefinition {
    TemplateDefinition {
        template_id: spec.template_id.to_string(),
        template_version: 1,
        theme: ThemeDefaults {
            theme_id: spec.theme_id.to_string(),
            palette: spec.palette.clone(),
            typography: Typography {
                font_family: "Inter".to_string(),
                scale: 1.0,
            },
            radius: RadiusToken::Md,
            spacing: "comfortable".to_string(),
        },
        seo: SeoDefaults {
            title_suffix: spec.title_suffix.to_string(),
            description: spec.description.to_string(),
        },
        pages: vec![PageTemplate {
            id: "home".to_string(),
            path: "/".to_string(),
            title: "{{brandName}} Home".to_string(),
            sections: vec![
                SectionTemplate {
                    id: "hero-1".to_string(),
                    section_type: "hero".to_string(),
                    props: json!({
                        "heading": spec.hero_heading,
                        "subheading": spec.hero_subheading,
                    }),
                },
                SectionTemplate {
                    id: "about-1".to_string(),
                    section_type: "about".to_string(),
                    props: json!({
                        "title": "About {{brandName}}",
                        "body": spec.about_body,
                    }),
                },
                SectionTemplate {
                    id: "contact-1".to_string(),
                    section_type: "contact".to_string(),
                    props: json!({
                        "email": "hello@{{slug}}.example",
                        "phone": "",
                    }),
                },
            ],
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

fn templates_by_id() -> &'static HashMap<&'static str, TemplateDefinition> {
    static TEMPLATES: OnceLock<HashMap<&'static str, TemplateDefinition>> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        specs()
            .iter()
            .map(|spec| (spec.template_id, build_template(spec)))
            .collect()
    })
}

/// In-process registry compiled once from the static `specs()` table above.
/// Industry code and template id happen to coincide one-to-one except for
/// `other`, which resolves to `default` like every unrecognized code.
#[derive(Clone, Copy)]
pub struct StaticTemplateRegistry;

impl StaticTemplateRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StaticTemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry for StaticTemplateRegistry {
    fn lookup_by_industry(&self, industry_code: &str) -> (String, u32) {
        let templates = templates_by_id();
        match templates.get(industry_code) {
            Some(def) => (def.template_id.clone(), def.template_version),
            None => {
                let default = &templates[DEFAULT_TEMPLATE_ID];
                (default.template_id.clone(), default.template_version)
            }
        }
    }

    fn load(&self, template_id: &str) -> TemplateDefinition {
        let templates = templates_by_id();
        templates
            .get(template_id)
            .or_else(|| templates.get(DEFAULT_TEMPLATE_ID))
            .expect("default template is always registered")
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_industry_code_resolves_to_its_own_template() {
        let registry = StaticTemplateRegistry::new();
        for code in [
            "tech", "finance", "healthcare", "retail", "education", "real-estate", "consulting",
            "restaurant",
        ] {
            let (template_id, version) = registry.lookup_by_industry(code);
            assert_eq!(template_id, code);
            assert_eq!(version, 1);
        }
    }

    #[test]
    fn unknown_code_resolves_to_default() {
        let registry = StaticTemplateRegistry::new();
        let (template_id, _) = registry.lookup_by_industry("other");
        assert_eq!(template_id, DEFAULT_TEMPLATE_ID);
        let (template_id, _) = registry.lookup_by_industry("not-a-real-code");
        assert_eq!(template_id, DEFAULT_TEMPLATE_ID);
    }

    #[test]
    fn load_falls_back_to_default_for_unknown_id() {
        let registry = StaticTemplateRegistry::new();
        let def = registry.load("not-a-real-template");
        assert_eq!(def.template_id, DEFAULT_TEMPLATE_ID);
    }

    #[test]
    fn tech_template_carries_the_expected_title_suffix() {
        let registry = StaticTemplateRegistry::new();
        let def = registry.load("tech");
        assert_eq!(def.seo.title_suffix, "IT-услуги для роста бизнеса");
    }
}
