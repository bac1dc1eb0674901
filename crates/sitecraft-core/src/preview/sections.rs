//! Per-section-type HTML builders and the JSON preview model. Every
//! builder receives already-escaped `props` and emits only escaped
//! substrings -- no builder ever interpolates a raw user string.

use serde_json::Value;
use sitecraft_types::config::SiteConfig;

use super::{escape_value, is_whitelisted, radius_px};

fn prop_str<'a>(props: &'a Value, key: &str) -> &'a str {
    props.get(key).and_then(Value::as_str).unwrap_or("")
}

fn prop_array<'a>(props: &'a Value, key: &str) -> &'a [Value] {
    props
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn render_hero(props: &Value) -> String {
    format!(
        "<section class=\"hero\"><h1>{}</h1><p>{}</p></section>",
        prop_str(props, "heading"),
        prop_str(props, "subheading"),
    )
}

fn render_features(props: &Value) -> String {
    let items: String = prop_array(props, "items")
        .iter()
        .map(|item| {
            format!(
                "<li><strong>{}</strong><span>{}</span></li>",
                prop_str(item, "title"),
                prop_str(item, "description"),
            )
        })
        .collect();
    format!("<section class=\"features\"><ul>{items}</ul></section>")
}

fn render_about(props: &Value) -> String {
    format!(
        "<section class=\"about\"><h2>{}</h2><p>{}</p></section>",
        prop_str(props, "title"),
        prop_str(props, "body"),
    )
}

fn render_contact(props: &Value) -> String {
    format!(
        "<section class=\"contact\"><p>{}</p><p>{}</p></section>",
        prop_str(props, "email"),
        prop_str(props, "phone"),
    )
}

fn render_services(props: &Value) -> String {
    let items: String = prop_array(props, "items")
        .iter()
        .map(|item| format!("<li>{}</li>", prop_str(item, "name")))
        .collect();
    format!("<section class=\"services\"><ul>{items}</ul></section>")
}

fn render_gallery(props: &Value) -> String {
    let items: String = prop_array(props, "images")
        .iter()
        .map(|item| {
            format!(
                "<figure><img src=\"{}\" alt=\"{}\"></figure>",
                prop_str(item, "url"),
                prop_str(item, "alt"),
            )
        })
        .collect();
    format!("<section class=\"gallery\">{items}</section>")
}

fn render_testimonials(props: &Value) -> String {
    let items: String = prop_array(props, "quotes")
        .iter()
        .map(|item| {
            format!(
                "<blockquote>{}<cite>{}</cite></blockquote>",
                prop_str(item, "quote"),
                prop_str(item, "author"),
            )
        })
        .collect();
    format!("<section class=\"testimonials\">{items}</section>")
}

fn render_pricing(props: &Value) -> String {
    let items: String = prop_array(props, "plans")
        .iter()
        .map(|item| {
            format!(
                "<div class=\"plan\"><h3>{}</h3><p>{}</p></div>",
                prop_str(item, "name"),
                prop_str(item, "price"),
            )
        })
        .collect();
    format!("<section class=\"pricing\">{items}</section>")
}

fn render_faq(props: &Value) -> String {
    let items: String = prop_array(props, "questions")
        .iter()
        .map(|item| {
            format!(
                "<details><summary>{}</summary><p>{}</p></details>",
                prop_str(item, "question"),
                prop_str(item, "answer"),
            )
        })
        .collect();
    format!("<section class=\"faq\">{items}</section>")
}

fn render_team(props: &Value) -> String {
    let items: String = prop_array(props, "members")
        .iter()
        .map(|item| {
            format!(
                "<div class=\"member\"><h4>{}</h4><span>{}</span></div>",
                prop_str(item, "name"),
                prop_str(item, "role"),
            )
        })
        .collect();
    format!("<section class=\"team\">{items}</section>")
}

fn render_footer(props: &Value) -> String {
    format!(
        "<footer><p>{}</p></footer>",
        prop_str(props, "copyright"),
    )
}

fn render_section_html(section_type: &str, escaped_props: &Value) -> Option<String> {
    match section_type {
        "hero" => Some(render_hero(escaped_props)),
        "features" => Some(render_features(escaped_props)),
        "about" => Some(render_about(escaped_props)),
        "contact" => Some(render_contact(escaped_props)),
        "services" => Some(render_services(escaped_props)),
        "gallery" => Some(render_gallery(escaped_props)),
        "testimonials" => Some(render_testimonials(escaped_props)),
        "pricing" => Some(render_pricing(escaped_props)),
        "faq" => Some(render_faq(escaped_props)),
        "team" => Some(render_team(escaped_props)),
        "footer" => Some(render_footer(escaped_props)),
        _ => None,
    }
}

fn style_block(config: &SiteConfig) -> String {
    let theme = &config.theme;
    format!(
        "<style>:root{{--primary:{};--accent:{};--background:{};--surface:{};--text:{};--muted:{};--radius:{};--spacing-scale:{};--font:{};}}body{{background:var(--background);color:var(--text);font-family:var(--font);}}</style>",
        theme.palette.primary,
        theme.palette.accent,
        theme.palette.background,
        theme.palette.surface,
        theme.palette.text,
        theme.palette.muted_text,
        radius_px(theme.radius),
        theme.typography.scale,
        theme.typography.font_family,
    )
}

/// Composes the built-in HTML document (§4.D "HTML output"). Sections
/// outside the whitelist are silently dropped.
pub fn render_document(config: &SiteConfig) -> String {
    let mut body = String::new();
    for page in &config.pages {
        for section in &page.sections {
            if !is_whitelisted(&section.section_type) {
                continue;
            }
            let escaped_props = escape_value(&section.props);
            if let Some(html) = render_section_html(&section.section_type, &escaped_props) {
                body.push_str(&html);
            }
        }
    }

    format!(
        "<!doctype html><html lang=\"{}\"><head><meta charset=\"utf-8\"><title>{}</title>{}</head><body>{}</body></html>",
        config.site.language,
        escape_value(&Value::String(config.site.title.clone()))
            .as_str()
            .unwrap_or_default(),
        style_block(config),
        body,
    )
}

/// Composes the sanitized JSON preview model (§4.D "JSON output"): the
/// same section whitelist applies, and every string leaf is HTML-escaped
/// -- the structure is preserved rather than flattened to markup.
pub fn render_json_model(config: &SiteConfig) -> Value {
    let pages: Vec<Value> = config
        .pages
        .iter()
        .map(|page| {
            let sections: Vec<Value> = page
                .sections
                .iter()
                .filter(|section| is_whitelisted(&section.section_type))
                .map(|section| {
                    serde_json::json!({
                        "id": section.id,
                        "type": section.section_type,
                        "props": escape_value(&section.props),
                    })
                })
                .collect();
            serde_json::json!({
                "id": page.id,
                "path": page.path,
                "title": escape_value(&Value::String(page.title.clone())),
                "sections": sections,
            })
        })
        .collect();

    serde_json::json!({
        "brand": escape_value(&serde_json::to_value(&config.brand).unwrap_or(Value::Null)),
        "theme": serde_json::to_value(&config.theme).unwrap_or(Value::Null),
        "pages": pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;
    use crate::testutil::{sample_draft, test_registry};
    use chrono::Utc;

    #[test]
    fn document_drops_non_whitelisted_sections() {
        let draft = sample_draft("Acme", "tech");
        let registry = test_registry();
        let mut config = generator::generate(&draft, &registry, Utc::now()).unwrap();
        config.pages[0].sections.push(sitecraft_types::config::SectionConfig {
            id: "video-1".to_string(),
            section_type: "video".to_string(),
            props: serde_json::json!({"url": "https://evil.example/video"}),
        });
        let html = render_document(&config);
        assert!(!html.contains("video-1"));
        assert!(!html.contains("evil.example"));
    }

    #[test]
    fn json_model_escapes_section_props() {
        let draft = sample_draft("Acme", "tech");
        let registry = test_registry();
        let config = generator::generate(&draft, &registry, Utc::now()).unwrap();
        let model = render_json_model(&config);
        let heading = model["pages"][0]["sections"][0]["props"]["heading"]
            .as_str()
            .unwrap();
        assert_eq!(heading, "Acme");
    }
}
