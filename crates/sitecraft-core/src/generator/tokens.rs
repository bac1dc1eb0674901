//! Token resolution (§4.C step 5, §9 "Token resolver"): a context map plus
//! a single recursive walk. No user-defined tokens, no quoting, no
//! expression evaluation -- a strict substitution over a closed
//! vocabulary.

use serde_json::Value;

const TOKEN_LOGO_ASSET_ID: &str = "{{logoAssetId}}";

/// The closed token vocabulary, resolved once per generation from the
/// draft's brand profile and derived slug.
#[derive(Debug, Clone)]
pub struct TokenContext {
    pub brand_name: String,
    pub industry_label: String,
    pub logo_url: Option<String>,
    pub logo_asset_id: Option<String>,
    pub slug: String,
}

impl TokenContext {
    fn plain_substitutions(&self) -> [(&'static str, String); 4] {
        [
            ("{{brandName}}", self.brand_name.clone()),
            ("{{industryLabel}}", self.industry_label.clone()),
            ("{{logoUrl}}", self.logo_url.clone().unwrap_or_default()),
            ("{{slug}}", self.slug.clone()),
        ]
    }

    /// Resolves every `{{token}}` occurrence inside a string. When the
    /// entire string is exactly `{{logoAssetId}}`, callers should instead
    /// use `resolve_value` so the non-string (id or `null`) substitution
    /// applies; this method always yields the string form.
    fn resolve_string(&self, input: &str) -> String {
        let mut resolved = input.to_string();
        for (token, value) in self.plain_substitutions() {
            resolved = resolved.replace(token, &value);
        }
        let logo_asset_id_str = self
            .logo_asset_id
            .clone()
            .unwrap_or_else(|| "null".to_string());
        resolved.replace(TOKEN_LOGO_ASSET_ID, &logo_asset_id_str)
    }

    /// Recursively resolves tokens through a `props`-shaped JSON tree.
    /// A string value that is *exactly* `{{logoAssetId}}` resolves to the
    /// JSON id string or JSON `null`, not a stringified form; every other
    /// occurrence substitutes the literal text.
    pub fn resolve_value(&self, value: &Value) -> Value {
        match value {
            Value::String(s) if s == TOKEN_LOGO_ASSET_ID => match &self.logo_asset_id {
                Some(id) => Value::String(id.clone()),
                None => Value::Null,
            },
            Value::String(s) => Value::String(self.resolve_string(s)),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.resolve_value(v)).collect()),
            Value::Object(map) => {
                let mut resolved = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    resolved.insert(k.clone(), self.resolve_value(v));
                }
                Value::Object(resolved)
            }
            other => other.clone(),
        }
    }

    /// Resolves tokens in a plain string (page/section titles).
    pub fn resolve(&self, input: &str) -> String {
        self.resolve_string(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> TokenContext {
        TokenContext {
            brand_name: "Acme".to_string(),
            industry_label: "Technology".to_string(),
            logo_url: Some("https://cdn.example/logo.png".to_string()),
            logo_asset_id: Some("ast_1".to_string()),
            slug: "acme".to_string(),
        }
    }

    #[test]
    fn substitutes_plain_tokens_in_strings() {
        let resolved = ctx().resolve("Welcome to {{brandName}} ({{slug}})");
        assert_eq!(resolved, "Welcome to Acme (acme)");
    }

    #[test]
    fn logo_asset_id_as_whole_value_stays_typed() {
        let resolved = ctx().resolve_value(&json!("{{logoAssetId}}"));
        assert_eq!(resolved, json!("ast_1"));
    }

    #[test]
    fn logo_asset_id_missing_becomes_null() {
        let mut no_logo = ctx();
        no_logo.logo_asset_id = None;
        let resolved = no_logo.resolve_value(&json!("{{logoAssetId}}"));
        assert_eq!(resolved, Value::Null);
    }

    #[test]
    fn logo_asset_id_inside_larger_string_is_stringified() {
        let resolved = ctx().resolve_value(&json!("id=<{{logoAssetId}}>"));
        assert_eq!(resolved, json!("id=<ast_1>"));
    }

    #[test]
    fn resolves_recursively_through_objects_and_arrays() {
        let props = json!({
            "heading": "{{brandName}}",
            "items": ["{{industryLabel}}", {"url": "{{logoUrl}}"}],
            "count": 3,
            "enabled": true,
            "nothing": null,
        });
        let resolved = ctx().resolve_value(&props);
        assert_eq!(resolved["heading"], json!("Acme"));
        assert_eq!(resolved["items"][0], json!("Technology"));
        assert_eq!(resolved["items"][1]["url"], json!("https://cdn.example/logo.png"));
        assert_eq!(resolved["count"], json!(3));
        assert_eq!(resolved["enabled"], json!(true));
        assert_eq!(resolved["nothing"], Value::Null);
    }

    #[test]
    fn empty_logo_url_resolves_to_empty_string() {
        let mut no_logo = ctx();
        no_logo.logo_url = None;
        assert_eq!(no_logo.resolve("{{logoUrl}}"), "");
    }
}
