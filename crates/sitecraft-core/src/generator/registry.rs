//! Template registry contract (§4.C.2). Templates and the industry table
//! are read-only, compiled-once data; this trait only describes how the
//! generator looks them up. Both methods are pure and perform no I/O of
//! their own -- concrete implementations (in `sitecraft-infra`) load their
//! backing data once at construction time.

use sitecraft_types::template::TemplateDefinition;

/// Fallback template id used whenever an industry code or template id
/// cannot be resolved against the registry.
pub const DEFAULT_TEMPLATE_ID: &str = "default";

pub trait TemplateRegistry: Send + Sync {
    /// Maps an industry code to the template that should render it.
    /// Unknown codes resolve to `(DEFAULT_TEMPLATE_ID, _)`.
    fn lookup_by_industry(&self, industry_code: &str) -> (String, u32);

    /// Loads a template definition by id. An unknown id falls back to the
    /// `default` template.
    fn load(&self, template_id: &str) -> TemplateDefinition;
}
