use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of industry classifiers. Unknown codes map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndustryCode {
    Tech,
    Finance,
    Healthcare,
    Retail,
    Education,
    RealEstate,
    Consulting,
    Restaurant,
    Other,
}

impl IndustryCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndustryCode::Tech => "tech",
            IndustryCode::Finance => "finance",
            IndustryCode::Healthcare => "healthcare",
            IndustryCode::Retail => "retail",
            IndustryCode::Education => "education",
            IndustryCode::RealEstate => "real-estate",
            IndustryCode::Consulting => "consulting",
            IndustryCode::Restaurant => "restaurant",
            IndustryCode::Other => "other",
        }
    }

    /// Maps any input to a member of the closed set; unrecognized codes
    /// become `Other` per §3.1.
    pub fn from_code(code: &str) -> Self {
        match code {
            "tech" => IndustryCode::Tech,
            "finance" => IndustryCode::Finance,
            "healthcare" => IndustryCode::Healthcare,
            "retail" => IndustryCode::Retail,
            "education" => IndustryCode::Education,
            "real-estate" => IndustryCode::RealEstate,
            "consulting" => IndustryCode::Consulting,
            "restaurant" => IndustryCode::Restaurant,
            _ => IndustryCode::Other,
        }
    }

    fn default_label(&self) -> &'static str {
        match self {
            IndustryCode::Tech => "Technology",
            IndustryCode::Finance => "Finance",
            IndustryCode::Healthcare => "Healthcare",
            IndustryCode::Retail => "Retail",
            IndustryCode::Education => "Education",
            IndustryCode::RealEstate => "Real Estate",
            IndustryCode::Consulting => "Consulting",
            IndustryCode::Restaurant => "Restaurant",
            IndustryCode::Other => "General",
        }
    }
}

impl fmt::Display for IndustryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `{ code, label }` as carried on a draft. Label is derived from the
/// taxonomy default when the caller omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryInfo {
    pub code: IndustryCode,
    pub label: String,
}

impl IndustryInfo {
    /// Build from a raw code and optional label, mapping unknown codes to
    /// `other` and filling the label from the taxonomy when absent.
    pub fn new(raw_code: &str, label: Option<String>) -> Self {
        let code = IndustryCode::from_code(raw_code);
        let label = label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| code.default_label().to_string());
        Self { code, label }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_maps_to_other() {
        let info = IndustryInfo::new("unknown", None);
        assert_eq!(info.code, IndustryCode::Other);
        assert_eq!(info.label, "General");
    }

    #[test]
    fn known_code_keeps_caller_label() {
        let info = IndustryInfo::new("tech", Some("IT Services".to_string()));
        assert_eq!(info.code, IndustryCode::Tech);
        assert_eq!(info.label, "IT Services");
    }

    #[test]
    fn empty_label_falls_back_to_default() {
        let info = IndustryInfo::new("finance", Some("  ".to_string()));
        assert_eq!(info.label, "Finance");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(IndustryCode::RealEstate.to_string(), "real-estate");
    }
}
