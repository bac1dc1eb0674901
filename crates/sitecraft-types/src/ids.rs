use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Error returned when a string does not parse as a prefixed identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid {kind} id: '{value}'")]
pub struct IdParseError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! prefixed_id {
    ($name:ident, $prefix:literal, $kind:literal) => {
        #[doc = concat!("Opaque time-sortable identifier prefixed `", $prefix, "`.")]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Mint a new identifier as `{prefix}{uuid_v7}`.
            pub fn generate() -> Self {
                Self(format!("{}{}", $prefix, Uuid::now_v7()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.starts_with($prefix) && s.len() > $prefix.len() {
                    Ok(Self(s.to_string()))
                } else {
                    Err(IdParseError {
                        kind: $kind,
                        value: s.to_string(),
                    })
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdParseError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

prefixed_id!(DraftId, "drf_", "draft");
prefixed_id!(ConfigId, "cfg_", "config");
prefixed_id!(ProjectId, "prj_", "project");
prefixed_id!(AssetId, "ast_", "asset");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_has_prefix_and_parses() {
        let id = DraftId::generate();
        assert!(id.as_str().starts_with("drf_"));
        let parsed: DraftId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_wrong_prefix() {
        let err = "cfg_abc".parse::<DraftId>().unwrap_err();
        assert_eq!(err.kind, "draft");
    }

    #[test]
    fn rejects_bare_prefix() {
        assert!("drf_".parse::<DraftId>().is_err());
    }

    #[test]
    fn distinct_prefixes() {
        assert_eq!(DraftId::PREFIX, "drf_");
        assert_eq!(ConfigId::PREFIX, "cfg_");
        assert_eq!(ProjectId::PREFIX, "prj_");
        assert_eq!(AssetId::PREFIX, "ast_");
    }
}
