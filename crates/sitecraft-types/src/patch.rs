use serde::{Deserialize, Deserializer, Serialize};

/// A tagged optional distinguishing "field absent" (`Unset`, no change) from
/// "field explicitly null" (`Clear`) from "field present" (`Set`).
///
/// `PATCH` request bodies deserialize into this instead of a bare
/// `Option<T>` so the three states aren't conflated (§9 "Optional-nullable
/// fields").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Unset,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }

    /// Applies this patch to a `None`-able field, returning the new value.
    /// `Unset` keeps `current` unchanged.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Unset => current,
            Patch::Clear => None,
            Patch::Set(v) => Some(v),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|opt| match opt {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        })
    }
}

impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Patch::Unset => serializer.serialize_none(),
            Patch::Clear => serializer.serialize_none(),
            Patch::Set(v) => v.serialize(serializer),
        }
    }
}

/// Deserializes a field as `Patch::Unset` when the JSON key is absent, and
/// delegates to `Patch`'s own (null-vs-value) logic when present. Use with
/// `#[serde(default, deserialize_with = "patch::field")]` on PATCH DTOs.
pub fn field<'de, D, T>(deserializer: D) -> Result<Patch<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Patch::deserialize(deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Body {
        #[serde(default, deserialize_with = "field")]
        name: Patch<String>,
    }

    #[test]
    fn absent_field_is_unset() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.name, Patch::Unset);
    }

    #[test]
    fn null_field_is_clear() {
        let body: Body = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(body.name, Patch::Clear);
    }

    #[test]
    fn present_field_is_set() {
        let body: Body = serde_json::from_str(r#"{"name": "Acme"}"#).unwrap();
        assert_eq!(body.name, Patch::Set("Acme".to_string()));
    }

    #[test]
    fn apply_semantics() {
        let current = Some("old".to_string());
        assert_eq!(Patch::Unset.apply(current.clone()), current);
        assert_eq!(Patch::Clear.apply(current.clone()), None);
        assert_eq!(
            Patch::Set("new".to_string()).apply(current),
            Some("new".to_string())
        );
    }
}
