//! A single canonical JSON serializer shared by the config hash and the
//! preview ETag (§9 "Canonical JSON"): object keys sorted, arrays kept in
//! declared order, numbers/strings escaped by `serde_json`'s own stable
//! rules. Divergence between callers would break cache stability, so every
//! caller goes through this module.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Renders `value` as compact JSON with every object's keys sorted
/// lexicographically, recursively. Arrays are left in declared order.
pub fn canonicalize(value: &Value) -> String {
    let sorted = sort_keys(value);
    serde_json::to_string(&sorted).expect("canonicalized value always serializes")
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = serde_json::Map::with_capacity(entries.len());
            for (k, v) in entries {
                sorted.insert(k.clone(), sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// SHA-256 of the canonical JSON rendering, as a lowercase hex string.
pub fn content_hash(value: &Value) -> String {
    let canonical = canonicalize(value);
    let digest = Sha256::digest(canonical.as_bytes());
    format!("{digest:x}")
}

/// Strips the given top-level keys from a JSON object before hashing. Used
/// to elide `configId`/`generatedAt` so that two generations of an
/// otherwise-unchanged draft hash identically (§4.C "Determinism
/// property").
pub fn content_hash_excluding(value: &Value, excluded_keys: &[&str]) -> String {
    let stripped = match value {
        Value::Object(map) => {
            let mut copy = map.clone();
            for key in excluded_keys {
                copy.remove(*key);
            }
            Value::Object(copy)
        }
        other => other.clone(),
    };
    content_hash(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorts_keys_recursively() {
        let a = json!({"b": 1, "a": {"d": 2, "c": 3}});
        let b = json!({"a": {"c": 3, "d": 2}, "b": 1});
        assert_eq!(canonicalize(&a), canonicalize(&b));
    }

    #[test]
    fn preserves_array_order() {
        let value = json!({"items": [3, 1, 2]});
        assert!(canonicalize(&value).contains("[3,1,2]"));
    }

    #[test]
    fn content_hash_is_stable_for_equal_values() {
        let a = json!({"x": 1, "y": 2});
        let b = json!({"y": 2, "x": 1});
        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn content_hash_excluding_ignores_volatile_fields() {
        let a = json!({"configId": "cfg_1", "generatedAt": "t1", "brand": "Acme"});
        let b = json!({"configId": "cfg_2", "generatedAt": "t2", "brand": "Acme"});
        assert_eq!(
            content_hash_excluding(&a, &["configId", "generatedAt"]),
            content_hash_excluding(&b, &["configId", "generatedAt"])
        );
    }

    #[test]
    fn content_hash_changes_when_payload_changes() {
        let a = json!({"brand": "Acme"});
        let b = json!({"brand": "Acme Co"});
        assert_ne!(content_hash(&a), content_hash(&b));
    }
}
