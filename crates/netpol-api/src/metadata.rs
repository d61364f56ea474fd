use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Object metadata shared by both schema versions
///
/// Carries the identifying fields and the annotation map used by the
/// change-cause recorder. Annotations are stored in a `BTreeMap` so
/// serialized output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Create metadata with just a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Label selector shared by both schema versions
///
/// Selector matching semantics are out of scope here; the conversion layer
/// carries selectors across verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
}

/// Access to an object's annotation map
///
/// Implemented by any API object that carries [`ObjectMeta`], so the
/// recorder can operate on objects without knowing their concrete type.
pub trait Annotated {
    /// Read-only view of the annotation map
    fn annotations(&self) -> &BTreeMap<String, String>;

    /// Mutable access to the annotation map
    fn annotations_mut(&mut self) -> &mut BTreeMap<String, String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metadata_serializes_to_empty_object() {
        let meta = ObjectMeta::default();
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_annotations_round_trip() {
        let mut meta = ObjectMeta::named("mypolicy");
        meta.annotations
            .insert("example.io/owner".to_string(), "net-team".to_string());

        let json = serde_json::to_string(&meta).unwrap();
        let back: ObjectMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, back);
    }
}
