//! Serialized form of a friendship graph.
//!
//! ```text
//! {
//!   "objects": {
//!     "<identity>": { "name": "...", "born_in": "...", "friends": ["<identity>", ...] },
//!     ...
//!   },
//!   "root_id": "<identity>"
//! }
//! ```

use core::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DecodingError, EncodingError};

/// One person as stored on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    pub name: String,
    pub born_in: String,
    pub friends: Vec<String>,
}

/// Identity → record entries, in document order.
///
/// Serialized as a JSON object. Deserialization keeps every entry, including
/// repeated keys, so that reconstruction can report identity collisions
/// instead of silently keeping the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireObjects(Vec<(String, WireRecord)>);

impl WireObjects {
    pub fn new(entries: Vec<(String, WireRecord)>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[(String, WireRecord)] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<(String, WireRecord)> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for WireObjects {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, record) in &self.0 {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WireObjects {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ObjectsVisitor;

        impl<'de> Visitor<'de> for ObjectsVisitor {
            type Value = WireObjects;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from identity to person record")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, record)) = access.next_entry::<String, WireRecord>()? {
                    entries.push((id, record));
                }
                Ok(WireObjects(entries))
            }
        }

        deserializer.deserialize_map(ObjectsVisitor)
    }
}

/// The whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireGraph {
    pub objects: WireObjects,
    /// Always present in encoded output; optional here so a missing or null
    /// root is reported as [`DecodingError::MissingRootId`].
    #[serde(default)]
    pub root_id: Option<String>,
}

/// Text layout of the encoded document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireLayout {
    /// Two-space indented JSON.
    #[default]
    Pretty,
    /// Single-line JSON.
    Compact,
}

impl WireGraph {
    pub fn to_bytes(&self, layout: WireLayout) -> Result<Vec<u8>, EncodingError> {
        let bytes = match layout {
            WireLayout::Pretty => serde_json::to_vec_pretty(self)?,
            WireLayout::Compact => serde_json::to_vec(self)?,
        };
        Ok(bytes)
    }

    /// Parse a document. Accepts either layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodingError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, friends: &[&str]) -> WireRecord {
        WireRecord {
            name: name.to_string(),
            born_in: "2006-07-27T00:00:00".to_string(),
            friends: friends.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn objects_keep_document_order() {
        let doc = br#"{
            "objects": {
                "z": {"name": "Z", "born_in": "2006-07-27T00:00:00", "friends": ["a"]},
                "a": {"name": "A", "born_in": "2006-07-27T00:00:00", "friends": ["z"]}
            },
            "root_id": "z"
        }"#;

        let wire = WireGraph::from_bytes(doc).unwrap();
        let keys: Vec<&str> = wire.objects.entries().iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(wire.root_id.as_deref(), Some("z"));
    }

    #[test]
    fn repeated_keys_are_kept() {
        let doc = br#"{
            "objects": {
                "a": {"name": "A", "born_in": "2006-07-27T00:00:00", "friends": []},
                "a": {"name": "B", "born_in": "2006-07-27T00:00:00", "friends": []}
            },
            "root_id": "a"
        }"#;

        let wire = WireGraph::from_bytes(doc).unwrap();

        assert_eq!(wire.objects.len(), 2);
    }

    #[test]
    fn pretty_layout_uses_two_space_indent() {
        let wire = WireGraph {
            objects: WireObjects::new(vec![("a".to_string(), record("A", &[]))]),
            root_id: Some("a".to_string()),
        };

        let text = String::from_utf8(wire.to_bytes(WireLayout::Pretty).unwrap()).unwrap();

        assert!(text.starts_with("{\n  \"objects\": {\n    \"a\": {"));
        assert!(text.contains("\"friends\": []"));
        assert!(text.trim_end().ends_with("\"root_id\": \"a\"\n}"));
    }

    #[test]
    fn compact_layout_is_single_line() {
        let wire = WireGraph {
            objects: WireObjects::new(vec![("a".to_string(), record("A", &["b"]))]),
            root_id: Some("a".to_string()),
        };

        let text = String::from_utf8(wire.to_bytes(WireLayout::Compact).unwrap()).unwrap();

        assert_eq!(
            text,
            r#"{"objects":{"a":{"name":"A","born_in":"2006-07-27T00:00:00","friends":["b"]}},"root_id":"a"}"#
        );
    }

    #[test]
    fn missing_root_is_none_and_missing_fields_fail() {
        let wire = WireGraph::from_bytes(br#"{"objects": {}}"#).unwrap();
        assert!(wire.root_id.is_none());

        let err = WireGraph::from_bytes(br#"{"objects": {"a": {"name": "A"}}, "root_id": "a"}"#)
            .unwrap_err();
        assert!(matches!(err, DecodingError::Malformed(_)));
    }
}
