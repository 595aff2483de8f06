use friendgraph_core::PersonId;

use crate::error::{DecodingError, EncodingError};
use crate::graph::PersonGraph;
use crate::person::Person;
use crate::timestamp;
use crate::traversal::Visit;
use crate::wire::{WireLayout, WireRecord};

use super::{CodecPolicy, DecodedGraph, GraphCodec};

/// Codec that reads and writes the fields of [`Person`] directly.
///
/// On decode each person's relation list is replaced wholesale by the one in
/// the document. Duplicates and one-sided relations in the document survive as
/// they are; the result is only symmetric if the document was.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DirectCodec {
    layout: WireLayout,
}

impl DirectCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: WireLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> WireLayout {
        self.layout
    }

    fn describe(person: &Person) -> Result<Visit<WireRecord>, EncodingError> {
        let record = WireRecord {
            name: person.name.clone(),
            born_in: timestamp::render(&person.born_in)
                .map_err(|_| EncodingError::Timestamp(person.id))?,
            friends: person.friends.iter().map(ToString::to_string).collect(),
        };
        Ok(Visit::new(record, person.friends.clone()))
    }
}

impl GraphCodec for DirectCodec {
    fn policy(&self) -> CodecPolicy {
        CodecPolicy::Direct
    }

    fn encode(&self, graph: &PersonGraph, root: PersonId) -> Result<Vec<u8>, EncodingError> {
        super::encode_component(graph, root, self.layout, Self::describe)
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedGraph, DecodingError> {
        let mut rehydrated = super::rehydrate(bytes)?;

        let links = std::mem::take(&mut rehydrated.links);
        for (id, friends) in links {
            if let Some(person) = rehydrated.graph.get_mut(&id) {
                person.friends = friends;
            }
        }

        tracing::debug!(
            root = %rehydrated.root,
            people = rehydrated.graph.len(),
            policy = "direct",
            "decoded friend graph"
        );
        rehydrated.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_configurable() {
        assert_eq!(DirectCodec::new().layout(), WireLayout::Pretty);
        assert_eq!(
            DirectCodec::with_layout(WireLayout::Compact).layout(),
            WireLayout::Compact
        );
    }

    #[test]
    fn decode_keeps_relations_verbatim() {
        let (a, b) = (PersonId::new(), PersonId::new());
        let doc = format!(
            r#"{{
                "objects": {{
                    "{a}": {{"name": "A", "born_in": "2000-01-01T00:00:00", "friends": ["{b}", "{b}"]}},
                    "{b}": {{"name": "B", "born_in": "2000-01-02T00:00:00", "friends": []}}
                }},
                "root_id": "{a}"
            }}"#
        );

        let decoded = DirectCodec::new().decode(doc.as_bytes()).unwrap();

        assert_eq!(decoded.root().friends(), vec![b, b]);
        assert!(decoded.graph().get(&b).unwrap().friends().is_empty());
    }
}
