use friendgraph_core::{Entity, PersonId};

use crate::error::{DecodingError, EncodingError};
use crate::graph::PersonGraph;
use crate::person::Person;
use crate::timestamp;
use crate::traversal::Visit;
use crate::wire::{WireLayout, WireRecord};

use super::{CodecPolicy, DecodedGraph, GraphCodec};

/// Codec that only uses the public surface of [`Person`] and [`PersonGraph`].
///
/// Decoding replays every serialized friendship through
/// [`PersonGraph::add_friend`], so the result is symmetric and free of
/// duplicates even if the document was not.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AccessorCodec {
    layout: WireLayout,
}

impl AccessorCodec {
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
        let friends = person.friends();
        let born_in = timestamp::render(&person.born_in())
            .map_err(|_| EncodingError::Timestamp(*person.id()))?;

        let record = WireRecord {
            name: person.name().to_string(),
            born_in,
            friends: friends.iter().map(ToString::to_string).collect(),
        };
        Ok(Visit::new(record, friends))
    }
}

impl GraphCodec for AccessorCodec {
    fn policy(&self) -> CodecPolicy {
        CodecPolicy::Accessors
    }

    fn encode(&self, graph: &PersonGraph, root: PersonId) -> Result<Vec<u8>, EncodingError> {
        super::encode_component(graph, root, self.layout, Self::describe)
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedGraph, DecodingError> {
        let mut rehydrated = super::rehydrate(bytes)?;

        let links = std::mem::take(&mut rehydrated.links);
        for (id, friends) in links {
            for friend in friends {
                rehydrated.graph.add_friend(id, friend)?;
            }
        }

        tracing::debug!(
            root = %rehydrated.root,
            people = rehydrated.graph.len(),
            policy = "accessors",
            "decoded friend graph"
        );
        rehydrated.finish()
    }
}
