//! Graph codecs: flatten a friendship component to bytes and rebuild it.
//!
//! [`AccessorCodec`] and [`DirectCodec`] produce identical bytes for the same
//! graph and layout. They differ in how they touch a [`Person`]:
//!
//! - `AccessorCodec` reads through `name()`, `born_in()` and `friends()`, and
//!   restores friendships with [`PersonGraph::add_friend`].
//! - `DirectCodec` reads the fields themselves and overwrites each decoded
//!   person's relation list with the serialized one, as is. It neither
//!   deduplicates nor checks symmetry.
//!
//! Both decoders share the same reconstruction of people: every record becomes
//! a fresh [`Person`] whose identity is then forced to the serialized one.

mod accessor;
mod direct;

pub use accessor::AccessorCodec;
pub use direct::DirectCodec;

use serde::{Deserialize, Serialize};

use friendgraph_core::{DomainError, PersonId};

use crate::error::{CodecError, DecodingError, EncodingError};
use crate::graph::PersonGraph;
use crate::person::Person;
use crate::timestamp;
use crate::traversal::{self, Visit};
use crate::wire::{WireGraph, WireLayout, WireObjects, WireRecord};

/// How a codec reaches into a [`Person`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecPolicy {
    /// Public accessors and the symmetric `add_friend` only.
    #[default]
    Accessors,
    /// Direct field access.
    Direct,
}

/// Encode/decode strategy for a friendship graph.
pub trait GraphCodec: Send + Sync {
    fn policy(&self) -> CodecPolicy;

    /// Serialize the component containing `root`.
    ///
    /// Never mutates the graph.
    fn encode(&self, graph: &PersonGraph, root: PersonId) -> Result<Vec<u8>, EncodingError>;

    /// Rebuild a graph from bytes produced by [`encode`](Self::encode).
    fn decode(&self, bytes: &[u8]) -> Result<DecodedGraph, DecodingError>;

    /// Encode then decode.
    fn round_trip(&self, graph: &PersonGraph, root: PersonId) -> Result<DecodedGraph, CodecError> {
        let bytes = self.encode(graph, root)?;
        Ok(self.decode(&bytes)?)
    }
}

/// A freshly reconstructed graph and its root.
///
/// Owns every decoded person; nothing is shared with the graph that was encoded.
#[derive(Debug, Clone)]
pub struct DecodedGraph {
    graph: PersonGraph,
    root: PersonId,
    root_index: usize,
}

impl DecodedGraph {
    fn new(graph: PersonGraph, root: PersonId) -> Result<Self, DecodingError> {
        let root_index = graph
            .position(&root)
            .ok_or(DecodingError::UnknownRoot(root))?;
        Ok(Self {
            graph,
            root,
            root_index,
        })
    }

    pub fn root(&self) -> &Person {
        self.graph.person_at(self.root_index)
    }

    pub fn root_id(&self) -> PersonId {
        self.root
    }

    pub fn graph(&self) -> &PersonGraph {
        &self.graph
    }

    pub fn into_parts(self) -> (PersonGraph, PersonId) {
        (self.graph, self.root)
    }
}

/// Walk the component from `root`, describe each person with `describe`, and
/// lay the result out as a document.
pub(crate) fn encode_component<F>(
    graph: &PersonGraph,
    root: PersonId,
    layout: WireLayout,
    mut describe: F,
) -> Result<Vec<u8>, EncodingError>
where
    F: FnMut(&Person) -> Result<Visit<WireRecord>, EncodingError>,
{
    if !graph.contains(&root) {
        return Err(EncodingError::UnknownRoot(root));
    }

    let visited = traversal::depth_first(root, |id| graph.get(&id).map(&mut describe).transpose())?;
    let people = visited.len();

    let wire = WireGraph {
        objects: WireObjects::new(
            visited
                .into_iter()
                .map(|(id, record)| (id.to_string(), record))
                .collect(),
        ),
        root_id: Some(root.to_string()),
    };
    let bytes = wire.to_bytes(layout)?;

    tracing::debug!(root = %root, people, bytes = bytes.len(), "encoded friend graph");
    Ok(bytes)
}

/// People rebuilt from a document, with their relations still unapplied.
pub(crate) struct Rehydrated {
    pub graph: PersonGraph,
    /// Each person's friend identities, verbatim from the document and all resolvable.
    pub links: Vec<(PersonId, Vec<PersonId>)>,
    pub root: PersonId,
}

impl Rehydrated {
    pub fn finish(self) -> Result<DecodedGraph, DecodingError> {
        DecodedGraph::new(self.graph, self.root)
    }
}

/// Parse an identity, accepting only the canonical lowercase hyphenated form.
///
/// Any other spelling of a UUID would come back out of `encode` as a different
/// string, so it is rejected rather than normalized.
fn parse_identity(text: &str) -> Result<PersonId, DecodingError> {
    let invalid = |source: DomainError| DecodingError::InvalidIdentity {
        value: text.to_string(),
        source,
    };
    let id: PersonId = text.parse().map_err(invalid)?;
    if id.to_string() != text {
        return Err(invalid(DomainError::invalid_id(
            "PersonId: not in canonical lowercase hyphenated form",
        )));
    }
    Ok(id)
}

/// Encode the component containing `root` with the given policy.
pub fn encode(
    policy: CodecPolicy,
    graph: &PersonGraph,
    root: PersonId,
) -> Result<Vec<u8>, EncodingError> {
    match policy {
        CodecPolicy::Accessors => AccessorCodec::new().encode(graph, root),
        CodecPolicy::Direct => DirectCodec::new().encode(graph, root),
    }
}

/// Decode a document with the given policy.
pub fn decode(policy: CodecPolicy, bytes: &[u8]) -> Result<DecodedGraph, DecodingError> {
    match policy {
        CodecPolicy::Accessors => AccessorCodec::new().decode(bytes),
        CodecPolicy::Direct => DirectCodec::new().decode(bytes),
    }
}

/// Parse a document and rebuild every person in it, without relations.
///
/// Fails on a missing root, unparsable identities or timestamps, repeated
/// identities, friends without a record of their own, and a root without a
/// record.
pub(crate) fn rehydrate(bytes: &[u8]) -> Result<Rehydrated, DecodingError> {
    let wire = WireGraph::from_bytes(bytes)?;
    let root = parse_identity(wire.root_id.as_deref().ok_or(DecodingError::MissingRootId)?)?;

    let entries = wire.objects.into_entries();
    let mut graph = PersonGraph::new();
    let mut pending = Vec::with_capacity(entries.len());

    for (id_text, record) in entries {
        let id = parse_identity(&id_text)?;
        let born_in =
            timestamp::parse(&record.born_in).map_err(|source| DecodingError::InvalidTimestamp {
                person: id,
                value: record.born_in.clone(),
                source,
            })?;

        graph
            .insert(Person::rehydrate(id, record.name, born_in))
            .map_err(|_| DecodingError::IdentityCollision(id))?;
        pending.push((id, record.friends));
    }

    let mut links = Vec::with_capacity(pending.len());
    for (id, friends) in pending {
        let resolved = friends
            .iter()
            .map(|text| {
                let friend = parse_identity(text)?;
                if graph.contains(&friend) {
                    Ok(friend)
                } else {
                    Err(DecodingError::DanglingReference { person: id, friend })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        links.push((id, resolved));
    }

    if !graph.contains(&root) {
        return Err(DecodingError::UnknownRoot(root));
    }

    Ok(Rehydrated { graph, links, root })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn born(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn codecs() -> Vec<Box<dyn GraphCodec>> {
        vec![Box::new(AccessorCodec::new()), Box::new(DirectCodec::new())]
    }

    fn triangle() -> (PersonGraph, [PersonId; 3]) {
        let mut graph = PersonGraph::new();
        let a = graph.add_person("A", born(2000, 1, 1));
        let b = graph.add_person("B", born(2000, 1, 2));
        let c = graph.add_person("C", born(2000, 1, 3));
        graph.add_friend(a, b).unwrap();
        graph.add_friend(b, c).unwrap();
        graph.add_friend(c, a).unwrap();
        (graph, [a, b, c])
    }

    #[test]
    fn both_policies_emit_identical_bytes() {
        let (graph, [a, _, _]) = triangle();

        let accessor = AccessorCodec::new().encode(&graph, a).unwrap();
        let direct = DirectCodec::new().encode(&graph, a).unwrap();

        assert_eq!(accessor, direct);
    }

    #[test]
    fn encoded_objects_follow_first_visit_order() {
        let (graph, [a, b, c]) = triangle();

        let bytes = AccessorCodec::new().encode(&graph, a).unwrap();
        let wire = WireGraph::from_bytes(&bytes).unwrap();
        let keys: Vec<String> = wire.objects.entries().iter().map(|(k, _)| k.clone()).collect();

        assert_eq!(keys, vec![a.to_string(), b.to_string(), c.to_string()]);
        assert_eq!(wire.root_id, Some(a.to_string()));
    }

    #[test]
    fn cycle_round_trips_for_every_policy() {
        let (graph, [a, _, _]) = triangle();

        for codec in codecs() {
            let decoded = codec.round_trip(&graph, a).unwrap();
            assert_eq!(decoded.root_id(), a);
            assert_eq!(decoded.graph().len(), 3);
            assert!(graph.same_component(a, decoded.graph(), a), "{:?}", codec.policy());
        }
    }

    #[test]
    fn unknown_root_fails_to_encode() {
        let (graph, _) = triangle();

        for codec in codecs() {
            let err = codec.encode(&graph, PersonId::new()).unwrap_err();
            assert!(matches!(err, EncodingError::UnknownRoot(_)));
        }
    }

    #[test]
    fn unreachable_people_are_not_encoded() {
        let (mut graph, [a, _, _]) = triangle();
        graph.add_person("Loner", born(1999, 12, 31));

        let bytes = DirectCodec::new().encode(&graph, a).unwrap();
        let wire = WireGraph::from_bytes(&bytes).unwrap();

        assert_eq!(wire.objects.len(), 3);
    }

    #[test]
    fn free_functions_match_the_codecs() {
        let (graph, [a, _, _]) = triangle();

        for policy in [CodecPolicy::Accessors, CodecPolicy::Direct] {
            let bytes = encode(policy, &graph, a).unwrap();
            assert_eq!(bytes, AccessorCodec::new().encode(&graph, a).unwrap());

            let (decoded, root) = decode(policy, &bytes).unwrap().into_parts();
            assert_eq!(root, a);
            assert!(graph.same_component(a, &decoded, root));
        }
    }

    #[test]
    fn non_canonical_identity_is_rejected() {
        let id = PersonId::new();

        assert_eq!(parse_identity(&id.to_string()).unwrap(), id);
        for text in [
            id.to_string().to_uppercase(),
            id.as_uuid().simple().to_string(),
            format!("{{{id}}}"),
            format!("urn:uuid:{id}"),
        ] {
            let err = parse_identity(&text).unwrap_err();
            assert!(matches!(err, DecodingError::InvalidIdentity { ref value, .. } if *value == text));
        }
    }

    #[test]
    fn rehydrate_resolves_links_verbatim() {
        let (graph, [a, b, c]) = triangle();
        let bytes = AccessorCodec::new().encode(&graph, a).unwrap();

        let rehydrated = rehydrate(&bytes).unwrap();

        assert_eq!(rehydrated.root, a);
        assert!(rehydrated.graph.iter().all(|p| p.friend_count() == 0));
        assert_eq!(rehydrated.links[0], (a, vec![b, c]));
    }
}
