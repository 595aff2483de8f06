use chrono::NaiveDateTime;

use friendgraph_core::{Entity, PersonId};

/// A person: an identity-bearing node of the friendship graph.
///
/// `name` and `born_in` never change after construction. Friendships are held
/// as identities into the owning [`PersonGraph`](crate::graph::PersonGraph) and
/// are only added through [`PersonGraph::add_friend`](crate::graph::PersonGraph::add_friend),
/// which keeps both sides in step.
///
/// Fields are crate-visible so that [`DirectCodec`](crate::codec::DirectCodec)
/// can read and write them without going through the accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub(crate) id: PersonId,
    pub(crate) name: String,
    pub(crate) born_in: NaiveDateTime,
    pub(crate) friends: Vec<PersonId>,
}

impl Person {
    /// Create a person with a freshly generated identity and no friends.
    pub fn new(name: impl Into<String>, born_in: NaiveDateTime) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            born_in,
            friends: Vec::new(),
        }
    }

    /// Rebuild a person that already has an identity (decoding path).
    ///
    /// Goes through the normal constructor, then forces the identity. There is
    /// no public identity mutator.
    pub(crate) fn rehydrate(id: PersonId, name: impl Into<String>, born_in: NaiveDateTime) -> Self {
        let mut person = Self::new(name, born_in);
        person.id = id;
        person
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn born_in(&self) -> NaiveDateTime {
        self.born_in
    }

    /// Identities of this person's friends, in the order they were added.
    ///
    /// Returns a copy; the live relation list is not reachable from outside the crate.
    pub fn friends(&self) -> Vec<PersonId> {
        self.friends.clone()
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }

    pub fn is_friend_of(&self, other: &PersonId) -> bool {
        self.friends.contains(other)
    }

    /// Record `other` as a friend unless already present. One side only.
    pub(crate) fn link(&mut self, other: PersonId) -> bool {
        if self.friends.contains(&other) {
            return false;
        }
        self.friends.push(other);
        true
    }
}

impl Entity for Person {
    type Id = PersonId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
