//! Owning registry for people and their friendships.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;

use chrono::NaiveDateTime;

use friendgraph_core::{DomainError, DomainResult, Entity, PersonId};

use crate::person::Person;
use crate::traversal::{self, Visit};

/// Owns every [`Person`] of a friendship graph.
///
/// People refer to each other by [`PersonId`] only, so a graph full of cycles
/// is still a plain tree of ownership. Iteration follows insertion order.
///
/// All mutation takes `&mut self`; concurrent use needs external
/// synchronization around the whole graph.
#[derive(Debug, Clone, Default)]
pub struct PersonGraph {
    people: Vec<Person>,
    index: HashMap<PersonId, usize>,
}

impl PersonGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a new person and register it. Returns the generated identity.
    pub fn add_person(&mut self, name: impl Into<String>, born_in: NaiveDateTime) -> PersonId {
        let person = Person::new(name, born_in);
        let id = *person.id();
        self.index.insert(id, self.people.len());
        self.people.push(person);
        id
    }

    /// Register an already constructed person.
    ///
    /// Fails with `Conflict` if the identity is already registered.
    pub fn insert(&mut self, person: Person) -> DomainResult<PersonId> {
        let id = *person.id();
        if self.index.contains_key(&id) {
            return Err(DomainError::conflict(format!("person {id} already registered")));
        }
        self.index.insert(id, self.people.len());
        self.people.push(person);
        Ok(id)
    }

    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.index.get(id).map(|&idx| &self.people[idx])
    }

    pub(crate) fn position(&self, id: &PersonId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Person at an index obtained from [`position`](Self::position) on this same graph.
    pub(crate) fn person_at(&self, idx: usize) -> &Person {
        &self.people[idx]
    }

    pub(crate) fn get_mut(&mut self, id: &PersonId) -> Option<&mut Person> {
        self.index.get(id).map(|&idx| &mut self.people[idx])
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    /// Make `a` and `b` friends of each other.
    ///
    /// Symmetric and idempotent: afterwards each lists the other exactly once.
    /// Both identities must be registered. Linking a person to itself is not
    /// rejected; the self-relation is recorded once.
    pub fn add_friend(&mut self, a: PersonId, b: PersonId) -> DomainResult<()> {
        for id in [a, b] {
            if !self.contains(&id) {
                return Err(DomainError::not_found(format!("person {id}")));
            }
        }

        if let Some(person) = self.get_mut(&a) {
            if !person.link(b) {
                return Ok(());
            }
        }
        if let Some(friend) = self.get_mut(&b) {
            friend.link(a);
        }
        Ok(())
    }

    /// Resolve the friends of `id` to their registered people.
    pub fn friends_of(&self, id: &PersonId) -> DomainResult<Vec<&Person>> {
        let person = self
            .get(id)
            .ok_or_else(|| DomainError::not_found(format!("person {id}")))?;
        Ok(person.friends().iter().filter_map(|f| self.get(f)).collect())
    }

    /// Identities of the component containing `root`, in first-visit order.
    ///
    /// Empty when `root` is not registered.
    pub fn reachable_from(&self, root: PersonId) -> Vec<PersonId> {
        let visits = traversal::depth_first::<_, Infallible, _>(root, |id| {
            Ok(self.get(&id).map(|p| Visit::new((), p.friends())))
        });
        match visits {
            Ok(visits) => visits.into_iter().map(|(id, _)| id).collect(),
            Err(never) => match never {},
        }
    }

    /// Structural equality of two components.
    ///
    /// True when the component reachable from `root` here and the one reachable
    /// from `other_root` in `other` contain the same identities, and each
    /// identity has the same name, the same `born_in`, and the same set of
    /// friends on both sides. Friend order is ignored.
    pub fn same_component(&self, root: PersonId, other: &PersonGraph, other_root: PersonId) -> bool {
        let mine = self.reachable_from(root);
        let theirs: HashSet<PersonId> = other.reachable_from(other_root).into_iter().collect();

        if mine.is_empty() || mine.len() != theirs.len() {
            return false;
        }

        mine.iter().all(|id| {
            if !theirs.contains(id) {
                return false;
            }
            match (self.get(id), other.get(id)) {
                (Some(a), Some(b)) => {
                    let a_friends: HashSet<PersonId> = a.friends().into_iter().collect();
                    let b_friends: HashSet<PersonId> = b.friends().into_iter().collect();
                    a.name() == b.name() && a.born_in() == b.born_in() && a_friends == b_friends
                }
                _ => false,
            }
        })
    }
}
