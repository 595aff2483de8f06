//! Visited-set guarded depth-first walk over the friendship graph.
//!
//! Friendship is symmetric, so every non-trivial graph is cyclic (A↔B is
//! already a cycle). The walk records each identity the first time it is
//! reached and never expands it again.

use std::collections::HashSet;

use friendgraph_core::PersonId;

/// What the walk learns when it expands one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit<R> {
    /// Record to store for this node.
    pub record: R,
    /// Identities to walk next, in order.
    pub neighbors: Vec<PersonId>,
}

impl<R> Visit<R> {
    pub fn new(record: R, neighbors: Vec<PersonId>) -> Self {
        Self { record, neighbors }
    }
}

/// Walk the component containing `root`, calling `expand` once per identity.
///
/// Returns `(identity, record)` pairs in first-visit order, which is the
/// pre-order of a recursive depth-first walk that follows neighbours in the
/// order `expand` lists them. `expand` returning `Ok(None)` means the identity
/// is unknown; it is skipped and the walk goes on. The first error aborts the
/// walk.
///
/// Uses an explicit stack, so long friendship chains do not grow the call stack.
pub fn depth_first<R, E, F>(root: PersonId, mut expand: F) -> Result<Vec<(PersonId, R)>, E>
where
    F: FnMut(PersonId) -> Result<Option<Visit<R>>, E>,
{
    let mut visited: HashSet<PersonId> = HashSet::new();
    let mut out = Vec::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }

        let Some(visit) = expand(id)? else {
            tracing::warn!(person = %id, "traversal reached an unknown identity; skipping");
            continue;
        };
        tracing::trace!(person = %id, neighbors = visit.neighbors.len(), "visited");

        // Reverse so the first neighbour is popped first.
        stack.extend(
            visit
                .neighbors
                .iter()
                .rev()
                .filter(|n| !visited.contains(n))
                .copied(),
        );
        out.push((id, visit.record));
    }

    Ok(out)
}
