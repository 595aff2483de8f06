//! Codec error model.
//!
//! Encoding and decoding fail with distinct types so callers can tell which
//! side of a round trip went wrong. Neither is transient: retrying with the
//! same input gives the same result.

use thiserror::Error;

use friendgraph_core::{DomainError, PersonId};

/// Failure while turning a graph into bytes.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The requested root is not registered in the graph.
    #[error("root person {0} is not in the graph")]
    UnknownRoot(PersonId),

    /// A `born_in` timestamp could not be rendered.
    #[error("cannot render born_in of person {0}")]
    Timestamp(PersonId),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure while rebuilding a graph from bytes.
///
/// No partial graph is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum DecodingError {
    /// Not a JSON document of the expected shape (includes missing record fields).
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("document has no root_id")]
    MissingRootId,

    #[error("invalid identity '{value}': {source}")]
    InvalidIdentity {
        value: String,
        #[source]
        source: DomainError,
    },

    #[error("invalid born_in '{value}' for person {person}: {source}")]
    InvalidTimestamp {
        person: PersonId,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Two records carry the same identity.
    #[error("identity {0} appears more than once")]
    IdentityCollision(PersonId),

    /// A friend identity has no record of its own.
    #[error("person {person} lists friend {friend}, which has no record")]
    DanglingReference { person: PersonId, friend: PersonId },

    /// `root_id` names no record.
    #[error("root_id {0} has no record")]
    UnknownRoot(PersonId),

    /// Restoring a relation through the graph API failed.
    #[error("cannot restore relation: {0}")]
    Relation(#[from] DomainError),
}

/// Either side of a round trip.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Decoding(#[from] DecodingError),
}
