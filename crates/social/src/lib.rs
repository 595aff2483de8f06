//! Friendship graph domain module.
//!
//! People linked by symmetric friendships, held in an owning registry, plus a
//! cycle-safe codec that flattens a connected component into a self-contained
//! JSON document and rebuilds it. Two interchangeable codec strategies exist:
//! one that goes through the public accessors of [`Person`] only, and one that
//! reads and writes its fields directly.

pub mod codec;
pub mod config;
pub mod error;
pub mod graph;
pub mod person;
pub mod timestamp;
pub mod traversal;
pub mod wire;

pub use codec::{AccessorCodec, CodecPolicy, DecodedGraph, DirectCodec, GraphCodec, decode, encode};
pub use config::CodecConfig;
pub use error::{CodecError, DecodingError, EncodingError};
pub use graph::PersonGraph;
pub use person::Person;
pub use wire::{WireGraph, WireLayout, WireObjects, WireRecord};

pub use friendgraph_core::{DomainError, DomainResult, Entity, PersonId};
