//! `friendgraph-core` — identity and error primitives shared by the graph crates.
//!
//! This crate contains **pure domain** primitives (no serialization policy, no IO).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::PersonId;
