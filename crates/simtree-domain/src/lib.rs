//! SimTree Domain Layer
//!
//! This crate contains the data model for the family-tree editor: persons,
//! relationships, the aggregate tree, and the trait boundary for the
//! key-value persistence backend. It carries no business logic beyond
//! small invariant-preserving helpers on the types themselves.
//!
//! ## Key Concepts
//!
//! - **Person**: a node in the family graph, carrying its own adjacency
//!   ([`RelationshipBuckets`]) for direct neighbor lookup
//! - **Relationship**: a pairwise edge record between two persons
//! - **FamilyTree**: the aggregate root owning both lists
//! - **TreeStorage**: the seam behind which persistence lives
//!
//! ## Architecture
//!
//! Infrastructure implementations (the store, storage backends,
//! notifications) live in other crates and depend on this one.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buckets;
pub mod person;
pub mod relationship;
pub mod traits;
pub mod tree;

// Re-exports for convenience
pub use buckets::{Bucket, RelationshipBuckets};
pub use person::{Gender, Person, PersonDraft, PersonId, PersonUpdate, Position};
pub use relationship::{Relationship, RelationshipId, RelationshipKind};
pub use tree::FamilyTree;
