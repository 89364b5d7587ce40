//! Change events emitted by the store
//!
//! The UI subscribes to these instead of watching shared mutable state;
//! every event fires after the mutation has been applied and persisted.

use simtree_domain::{PersonId, RelationshipKind};

/// A mutation the store has applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A person was added
    PersonAdded(PersonId),
    /// A person's fields were updated
    PersonUpdated(PersonId),
    /// A person and all their relationships were removed
    PersonDeleted(PersonId),
    /// A relationship record was added and adjacency updated
    RelationshipAdded {
        /// First endpoint as passed by the caller
        person1: PersonId,
        /// Second endpoint as passed by the caller
        person2: PersonId,
        /// Kind of relationship
        kind: RelationshipKind,
    },
    /// Matching relationship records were removed and adjacency reversed
    RelationshipRemoved {
        /// First endpoint as passed by the caller
        person1: PersonId,
        /// Second endpoint as passed by the caller
        person2: PersonId,
        /// Kind of relationship
        kind: RelationshipKind,
    },
    /// The whole tree was replaced from persisted state
    TreeLoaded,
}
