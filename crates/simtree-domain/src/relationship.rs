//! Relationship module - pairwise edge records between persons

use crate::buckets::Bucket;
use crate::person::PersonId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a relationship record, based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(Uuid);

impl RelationshipId {
    /// Generate a new UUIDv7-based RelationshipId
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RelationshipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of relationship between two persons
///
/// `parent`/`child` are inverse views of the same edge: which bucket each
/// endpoint lands in depends on the direction. `sibling` and
/// `partner`/`spouse` are symmetric. `spouse` is a distinct wire value but
/// shares the partner buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    /// Person 1 is a parent of person 2
    Parent,
    /// Person 1 is a child of person 2
    Child,
    /// The two persons are siblings
    Sibling,
    /// The two persons are partners
    Partner,
    /// The two persons are married
    Spouse,
}

impl RelationshipKind {
    /// String representation, matching the persisted wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::Parent => "parent",
            RelationshipKind::Child => "child",
            RelationshipKind::Sibling => "sibling",
            RelationshipKind::Partner => "partner",
            RelationshipKind::Spouse => "spouse",
        }
    }

    /// The adjacency buckets this kind updates, as (person1's, person2's)
    ///
    /// Adding `Relationship(kind, A, B)` inserts B into A's first bucket and
    /// A into B's second bucket; removal reverses the same pair.
    pub fn bucket_pair(&self) -> (Bucket, Bucket) {
        match self {
            RelationshipKind::Parent => (Bucket::Children, Bucket::Parents),
            RelationshipKind::Child => (Bucket::Parents, Bucket::Children),
            RelationshipKind::Sibling => (Bucket::Siblings, Bucket::Siblings),
            RelationshipKind::Partner | RelationshipKind::Spouse => {
                (Bucket::Partners, Bucket::Partners)
            }
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pairwise relationship record between two persons
///
/// Records are append-only history; the per-person buckets are the derived
/// view the store keeps in step with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Unique identifier
    pub id: RelationshipId,

    /// Kind of relationship
    #[serde(rename = "type")]
    pub kind: RelationshipKind,

    /// First endpoint
    pub person1_id: PersonId,

    /// Second endpoint
    pub person2_id: PersonId,

    /// When the relationship began
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// When the relationship ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Always true on creation; no operation currently flips it
    pub is_active: bool,
}

impl Relationship {
    /// Create a new active relationship between two persons
    pub fn new(kind: RelationshipKind, person1_id: PersonId, person2_id: PersonId) -> Self {
        Self {
            id: RelationshipId::new(),
            kind,
            person1_id,
            person2_id,
            start_date: None,
            end_date: None,
            is_active: true,
        }
    }

    /// True if this record joins `a` and `b` with `kind`, in either order
    pub fn links(&self, a: PersonId, b: PersonId, kind: RelationshipKind) -> bool {
        self.kind == kind
            && ((self.person1_id == a && self.person2_id == b)
                || (self.person1_id == b && self.person2_id == a))
    }

    /// True if this record references `id` at either endpoint
    pub fn involves(&self, id: PersonId) -> bool {
        self.person1_id == id || self.person2_id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_relationship_is_active() {
        let rel = Relationship::new(RelationshipKind::Spouse, PersonId::new(), PersonId::new());
        assert!(rel.is_active);
        assert!(rel.start_date.is_none());
        assert!(rel.end_date.is_none());
    }

    #[test]
    fn test_links_matches_either_order() {
        let a = PersonId::new();
        let b = PersonId::new();
        let rel = Relationship::new(RelationshipKind::Sibling, a, b);

        assert!(rel.links(a, b, RelationshipKind::Sibling));
        assert!(rel.links(b, a, RelationshipKind::Sibling));
        assert!(!rel.links(a, b, RelationshipKind::Partner));
        assert!(!rel.links(a, PersonId::new(), RelationshipKind::Sibling));
    }

    #[test]
    fn test_bucket_pair_inverse_kinds() {
        use crate::buckets::Bucket;

        assert_eq!(
            RelationshipKind::Parent.bucket_pair(),
            (Bucket::Children, Bucket::Parents)
        );
        assert_eq!(
            RelationshipKind::Child.bucket_pair(),
            (Bucket::Parents, Bucket::Children)
        );
        assert_eq!(
            RelationshipKind::Spouse.bucket_pair(),
            RelationshipKind::Partner.bucket_pair()
        );
    }

    #[test]
    fn test_wire_shape() {
        let rel = Relationship::new(RelationshipKind::Spouse, PersonId::new(), PersonId::new());
        let json = serde_json::to_value(&rel).unwrap();

        assert_eq!(json["type"], "spouse");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["person1Id"], rel.person1_id.to_string());
        assert!(json.get("startDate").is_none());
    }
}
