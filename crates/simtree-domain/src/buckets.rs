//! Adjacency buckets embedded in each person record
//!
//! Each person carries four id lists, one per neighbor role. The store keeps
//! them symmetric with the tree's `Relationship` records; the helpers here
//! only guarantee the local invariant that a bucket never holds duplicates.

use crate::person::PersonId;
use serde::{Deserialize, Serialize};

/// The four neighbor roles a person's adjacency is partitioned into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Parents of this person
    Parents,
    /// Children of this person
    Children,
    /// Siblings of this person
    Siblings,
    /// Partners/spouses of this person
    Partners,
}

/// Per-person adjacency: four duplicate-free, insertion-ordered id lists
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelationshipBuckets {
    /// Ids of this person's parents
    #[serde(default)]
    pub parents: Vec<PersonId>,
    /// Ids of this person's children
    #[serde(default)]
    pub children: Vec<PersonId>,
    /// Ids of this person's siblings
    #[serde(default)]
    pub siblings: Vec<PersonId>,
    /// Ids of this person's partners/spouses
    #[serde(default)]
    pub partners: Vec<PersonId>,
}

impl RelationshipBuckets {
    /// Borrow the list for a bucket
    pub fn get(&self, bucket: Bucket) -> &[PersonId] {
        match bucket {
            Bucket::Parents => &self.parents,
            Bucket::Children => &self.children,
            Bucket::Siblings => &self.siblings,
            Bucket::Partners => &self.partners,
        }
    }

    fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<PersonId> {
        match bucket {
            Bucket::Parents => &mut self.parents,
            Bucket::Children => &mut self.children,
            Bucket::Siblings => &mut self.siblings,
            Bucket::Partners => &mut self.partners,
        }
    }

    /// Append `id` to a bucket unless it is already present
    ///
    /// Returns true if the bucket changed.
    pub fn insert(&mut self, bucket: Bucket, id: PersonId) -> bool {
        let list = self.get_mut(bucket);
        if list.contains(&id) {
            false
        } else {
            list.push(id);
            true
        }
    }

    /// Remove `id` from a bucket; no-op if absent
    pub fn remove(&mut self, bucket: Bucket, id: PersonId) {
        self.get_mut(bucket).retain(|entry| *entry != id);
    }

    /// Remove `id` from all four buckets (cascade of a person deletion)
    pub fn remove_everywhere(&mut self, id: PersonId) {
        self.parents.retain(|entry| *entry != id);
        self.children.retain(|entry| *entry != id);
        self.siblings.retain(|entry| *entry != id);
        self.partners.retain(|entry| *entry != id);
    }

    /// True if `id` appears in any bucket
    pub fn references(&self, id: PersonId) -> bool {
        self.parents.contains(&id)
            || self.children.contains(&id)
            || self.siblings.contains(&id)
            || self.partners.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut buckets = RelationshipBuckets::default();
        let id = PersonId::new();

        assert!(buckets.insert(Bucket::Siblings, id));
        assert!(!buckets.insert(Bucket::Siblings, id));
        assert_eq!(buckets.siblings, vec![id]);
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut buckets = RelationshipBuckets::default();
        let a = PersonId::new();
        let b = PersonId::new();
        let c = PersonId::new();

        buckets.insert(Bucket::Children, a);
        buckets.insert(Bucket::Children, b);
        buckets.insert(Bucket::Children, c);
        buckets.insert(Bucket::Children, a);

        assert_eq!(buckets.children, vec![a, b, c]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut buckets = RelationshipBuckets::default();
        let id = PersonId::new();
        buckets.remove(Bucket::Parents, id);
        assert!(buckets.parents.is_empty());
    }

    #[test]
    fn test_remove_everywhere() {
        let mut buckets = RelationshipBuckets::default();
        let target = PersonId::new();
        let other = PersonId::new();

        buckets.insert(Bucket::Parents, target);
        buckets.insert(Bucket::Children, target);
        buckets.insert(Bucket::Siblings, other);
        buckets.insert(Bucket::Partners, target);

        buckets.remove_everywhere(target);

        assert!(!buckets.references(target));
        assert!(buckets.references(other));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn arb_id() -> impl Strategy<Value = PersonId> {
        any::<u128>().prop_map(|v| {
            PersonId::from_string(&Uuid::from_u128(v).to_string()).unwrap()
        })
    }

    proptest! {
        /// Property: after any insert sequence, a bucket holds no duplicates
        #[test]
        fn test_no_duplicates_after_inserts(ids in prop::collection::vec(arb_id(), 0..32)) {
            let mut buckets = RelationshipBuckets::default();
            for id in &ids {
                buckets.insert(Bucket::Partners, *id);
            }

            let mut seen = std::collections::HashSet::new();
            for id in &buckets.partners {
                prop_assert!(seen.insert(*id), "duplicate entry {}", id);
            }
        }

        /// Property: insert followed by remove restores the original bucket
        #[test]
        fn test_insert_remove_roundtrip(ids in prop::collection::vec(arb_id(), 0..16), extra in arb_id()) {
            let mut buckets = RelationshipBuckets::default();
            for id in &ids {
                buckets.insert(Bucket::Siblings, *id);
            }
            let before = buckets.siblings.clone();

            if buckets.insert(Bucket::Siblings, extra) {
                buckets.remove(Bucket::Siblings, extra);
            }

            prop_assert_eq!(before, buckets.siblings);
        }
    }
}
