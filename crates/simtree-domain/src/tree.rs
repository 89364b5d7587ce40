//! FamilyTree module - the aggregate root

use crate::person::{Person, PersonId};
use crate::relationship::Relationship;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The aggregate root: all persons and relationship records of one tree
///
/// Person id uniqueness is enforced by construction (ids are allocated by
/// the store), not validated on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTree {
    /// Tree identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// All persons, in insertion order
    pub persons: Vec<Person>,

    /// All relationship records, in insertion order
    pub relationships: Vec<Relationship>,

    /// Creation timestamp, immutable after construction
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl FamilyTree {
    /// Create an empty tree with the given display name
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: "1".to_string(),
            name: name.into(),
            persons: Vec::new(),
            relationships: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Linear lookup of a person by id
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.iter().find(|person| person.id == id)
    }

    /// Mutable linear lookup of a person by id
    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.persons.iter_mut().find(|person| person.id == id)
    }

    /// True if a person with this id exists
    pub fn contains(&self, id: PersonId) -> bool {
        self.person(id).is_some()
    }

    /// Refresh `updated_at` to now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for FamilyTree {
    fn default() -> Self {
        Self::new("My Family Tree")
    }
}
