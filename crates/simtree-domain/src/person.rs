//! Person module - the nodes of the family graph

use crate::buckets::RelationshipBuckets;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a person, based on UUIDv7
///
/// UUIDv7 provides chronological sortability (persons added later compare
/// greater), 128-bit uniqueness, and the canonical hyphenated string form
/// used in the persisted JSON payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
    /// Generate a new UUIDv7-based PersonId
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a PersonId from its string form
    ///
    /// # Examples
    ///
    /// ```
    /// use simtree_domain::PersonId;
    ///
    /// let id = PersonId::new();
    /// let parsed = PersonId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid person id: {}", e))
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gender of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other or unspecified
    Other,
}

/// 2D canvas coordinate, a layout hint for the UI only
///
/// Carries no semantics inside the graph; the store round-trips it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

/// A person in the family tree
///
/// The `relationships` buckets are derived adjacency maintained by the
/// store; they mirror the tree's `Relationship` records and must never be
/// edited directly by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,

    /// Given name (required)
    pub name: String,

    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    /// Birth date (ISO-8601 date string, accepted as-is)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    /// Death date, if deceased
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,

    /// Gender
    pub gender: Gender,

    /// Avatar image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Occupation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    /// Ordered list of character traits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<Vec<String>>,

    /// Derived adjacency, maintained by the store
    pub relationships: RelationshipBuckets,

    /// Canvas position (UI layout hint)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Person {
    /// Materialize a person from a draft, with empty relationship buckets
    pub fn new(id: PersonId, draft: PersonDraft) -> Self {
        Self {
            id,
            name: draft.name,
            surname: draft.surname,
            birth_date: draft.birth_date,
            death_date: draft.death_date,
            gender: draft.gender,
            avatar: draft.avatar,
            occupation: draft.occupation,
            traits: draft.traits,
            relationships: RelationshipBuckets::default(),
            position: draft.position,
        }
    }

    /// Merge a partial update onto this person's own fields
    ///
    /// Absent fields keep their current value. The relationship buckets are
    /// never touched through this path.
    pub fn apply(&mut self, update: PersonUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(surname) = update.surname {
            self.surname = Some(surname);
        }
        if let Some(birth_date) = update.birth_date {
            self.birth_date = Some(birth_date);
        }
        if let Some(death_date) = update.death_date {
            self.death_date = Some(death_date);
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(occupation) = update.occupation {
            self.occupation = Some(occupation);
        }
        if let Some(traits) = update.traits {
            self.traits = Some(traits);
        }
        if let Some(position) = update.position {
            self.position = Some(position);
        }
    }
}

/// Input for creating a person: every `Person` field except `id` and
/// `relationships`, both of which the store allocates
#[derive(Debug, Clone, Default)]
pub struct PersonDraft {
    /// Given name
    pub name: String,
    /// Family name
    pub surname: Option<String>,
    /// Birth date
    pub birth_date: Option<String>,
    /// Death date
    pub death_date: Option<String>,
    /// Gender
    pub gender: Gender,
    /// Avatar image reference
    pub avatar: Option<String>,
    /// Occupation
    pub occupation: Option<String>,
    /// Character traits
    pub traits: Option<Vec<String>>,
    /// Canvas position
    pub position: Option<Position>,
}

impl PersonDraft {
    /// Shorthand for the common name-plus-gender case
    pub fn named(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            gender,
            ..Self::default()
        }
    }
}

/// Partial field set for updating a person; `None` means "keep current"
#[derive(Debug, Clone, Default)]
pub struct PersonUpdate {
    /// Replacement given name
    pub name: Option<String>,
    /// Replacement family name
    pub surname: Option<String>,
    /// Replacement birth date
    pub birth_date: Option<String>,
    /// Replacement death date
    pub death_date: Option<String>,
    /// Replacement gender
    pub gender: Option<Gender>,
    /// Replacement avatar
    pub avatar: Option<String>,
    /// Replacement occupation
    pub occupation: Option<String>,
    /// Replacement traits list
    pub traits: Option<Vec<String>>,
    /// Replacement canvas position
    pub position: Option<Position>,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_id_display_and_parse() {
        let id = PersonId::new();
        let id_str = id.to_string();

        // Canonical UUID strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(id_str.len(), 36);

        let parsed = PersonId::from_string(&id_str).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_person_id_invalid_string() {
        assert!(PersonId::from_string("not-a-valid-uuid").is_err());
        assert!(PersonId::from_string("").is_err());
    }

    #[test]
    fn test_person_id_chronological() {
        let id1 = PersonId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = PersonId::new();

        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
    }

    #[test]
    fn test_new_person_has_empty_buckets() {
        let person = Person::new(
            PersonId::new(),
            PersonDraft::named("John", Gender::Male),
        );

        assert!(person.relationships.parents.is_empty());
        assert!(person.relationships.children.is_empty());
        assert!(person.relationships.siblings.is_empty());
        assert!(person.relationships.partners.is_empty());
    }

    #[test]
    fn test_apply_merges_present_fields_only() {
        let mut person = Person::new(
            PersonId::new(),
            PersonDraft {
                name: "John".to_string(),
                surname: Some("Sims".to_string()),
                occupation: Some("Programmer".to_string()),
                gender: Gender::Male,
                ..PersonDraft::default()
            },
        );

        person.apply(PersonUpdate {
            occupation: Some("Architect".to_string()),
            ..PersonUpdate::default()
        });

        assert_eq!(person.name, "John");
        assert_eq!(person.surname.as_deref(), Some("Sims"));
        assert_eq!(person.occupation.as_deref(), Some("Architect"));
    }

    #[test]
    fn test_apply_never_touches_buckets() {
        let other = PersonId::new();
        let mut person = Person::new(
            PersonId::new(),
            PersonDraft::named("Jane", Gender::Female),
        );
        person.relationships.partners.push(other);

        person.apply(PersonUpdate {
            name: Some("Janet".to_string()),
            ..PersonUpdate::default()
        });

        assert_eq!(person.relationships.partners, vec![other]);
    }

    #[test]
    fn test_person_json_shape() {
        let person = Person::new(
            PersonId::new(),
            PersonDraft {
                name: "John".to_string(),
                birth_date: Some("1980-01-15".to_string()),
                gender: Gender::Male,
                ..PersonDraft::default()
            },
        );

        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["gender"], "male");
        assert_eq!(json["birthDate"], "1980-01-15");
        // Absent optionals are omitted entirely
        assert!(json.get("deathDate").is_none());
        assert!(json["relationships"]["parents"].as_array().unwrap().is_empty());
    }
}
