//! SimTree Storage Layer
//!
//! Implements [`FamilyGraphStore`], the canonical owner of one
//! [`FamilyTree`]: all graph mutations, the referential-integrity
//! bookkeeping between relationship records and per-person adjacency
//! buckets, and best-effort persistence through a [`TreeStorage`] backend.
//!
//! # Architecture
//!
//! - The whole tree lives in memory; every mutation runs to completion
//!   synchronously and then persists the full tree under one key
//! - Persistence is best-effort: a failed save is logged and swallowed,
//!   the in-memory state stays authoritative
//! - UI code observes mutations through [`StoreEvent`] subscriptions
//!   instead of watching shared mutable state
//!
//! # Examples
//!
//! ```
//! use simtree_store::{FamilyGraphStore, MemoryStorage};
//! use simtree_domain::{Gender, PersonDraft, RelationshipKind};
//!
//! let mut store = FamilyGraphStore::new(MemoryStorage::new());
//! let john = store.add_person(PersonDraft::named("John", Gender::Male));
//! let jane = store.add_person(PersonDraft::named("Jane", Gender::Female));
//! store.add_relationship(john, jane, RelationshipKind::Spouse);
//!
//! let resolved = store.relationships_of(john);
//! assert_eq!(resolved.partners[0].id, jane);
//! ```

#![warn(missing_docs)]

mod events;
mod storage;

pub use events::StoreEvent;
pub use storage::{FileStorage, MemoryStorage, StorageError};

use simtree_domain::traits::TreeStorage;
use simtree_domain::{
    FamilyTree, Gender, Person, PersonDraft, PersonId, PersonUpdate, Relationship,
    RelationshipKind,
};

/// The single key the serialized tree is persisted under
pub const STORAGE_KEY: &str = "simtree-family-tree";

/// Direct neighbors of one person, resolved to full person records
///
/// Bucket ids that no longer resolve to an existing person are dropped;
/// callers never see broken references.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRelationships {
    /// Resolved parents
    pub parents: Vec<Person>,
    /// Resolved children
    pub children: Vec<Person>,
    /// Resolved siblings
    pub siblings: Vec<Person>,
    /// Resolved partners/spouses
    pub partners: Vec<Person>,
}

/// Transient UI-selection state; pure flags with no invariants
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// The person currently selected in the UI, if any
    pub selected_person: Option<PersonId>,
    /// Whether the add-person form is open
    pub is_adding_person: bool,
    /// Whether the edit-person form is open
    pub is_editing_person: bool,
}

type Subscriber = Box<dyn Fn(&StoreEvent)>;

/// The family-graph store: one tree, its mutation API, and persistence
///
/// The store is an explicit value the caller owns and passes around; there
/// is no global instance. All operations are synchronous; see the crate
/// docs for the persistence contract.
pub struct FamilyGraphStore<S: TreeStorage> {
    tree: FamilyTree,
    storage: S,
    selection: Selection,
    subscribers: Vec<Subscriber>,
}

impl<S: TreeStorage> FamilyGraphStore<S> {
    /// Create a store over an empty default tree
    pub fn new(storage: S) -> Self {
        Self::with_tree(FamilyTree::default(), storage)
    }

    /// Create a store over an existing tree
    pub fn with_tree(tree: FamilyTree, storage: S) -> Self {
        Self {
            tree,
            storage,
            selection: Selection::default(),
            subscribers: Vec::new(),
        }
    }

    /// Borrow the current tree
    pub fn tree(&self) -> &FamilyTree {
        &self.tree
    }

    /// Borrow the UI-selection state
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Register a change observer
    ///
    /// Observers fire after a mutation has been applied and its persist
    /// attempt has completed (successfully or not).
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&StoreEvent) + 'static,
    {
        self.subscribers.push(Box::new(observer));
    }

    // --- Lookups ---------------------------------------------------------

    /// Look up a person by id; `None` if absent, never an error
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.tree.person(id)
    }

    /// Resolve a person's direct neighbors across all four buckets
    ///
    /// Returns four empty lists when the person does not exist.
    pub fn relationships_of(&self, id: PersonId) -> ResolvedRelationships {
        let Some(person) = self.tree.person(id) else {
            return ResolvedRelationships::default();
        };

        let resolve = |ids: &[PersonId]| -> Vec<Person> {
            ids.iter()
                .filter_map(|id| self.tree.person(*id))
                .cloned()
                .collect()
        };

        ResolvedRelationships {
            parents: resolve(&person.relationships.parents),
            children: resolve(&person.relationships.children),
            siblings: resolve(&person.relationships.siblings),
            partners: resolve(&person.relationships.partners),
        }
    }

    /// All persons whose `parents` bucket is empty, in insertion order
    pub fn root_persons(&self) -> Vec<&Person> {
        self.tree
            .persons
            .iter()
            .filter(|person| person.relationships.parents.is_empty())
            .collect()
    }

    // --- Mutations -------------------------------------------------------

    /// Add a new person and return its freshly allocated id
    ///
    /// The stored record is the canonical one; relationship calls using the
    /// returned id succeed immediately.
    pub fn add_person(&mut self, draft: PersonDraft) -> PersonId {
        let id = PersonId::new();
        self.tree.persons.push(Person::new(id, draft));
        self.commit(StoreEvent::PersonAdded(id));
        id
    }

    /// Merge a partial field set onto an existing person
    ///
    /// Silent no-op if the id is absent. The person's relationship buckets
    /// are never touched through this path.
    pub fn update_person(&mut self, id: PersonId, update: PersonUpdate) {
        let Some(person) = self.tree.person_mut(id) else {
            return;
        };
        person.apply(update);
        self.commit(StoreEvent::PersonUpdated(id));
    }

    /// Delete a person, cascading to all relationships and adjacency
    ///
    /// Removes every relationship record referencing the person, scrubs the
    /// id from every remaining person's buckets, and drops the person
    /// itself. One logical operation; persisted once at the end. Silent
    /// no-op if the id is absent.
    pub fn delete_person(&mut self, id: PersonId) {
        if !self.tree.contains(id) {
            return;
        }

        self.tree.relationships.retain(|rel| !rel.involves(id));
        for person in &mut self.tree.persons {
            person.relationships.remove_everywhere(id);
        }
        self.tree.persons.retain(|person| person.id != id);

        self.commit(StoreEvent::PersonDeleted(id));
    }

    /// Record a relationship between two existing persons
    ///
    /// Silent no-op if either endpoint is missing. Appends a new active
    /// relationship record unconditionally, then updates both endpoints'
    /// adjacency buckets idempotently (a bucket never gains a duplicate,
    /// even though repeated calls stack up records).
    pub fn add_relationship(&mut self, person1: PersonId, person2: PersonId, kind: RelationshipKind) {
        if !self.tree.contains(person1) || !self.tree.contains(person2) {
            tracing::debug!(%person1, %person2, %kind, "relationship endpoint missing, ignoring");
            return;
        }

        self.tree
            .relationships
            .push(Relationship::new(kind, person1, person2));

        let (bucket1, bucket2) = kind.bucket_pair();
        if let Some(p1) = self.tree.person_mut(person1) {
            p1.relationships.insert(bucket1, person2);
        }
        if let Some(p2) = self.tree.person_mut(person2) {
            p2.relationships.insert(bucket2, person1);
        }

        self.commit(StoreEvent::RelationshipAdded {
            person1,
            person2,
            kind,
        });
    }

    /// Remove a relationship between two persons
    ///
    /// Drops every record matching `(person1, person2, kind)` in either
    /// endpoint order, then reverses the adjacency updates, but only when
    /// both endpoints still exist. When one endpoint is gone the survivor's
    /// bucket is left as-is; that stale entry is source behavior, kept
    /// deliberately (the cascade in [`delete_person`] is the path that
    /// cleans adjacency).
    ///
    /// [`delete_person`]: FamilyGraphStore::delete_person
    pub fn remove_relationship(
        &mut self,
        person1: PersonId,
        person2: PersonId,
        kind: RelationshipKind,
    ) {
        self.tree
            .relationships
            .retain(|rel| !rel.links(person1, person2, kind));

        if self.tree.contains(person1) && self.tree.contains(person2) {
            let (bucket1, bucket2) = kind.bucket_pair();
            if let Some(p1) = self.tree.person_mut(person1) {
                p1.relationships.remove(bucket1, person2);
            }
            if let Some(p2) = self.tree.person_mut(person2) {
                p2.relationships.remove(bucket2, person1);
            }
        }

        self.commit(StoreEvent::RelationshipRemoved {
            person1,
            person2,
            kind,
        });
    }

    // --- UI selection ----------------------------------------------------

    /// Set or clear the selected person
    pub fn set_selected_person(&mut self, id: Option<PersonId>) {
        self.selection.selected_person = id;
    }

    /// Toggle the add-person form flag
    pub fn set_is_adding_person(&mut self, value: bool) {
        self.selection.is_adding_person = value;
    }

    /// Toggle the edit-person form flag
    pub fn set_is_editing_person(&mut self, value: bool) {
        self.selection.is_editing_person = value;
    }

    // --- Persistence -----------------------------------------------------

    /// Persist the current tree under [`STORAGE_KEY`]
    ///
    /// Best-effort: failures are logged, never raised. Mutations call this
    /// automatically as their final step.
    pub fn save(&mut self) {
        match serde_json::to_string(&self.tree) {
            Ok(payload) => {
                if let Err(e) = self.storage.put(STORAGE_KEY, &payload) {
                    tracing::error!("Failed to save family tree: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize family tree: {}", e);
            }
        }
    }

    /// Replace the in-memory tree with the persisted one
    ///
    /// Returns false, leaving the current tree untouched, when nothing is
    /// stored, the backend fails, or the payload does not parse. On success
    /// the loaded `created_at` is preserved and `updated_at` is refreshed.
    pub fn load(&mut self) -> bool {
        let payload = match self.storage.get(STORAGE_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => return false,
            Err(e) => {
                tracing::error!("Failed to load family tree: {}", e);
                return false;
            }
        };

        match serde_json::from_str::<FamilyTree>(&payload) {
            Ok(mut tree) => {
                tree.touch();
                self.tree = tree;
                self.emit(&StoreEvent::TreeLoaded);
                true
            }
            Err(e) => {
                tracing::warn!("Stored family tree is unparseable: {}", e);
                false
            }
        }
    }

    /// Remove the persisted tree; the in-memory tree is unaffected
    pub fn clear(&mut self) {
        if let Err(e) = self.storage.remove(STORAGE_KEY) {
            tracing::error!("Failed to clear persisted family tree: {}", e);
        }
    }

    // --- Sample data -----------------------------------------------------

    /// Populate the demonstration family of four
    ///
    /// John and Jane are spouses; Mike and Sarah are their children and
    /// each other's siblings.
    pub fn seed_sample_family(&mut self) {
        let john = self.add_person(PersonDraft {
            name: "John".to_string(),
            surname: Some("Sims".to_string()),
            gender: Gender::Male,
            birth_date: Some("1980-01-15".to_string()),
            occupation: Some("Programmer".to_string()),
            ..PersonDraft::default()
        });

        let jane = self.add_person(PersonDraft {
            name: "Jane".to_string(),
            surname: Some("Sims".to_string()),
            gender: Gender::Female,
            birth_date: Some("1982-05-20".to_string()),
            occupation: Some("Designer".to_string()),
            ..PersonDraft::default()
        });

        let mike = self.add_person(PersonDraft {
            name: "Mike".to_string(),
            surname: Some("Sims".to_string()),
            gender: Gender::Male,
            birth_date: Some("2005-08-10".to_string()),
            occupation: Some("Student".to_string()),
            ..PersonDraft::default()
        });

        let sarah = self.add_person(PersonDraft {
            name: "Sarah".to_string(),
            surname: Some("Sims".to_string()),
            gender: Gender::Female,
            birth_date: Some("2008-12-03".to_string()),
            occupation: Some("Schoolgirl".to_string()),
            ..PersonDraft::default()
        });

        self.add_relationship(john, jane, RelationshipKind::Spouse);
        self.add_relationship(john, mike, RelationshipKind::Parent);
        self.add_relationship(jane, mike, RelationshipKind::Parent);
        self.add_relationship(john, sarah, RelationshipKind::Parent);
        self.add_relationship(jane, sarah, RelationshipKind::Parent);
        self.add_relationship(mike, sarah, RelationshipKind::Sibling);

        tracing::info!("Seeded sample family of four");
    }

    // --- Internals -------------------------------------------------------

    /// Stamp `updated_at`, persist, then notify observers
    fn commit(&mut self, event: StoreEvent) {
        self.tree.touch();
        self.save();
        self.emit(&event);
    }

    fn emit(&self, event: &StoreEvent) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }
}
