//! Trait definitions for external interactions
//!
//! These traits define the boundary between the domain model and
//! infrastructure. Implementations live in other crates.

/// Synchronous key-value storage backend for tree persistence
///
/// Implemented by the infrastructure layer (simtree-store). All operations
/// are blocking from the caller's point of view; a single failed attempt is
/// reported, never retried.
pub trait TreeStorage {
    /// Error type for storage operations
    type Error: std::fmt::Display;

    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any existing value
    fn put(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove the value stored under `key`; absent keys are not an error
    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}
