//! # Store — the abstract storage collaborator
//!
//! [`Store`] is the async interface every resource service talks to. All
//! reads and writes go through this trait, so the same service logic works
//! against the in-memory store ([`crate::MemoryStore`]) used in tests and
//! against any future database-backed implementation.
//!
//! Implementations are responsible for the atomicity and isolation of each
//! single-row operation and for enforcing email uniqueness across
//! identities — on creation and on update alike. The services above perform
//! one resolve → decide → mutate sequence per request and rely entirely on
//! those guarantees.

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Identity, Note};

/// Async trait for persisting identities and notes.
#[allow(async_fn_in_trait)]
pub trait Store {
    /// Insert a new identity. Fails [`StoreError::Conflict`] if another
    /// identity already uses the same email.
    async fn create_identity(&self, identity: Identity) -> Result<Identity, StoreError>;

    /// Load an identity by id.
    async fn identity(&self, id: Uuid) -> Result<Identity, StoreError>;

    /// Look up an identity by its (already normalised) email.
    async fn identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    /// Replace an existing identity row. Fails [`StoreError::NotFound`] if
    /// the id is absent and [`StoreError::Conflict`] if the new email
    /// collides with another identity.
    async fn update_identity(&self, identity: Identity) -> Result<Identity, StoreError>;

    /// Delete an identity by id.
    async fn delete_identity(&self, id: Uuid) -> Result<(), StoreError>;

    /// All identities, in no particular order.
    async fn list_identities(&self) -> Result<Vec<Identity>, StoreError>;

    /// Insert a new note.
    async fn create_note(&self, note: Note) -> Result<Note, StoreError>;

    /// Load a note by id.
    async fn note(&self, id: Uuid) -> Result<Note, StoreError>;

    /// Replace an existing note row. Fails [`StoreError::NotFound`] if the
    /// id is absent.
    async fn update_note(&self, note: Note) -> Result<Note, StoreError>;

    /// Delete a note by id.
    async fn delete_note(&self, id: Uuid) -> Result<(), StoreError>;

    /// All notes, in no particular order.
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError>;

    /// Notes whose `tags` field contains `substring` (case-sensitive).
    async fn search_notes(&self, substring: &str) -> Result<Vec<Note>, StoreError>;

    /// Delete every note owned by `owner`, returning how many were removed.
    /// Used by the identity-deletion cascade.
    async fn delete_notes_owned_by(&self, owner: Uuid) -> Result<u64, StoreError>;
}
