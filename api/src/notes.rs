//! # Notes service — resolve, decide, mutate
//!
//! Every operation follows the same contract: resolve the target note (an
//! absent id surfaces [`Error::NotFound`] *before* any authorization check,
//! so deleting an already-deleted note reports NotFound even to an
//! otherwise-forbidden caller), consult the authorization policy, then
//! perform the storage mutation.
//!
//! Creation accepts an optional `owner_email` override so an administrator
//! can create a note on behalf of another account; everyone else creates
//! notes they own themselves. Updates are partial: a [`NotePatch`] may name
//! any subset of the mutable fields, and naming the immutable `owner` — or
//! blanking a required field — fails validation before ownership is even
//! considered.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{authorize, Error};
use crate::policy::{Actor, Operation};
use crate::users::normalize_email;
use store::{Note, Store};

/// Fields for a new note. `owner_email`, when present, is the admin-only
/// creation-on-behalf path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub owner_email: Option<String>,
}

/// Partial update for a note. Unknown fields are rejected at the
/// deserialization boundary; the `owner` field exists only so that a patch
/// naming it can be rejected explicitly — ownership is immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<String>,
    pub owner: Option<Uuid>,
}

/// CRUD and search over notes, generic over the storage collaborator.
#[derive(Clone, Debug)]
pub struct NotesService<S> {
    store: S,
}

impl<S: Store> NotesService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All notes, visible to any authenticated, non-banned actor.
    pub async fn list_notes(&self, actor: &Actor) -> Result<Vec<Note>, Error> {
        authorize(actor, Operation::ListNotes)?;
        Ok(self.store.list_notes().await?)
    }

    /// Notes whose tags contain `substring` (case-sensitive), across all
    /// owners — search mirrors the public list semantics.
    pub async fn search_notes(&self, actor: &Actor, substring: &str) -> Result<Vec<Note>, Error> {
        authorize(actor, Operation::SearchNotes)?;
        Ok(self.store.search_notes(substring).await?)
    }

    /// Create a note. Title and body are required; the `owner_email`
    /// override requires the admin flag and an existing account.
    pub async fn create_note(&self, actor: &Actor, new_note: NewNote) -> Result<Note, Error> {
        authorize(actor, Operation::CreateNote)?;
        // authorize guarantees an authenticated actor past this point.
        let caller = actor.identity().ok_or(Error::Unauthenticated)?;

        if new_note.owner_email.is_some() && !caller.is_admin {
            tracing::warn!(actor = %caller.id, "owner override attempted without admin flag");
            return Err(Error::Forbidden(crate::policy::DenyReason::AdminRequired));
        }
        if new_note.title.trim().is_empty() {
            return Err(Error::validation("title"));
        }
        if new_note.body.trim().is_empty() {
            return Err(Error::validation("body"));
        }

        let owner = match &new_note.owner_email {
            Some(email) => {
                let email = normalize_email(email)?;
                self.store
                    .identity_by_email(&email)
                    .await?
                    .ok_or(Error::NotFound)?
                    .id
            }
            None => caller.id,
        };

        let note = Note::new(new_note.title, new_note.body, new_note.tags, owner);
        Ok(self.store.create_note(note).await?)
    }

    /// Load a single note, subject to the ownership rules.
    pub async fn get_note(&self, actor: &Actor, id: Uuid) -> Result<Note, Error> {
        let note = self.store.note(id).await?;
        authorize(actor, Operation::ReadNote(&note))?;
        Ok(note)
    }

    /// Apply a partial update. Patch validation runs before authorization,
    /// so a malformed patch fails the same way for everyone.
    pub async fn update_note(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: NotePatch,
    ) -> Result<Note, Error> {
        let mut note = self.store.note(id).await?;

        if patch.owner.is_some() {
            return Err(Error::validation("owner"));
        }
        if matches!(&patch.title, Some(t) if t.trim().is_empty()) {
            return Err(Error::validation("title"));
        }
        if matches!(&patch.body, Some(b) if b.trim().is_empty()) {
            return Err(Error::validation("body"));
        }

        authorize(actor, Operation::UpdateNote(&note))?;

        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(body) = patch.body {
            note.body = body;
        }
        if let Some(tags) = patch.tags {
            note.tags = tags;
        }
        note.touch();
        Ok(self.store.update_note(note).await?)
    }

    /// Delete a note. A nonexistent id yields NotFound for every caller,
    /// privileged or not.
    pub async fn delete_note(&self, actor: &Actor, id: Uuid) -> Result<(), Error> {
        let note = self.store.note(id).await?;
        authorize(actor, Operation::DeleteNote(&note))?;
        self.store.delete_note(id).await?;
        Ok(())
    }
}
