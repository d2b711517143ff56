use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Identity, Note};
use crate::store::Store;

/// In-memory [`Store`] for testing and embedded use.
///
/// Each operation takes the relevant mutex for its whole duration, which
/// gives the single-row atomicity and the email-uniqueness guarantee the
/// [`Store`] contract requires.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    identities: Arc<Mutex<HashMap<Uuid, Identity>>>,
    notes: Arc<Mutex<HashMap<Uuid, Note>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    async fn create_identity(&self, identity: Identity) -> Result<Identity, StoreError> {
        let mut identities = self.identities.lock().unwrap();
        if identities.values().any(|i| i.email == identity.email) {
            return Err(StoreError::Conflict);
        }
        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn identity(&self, id: Uuid) -> Result<Identity, StoreError> {
        self.identities
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self
            .identities
            .lock()
            .unwrap()
            .values()
            .find(|i| i.email == email)
            .cloned())
    }

    async fn update_identity(&self, identity: Identity) -> Result<Identity, StoreError> {
        let mut identities = self.identities.lock().unwrap();
        if !identities.contains_key(&identity.id) {
            return Err(StoreError::NotFound);
        }
        if identities
            .values()
            .any(|i| i.id != identity.id && i.email == identity.email)
        {
            return Err(StoreError::Conflict);
        }
        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn delete_identity(&self, id: Uuid) -> Result<(), StoreError> {
        self.identities
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn list_identities(&self) -> Result<Vec<Identity>, StoreError> {
        Ok(self.identities.lock().unwrap().values().cloned().collect())
    }

    async fn create_note(&self, note: Note) -> Result<Note, StoreError> {
        self.notes.lock().unwrap().insert(note.id, note.clone());
        Ok(note)
    }

    async fn note(&self, id: Uuid) -> Result<Note, StoreError> {
        self.notes
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_note(&self, note: Note) -> Result<Note, StoreError> {
        let mut notes = self.notes.lock().unwrap();
        if !notes.contains_key(&note.id) {
            return Err(StoreError::NotFound);
        }
        notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn delete_note(&self, id: Uuid) -> Result<(), StoreError> {
        self.notes
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.lock().unwrap().values().cloned().collect())
    }

    async fn search_notes(&self, substring: &str) -> Result<Vec<Note>, StoreError> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .values()
            .filter(|n| n.tags.contains(substring))
            .cloned()
            .collect())
    }

    async fn delete_notes_owned_by(&self, owner: Uuid) -> Result<u64, StoreError> {
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|_, n| n.owner != owner);
        Ok((before - notes.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identity_crud() {
        let store = MemoryStore::new();

        let alice = store
            .create_identity(Identity::new("alice@example.com", "hash-a"))
            .await
            .unwrap();

        let loaded = store.identity(alice.id).await.unwrap();
        assert_eq!(loaded.email, "alice@example.com");
        assert!(!loaded.is_banned);
        assert!(!loaded.is_admin);

        let by_email = store
            .identity_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, alice.id);
        assert!(store
            .identity_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());

        let mut edited = loaded.clone();
        edited.email = "alice@new.example.com".to_string();
        store.update_identity(edited).await.unwrap();
        assert_eq!(
            store.identity(alice.id).await.unwrap().email,
            "alice@new.example.com"
        );

        store.delete_identity(alice.id).await.unwrap();
        assert_eq!(store.identity(alice.id).await, Err(StoreError::NotFound));
        assert_eq!(
            store.delete_identity(alice.id).await,
            Err(StoreError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();

        store
            .create_identity(Identity::new("a@b.com", "hash"))
            .await
            .unwrap();
        let second = store.create_identity(Identity::new("a@b.com", "hash")).await;
        assert_eq!(second, Err(StoreError::Conflict));

        // Update path: renaming onto an occupied email also conflicts.
        let bob = store
            .create_identity(Identity::new("bob@b.com", "hash"))
            .await
            .unwrap();
        let mut renamed = bob.clone();
        renamed.email = "a@b.com".to_string();
        assert_eq!(store.update_identity(renamed).await, Err(StoreError::Conflict));

        // Keeping your own email is not a conflict.
        let unchanged = store.update_identity(bob).await;
        assert!(unchanged.is_ok());
    }

    #[tokio::test]
    async fn test_note_crud_and_search() {
        let store = MemoryStore::new();
        let owner = store
            .create_identity(Identity::new("owner@example.com", "hash"))
            .await
            .unwrap();

        let note = store
            .create_note(Note::new("first", "body", "created", owner.id))
            .await
            .unwrap();
        store
            .create_note(Note::new("second", "body", "done", owner.id))
            .await
            .unwrap();

        assert_eq!(store.list_notes().await.unwrap().len(), 2);
        assert_eq!(store.note(note.id).await.unwrap().title, "first");

        // Case-sensitive substring containment on the tags field.
        assert_eq!(store.search_notes("creat").await.unwrap().len(), 1);
        assert_eq!(store.search_notes("CREAT").await.unwrap().len(), 0);
        assert_eq!(store.search_notes("e").await.unwrap().len(), 2);

        let mut edited = note.clone();
        edited.title = "renamed".to_string();
        store.update_note(edited).await.unwrap();
        assert_eq!(store.note(note.id).await.unwrap().title, "renamed");

        store.delete_note(note.id).await.unwrap();
        assert_eq!(store.note(note.id).await, Err(StoreError::NotFound));
        assert_eq!(store.delete_note(note.id).await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_cascade_helper_removes_only_owned_notes() {
        let store = MemoryStore::new();
        let alice = store
            .create_identity(Identity::new("alice@example.com", "hash"))
            .await
            .unwrap();
        let bob = store
            .create_identity(Identity::new("bob@example.com", "hash"))
            .await
            .unwrap();

        store
            .create_note(Note::new("a1", "body", "", alice.id))
            .await
            .unwrap();
        store
            .create_note(Note::new("a2", "body", "", alice.id))
            .await
            .unwrap();
        store
            .create_note(Note::new("b1", "body", "", bob.id))
            .await
            .unwrap();

        let removed = store.delete_notes_owned_by(alice.id).await.unwrap();
        assert_eq!(removed, 2);

        let remaining = store.list_notes().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].owner, bob.id);
    }
}
