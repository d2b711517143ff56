//! # Domain entities — accounts and notes
//!
//! Defines the two persisted entities of the service and their client-safe
//! projections.
//!
//! ## [`Identity`]
//!
//! A user account. Contains every persisted column:
//!
//! - `id` — primary key (`UUID v4`), assigned at construction and immutable.
//! - `email` — unique across all identities; uniqueness is enforced by the
//!   [`crate::Store`] implementation on create *and* update.
//! - `password_hash` — Argon2 PHC-format string, opaque to everything except
//!   the authentication layer.
//! - `is_banned` / `is_admin` — independent privilege flags, both false for
//!   self-registered accounts. A banned admin is representable; authorization
//!   gives the ban precedence.
//! - `created_at` / `updated_at` — audit timestamps.
//!
//! [`Identity::to_info`] projects this into an [`IdentityInfo`], which omits
//! the password hash and is safe to hand to callers.
//!
//! ## [`Note`]
//!
//! A note owned by exactly one identity. The `owner` reference is set at
//! creation and never reassigned; `tags` is a free-form label field searched
//! by substring containment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full account record as persisted by a [`crate::Store`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_banned: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Create a regular (non-banned, non-admin) identity with a fresh id.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            is_banned: false,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder method to set the privilege flags (admin creation path).
    pub fn with_flags(mut self, is_banned: bool, is_admin: bool) -> Self {
        self.is_banned = is_banned;
        self.is_admin = is_admin;
        self
    }

    /// Refresh `updated_at` after a mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Convert to an [`IdentityInfo`] for caller consumption.
    pub fn to_info(&self) -> IdentityInfo {
        IdentityInfo {
            id: self.id,
            email: self.email.clone(),
            is_banned: self.is_banned,
            is_admin: self.is_admin,
            created_at: self.created_at,
        }
    }
}

/// Account information safe to return to callers (no password hash).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityInfo {
    pub id: Uuid,
    pub email: String,
    pub is_banned: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// A note owned by exactly one [`Identity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    /// Free-form label field, searched by case-sensitive substring.
    pub tags: String,
    /// Owning identity. Set at creation, never reassigned.
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a note with a fresh id, owned by `owner`.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        tags: impl Into<String>,
        owner: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            tags: tags.into(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at` after a mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
