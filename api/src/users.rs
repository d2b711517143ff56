//! # Users service — accounts, registration, and administration
//!
//! Two creation paths exist. Open registration ([`UsersService::register`])
//! never consults the authorization policy: anyone, including anonymous
//! callers, may create a regular account. The administrative path
//! ([`UsersService::create_identity`]) may set arbitrary privilege flags and
//! requires the admin flag on the caller.
//!
//! Self-service follows the rule table: an actor may read, update, and
//! delete its own account — even while banned — but a non-admin self-edit
//! silently strips the `is_banned`/`is_admin` flags from the patch, so the
//! only way the four privilege states change hands is an admin update.
//!
//! Deleting an identity cascades to its notes, keeping the every-note-has-
//! an-owner invariant.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::hash_password;
use crate::config::ServiceConfig;
use crate::error::{authorize, Error};
use crate::policy::{Actor, Operation};
use store::{Identity, IdentityInfo, Store};

/// Privilege flags for the administrative creation path.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IdentityFlags {
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default)]
    pub is_admin: bool,
}

/// Partial update for an identity. Unknown fields are rejected at the
/// deserialization boundary; the flags are honoured only for admin actors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_banned: Option<bool>,
    pub is_admin: Option<bool>,
}

/// Account management, generic over the storage collaborator.
#[derive(Clone, Debug)]
pub struct UsersService<S> {
    store: S,
    config: ServiceConfig,
}

impl<S: Store> UsersService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: ServiceConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Self-service registration: open to anonymous callers, always creates
    /// a regular (non-banned, non-admin) account.
    pub async fn register(&self, email: &str, password: &str) -> Result<IdentityInfo, Error> {
        let email = normalize_email(email)?;
        self.validate_password(password)?;

        let hash = hash_password(password).map_err(|e| Error::Internal(e.to_string()))?;
        let identity = self.store.create_identity(Identity::new(email, hash)).await?;
        tracing::debug!(identity = %identity.id, "account registered");
        Ok(identity.to_info())
    }

    /// Administrative creation with arbitrary flags.
    pub async fn create_identity(
        &self,
        actor: &Actor,
        email: &str,
        password: &str,
        flags: IdentityFlags,
    ) -> Result<IdentityInfo, Error> {
        let email = normalize_email(email)?;
        self.validate_password(password)?;
        if self.store.identity_by_email(&email).await?.is_some() {
            return Err(Error::Conflict);
        }

        authorize(actor, Operation::CreateIdentity)?;

        let hash = hash_password(password).map_err(|e| Error::Internal(e.to_string()))?;
        let identity = self
            .store
            .create_identity(Identity::new(email, hash).with_flags(flags.is_banned, flags.is_admin))
            .await?;
        tracing::debug!(identity = %identity.id, is_banned = identity.is_banned, is_admin = identity.is_admin, "account created by admin");
        Ok(identity.to_info())
    }

    /// All accounts; admin only.
    pub async fn list_identities(&self, actor: &Actor) -> Result<Vec<IdentityInfo>, Error> {
        authorize(actor, Operation::ListIdentities)?;
        let identities = self.store.list_identities().await?;
        Ok(identities.iter().map(Identity::to_info).collect())
    }

    /// Load a single account, subject to the self-or-admin rule.
    pub async fn get_identity(&self, actor: &Actor, id: Uuid) -> Result<IdentityInfo, Error> {
        let identity = self.store.identity(id).await?;
        authorize(actor, Operation::ReadIdentity(&identity))?;
        Ok(identity.to_info())
    }

    /// Apply a partial update. Email changes re-validate format and
    /// uniqueness; password changes re-hash; privilege flags only move
    /// under an admin actor.
    pub async fn update_identity(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: IdentityPatch,
    ) -> Result<IdentityInfo, Error> {
        let mut identity = self.store.identity(id).await?;

        let new_email = match &patch.email {
            Some(raw) => Some(normalize_email(raw)?),
            None => None,
        };
        if let Some(password) = &patch.password {
            self.validate_password(password)?;
        }

        authorize(actor, Operation::UpdateIdentity(&identity))?;

        if let Some(email) = new_email {
            identity.email = email;
        }
        if let Some(password) = &patch.password {
            identity.password_hash =
                hash_password(password).map_err(|e| Error::Internal(e.to_string()))?;
        }
        // Privilege flags never move through a self-edit.
        let is_admin_actor = actor.identity().is_some_and(|a| a.is_admin);
        if is_admin_actor {
            if let Some(is_banned) = patch.is_banned {
                identity.is_banned = is_banned;
            }
            if let Some(is_admin) = patch.is_admin {
                identity.is_admin = is_admin;
            }
        }
        identity.touch();

        let updated = self.store.update_identity(identity).await?;
        Ok(updated.to_info())
    }

    /// Delete an account and cascade to its notes.
    ///
    /// The identity row is removed first and the cascade runs only after a
    /// successful removal, so an error on the identity delete (e.g. a
    /// concurrent removal winning the race) leaves the notes untouched.
    pub async fn delete_identity(&self, actor: &Actor, id: Uuid) -> Result<(), Error> {
        let identity = self.store.identity(id).await?;
        authorize(actor, Operation::DeleteIdentity(&identity))?;

        self.store.delete_identity(id).await?;
        let cascaded = self.store.delete_notes_owned_by(id).await?;
        tracing::debug!(identity = %id, cascaded_notes = cascaded, "account deleted");
        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<(), Error> {
        if password.len() < self.config.min_password_len {
            return Err(Error::validation("password"));
        }
        Ok(())
    }
}

/// Trim, lowercase, and syntactically validate an email address.
pub(crate) fn normalize_email(raw: &str) -> Result<String, Error> {
    let email = raw.trim().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(Error::validation("email"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(Error::validation("email"));
    }
    Ok(email)
}
