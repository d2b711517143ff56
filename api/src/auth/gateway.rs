//! # Session gateway — credential verification and caller resolution
//!
//! The resource services never see credentials or tokens; they receive a
//! resolved [`Actor`]. [`AuthenticationGateway`] is that narrow interface,
//! and [`SessionGateway`] is the store-backed implementation: an opaque
//! session token maps to an identity id, and the identity is reloaded from
//! the store on every resolution so flag changes (ban, admin) take effect
//! immediately and a deleted account degrades to [`Actor::Anonymous`].
//!
//! Banned identities may still log in: the authorization policy's ban gate
//! does the restricting, which keeps the self-profile carve-out reachable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::verify_password;
use crate::error::Error;
use crate::policy::Actor;
use store::Store;

/// Login credentials presented by a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Opaque handle for an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(Uuid);

impl SessionToken {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Narrow interface the services consume: resolve a caller, end a session.
#[allow(async_fn_in_trait)]
pub trait AuthenticationGateway {
    /// Resolve the caller behind `token`. `None` or an unknown token
    /// resolves to [`Actor::Anonymous`].
    async fn resolve_caller(&self, token: Option<&SessionToken>) -> Result<Actor, Error>;

    /// End the session behind `token`. Fails [`Error::Unauthenticated`] if
    /// there is no such session.
    async fn invalidate(&self, token: &SessionToken) -> Result<(), Error>;
}

/// Store-backed gateway with an in-memory session map.
#[derive(Clone, Debug)]
pub struct SessionGateway<S> {
    store: S,
    sessions: Arc<Mutex<HashMap<SessionToken, Uuid>>>,
}

impl<S: Store> SessionGateway<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Verify credentials and open a session.
    ///
    /// Unknown email, wrong password, and a malformed stored hash all
    /// surface as [`Error::Unauthenticated`] so a caller cannot probe which
    /// accounts exist.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken, Error> {
        let email = credentials.email.trim().to_lowercase();
        let identity = self
            .store
            .identity_by_email(&email)
            .await?
            .ok_or(Error::Unauthenticated)?;

        let valid = verify_password(&credentials.password, &identity.password_hash)
            .unwrap_or(false);
        if !valid {
            tracing::warn!(email = %email, "login rejected");
            return Err(Error::Unauthenticated);
        }

        let token = SessionToken::generate();
        self.sessions.lock().unwrap().insert(token, identity.id);
        tracing::debug!(identity = %identity.id, "session opened");
        Ok(token)
    }
}

impl<S: Store> AuthenticationGateway for SessionGateway<S> {
    async fn resolve_caller(&self, token: Option<&SessionToken>) -> Result<Actor, Error> {
        let Some(token) = token else {
            return Ok(Actor::Anonymous);
        };
        let identity_id = { self.sessions.lock().unwrap().get(token).copied() };
        let Some(identity_id) = identity_id else {
            return Ok(Actor::Anonymous);
        };
        // Reload on every call: stale sessions for deleted accounts resolve
        // to Anonymous rather than erroring.
        match self.store.identity(identity_id).await {
            Ok(identity) => Ok(Actor::Authenticated(identity)),
            Err(store::StoreError::NotFound) => {
                self.sessions.lock().unwrap().remove(token);
                Ok(Actor::Anonymous)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn invalidate(&self, token: &SessionToken) -> Result<(), Error> {
        self.sessions
            .lock()
            .unwrap()
            .remove(token)
            .map(|_| ())
            .ok_or(Error::Unauthenticated)
    }
}
