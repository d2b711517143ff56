//! # Authorization policy — the ordered rule table
//!
//! [`decide`] is a pure function from (actor, operation) to a [`Decision`].
//! It performs no I/O, never fails, and is safe for unlimited concurrent
//! use; the services resolve targets and convert denials into errors.
//!
//! The rules are evaluated in a fixed precedence, first match wins:
//!
//! 1. Anonymous callers are denied everything.
//! 2. A banned actor is denied everything **except** reading, updating, or
//!    deleting its own identity. The ban gate runs before any role check,
//!    so being an admin does not lift it.
//! 3. Admins may perform any note operation on any note.
//! 4. Listing, searching, and creating self-owned notes is open to every
//!    authenticated, non-banned actor.
//! 5. Read/update/delete of a note requires ownership; otherwise `NotOwner`.
//! 6. Admins may perform any identity operation on any identity.
//! 7. Read/update/delete of an identity requires the target to be the actor
//!    itself; otherwise `NotSelf`.
//! 8. Listing identities and the admin creation path require the admin
//!    flag; otherwise `AdminRequired`.

use std::fmt;

use store::{Identity, Note};

/// The resolved caller of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Actor {
    /// No session, or one that no longer resolves to an identity.
    Anonymous,
    /// An authenticated account, loaded fresh from the store.
    Authenticated(Identity),
}

impl Actor {
    /// The underlying identity, if authenticated.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Actor::Anonymous => None,
            Actor::Authenticated(identity) => Some(identity),
        }
    }
}

/// An intended operation on a resolved target.
///
/// Read/update/delete variants carry the target so ownership and self
/// checks need nothing beyond the operation itself.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    CreateNote,
    ReadNote(&'a Note),
    UpdateNote(&'a Note),
    DeleteNote(&'a Note),
    ListNotes,
    SearchNotes,
    /// Administrative account creation (with arbitrary flags). Open
    /// registration is a separate path that never consults the policy.
    CreateIdentity,
    ReadIdentity(&'a Identity),
    UpdateIdentity(&'a Identity),
    DeleteIdentity(&'a Identity),
    ListIdentities,
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

/// Why an operation was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    Banned,
    NotOwner,
    NotSelf,
    AdminRequired,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DenyReason::Unauthenticated => "authentication required",
            DenyReason::Banned => "account is banned",
            DenyReason::NotOwner => "not the owner of this note",
            DenyReason::NotSelf => "not your own account",
            DenyReason::AdminRequired => "administrator privileges required",
        };
        f.write_str(reason)
    }
}

/// Evaluate the rule table for `actor` performing `operation`.
pub fn decide(actor: &Actor, operation: Operation<'_>) -> Decision {
    let actor = match actor {
        Actor::Anonymous => return Decision::Deny(DenyReason::Unauthenticated),
        Actor::Authenticated(identity) => identity,
    };

    if actor.is_banned && !is_own_profile(actor, operation) {
        return Decision::Deny(DenyReason::Banned);
    }

    match operation {
        Operation::CreateNote | Operation::ListNotes | Operation::SearchNotes => Decision::Allow,
        Operation::ReadNote(note) | Operation::UpdateNote(note) | Operation::DeleteNote(note) => {
            if actor.is_admin || note.owner == actor.id {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotOwner)
            }
        }
        Operation::ReadIdentity(target)
        | Operation::UpdateIdentity(target)
        | Operation::DeleteIdentity(target) => {
            if actor.is_admin || target.id == actor.id {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotSelf)
            }
        }
        Operation::CreateIdentity | Operation::ListIdentities => {
            if actor.is_admin {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::AdminRequired)
            }
        }
    }
}

/// The self-profile carve-out of the ban gate: read, update, and delete of
/// the actor's own identity stay allowed while banned.
fn is_own_profile(actor: &Identity, operation: Operation<'_>) -> bool {
    match operation {
        Operation::ReadIdentity(target)
        | Operation::UpdateIdentity(target)
        | Operation::DeleteIdentity(target) => target.id == actor.id,
        _ => false,
    }
}
