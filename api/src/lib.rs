//! # API crate — authorization core and resource services
//!
//! This crate holds everything between the transport layer (out of scope,
//! an external collaborator) and the storage layer (the [`store`] crate):
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`policy`] | Pure authorization decision engine: actor × operation × target → allow/deny |
//! | [`notes`] | Note CRUD + tag search, resolve → decide → mutate per request |
//! | [`users`] | Account registration, administration, self-service, cascade deletion |
//! | [`auth`] | Argon2id password hashing, session gateway resolving callers to [`policy::Actor`] |
//! | [`config`] | Environment-driven service settings |
//! | [`error`] | The failure taxonomy every operation surfaces |
//!
//! A transport embedding this crate resolves the caller through an
//! [`auth::AuthenticationGateway`], hands the resulting [`policy::Actor`] to
//! a [`notes::NotesService`] or [`users::UsersService`], and maps the
//! structured [`Error`] kinds onto its own status representation.

pub mod auth;
pub mod config;
pub mod error;
pub mod notes;
pub mod policy;
pub mod users;

pub use config::ServiceConfig;
pub use error::Error;
pub use notes::{NewNote, NotePatch, NotesService};
pub use policy::{Actor, Decision, DenyReason, Operation};
pub use users::{IdentityFlags, IdentityPatch, UsersService};
