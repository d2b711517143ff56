//! # Error taxonomy surfaced by the resource services
//!
//! Every service operation fails with exactly one of these kinds, carrying
//! enough structure (kind + optional field or denial reason) for a transport
//! layer to map to its own representation. No operation retries internally;
//! failures surface synchronously.
//!
//! The authorization policy itself never produces an error — it returns a
//! [`Decision`] value. [`Decision::into_result`] is the single place where a
//! `Deny` becomes an [`Error`], at the service boundary.

use thiserror::Error;

use crate::policy::{Decision, DenyReason};
use store::StoreError;

/// Failure kinds surfaced by every service operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No resolved actor: the caller is anonymous or their credentials are
    /// invalid.
    #[error("authentication required")]
    Unauthenticated,
    /// The authorization policy denied the operation.
    #[error("forbidden: {0}")]
    Forbidden(DenyReason),
    /// The target entity does not exist.
    #[error("not found")]
    NotFound,
    /// A uniqueness constraint was violated (duplicate identity email).
    #[error("conflict: email already in use")]
    Conflict,
    /// A required field is missing, malformed, or not part of the schema.
    #[error("invalid field: {field}")]
    Validation { field: &'static str },
    /// A collaborator failed in a way the domain taxonomy cannot express
    /// (e.g. a malformed stored password hash).
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] on `field`.
    pub fn validation(field: &'static str) -> Self {
        Self::Validation { field }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Error::NotFound,
            StoreError::Conflict => Error::Conflict,
        }
    }
}

/// Evaluate the policy for `operation` and convert a denial into an error,
/// logging it at the boundary. The policy itself stays silent and pure.
pub(crate) fn authorize(
    actor: &crate::policy::Actor,
    operation: crate::policy::Operation<'_>,
) -> Result<(), Error> {
    let decision = crate::policy::decide(actor, operation);
    if let Decision::Deny(reason) = decision {
        tracing::warn!(%reason, "operation denied");
    }
    decision.into_result()
}

impl Decision {
    /// Convert a policy decision into a service result.
    ///
    /// `Deny(Unauthenticated)` maps to [`Error::Unauthenticated`]; every
    /// other denial becomes [`Error::Forbidden`] carrying its reason.
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(DenyReason::Unauthenticated) => Err(Error::Unauthenticated),
            Decision::Deny(reason) => Err(Error::Forbidden(reason)),
        }
    }
}
