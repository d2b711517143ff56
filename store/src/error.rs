//! Storage-level error taxonomy.

use thiserror::Error;

/// Failures surfaced by a [`crate::Store`] implementation.
///
/// Only two kinds exist at this layer: the requested row is absent, or a
/// uniqueness constraint (identity email) was violated. Everything else —
/// authorization, validation — belongs to the layers above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested entity does not exist.
    #[error("entity not found")]
    NotFound,
    /// A unique constraint was violated (duplicate identity email).
    #[error("unique constraint violation")]
    Conflict,
}
