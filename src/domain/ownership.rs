//! Resource ownership rule
//!
//! A property-expense resource may only be mutated or deleted by the user
//! whose id it carries. Both sides are compared as parsed [`Uuid`]s, so any
//! textual variants of the same id (case, formatting) compare equal.

use uuid::Uuid;

use crate::error::AppError;

/// Allow the operation iff `requester` is the stored owner.
pub fn ensure_owner(owner: Uuid, requester: Uuid) -> Result<(), AppError> {
    if owner == requester {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
