//! The ownership gate - mutation is restricted to the original author.

use uuid::Uuid;

use crate::error::DomainError;

/// Anything that carries an author. Posts and comments both do.
pub trait Authored {
    fn author_id(&self) -> Uuid;
}

/// True iff `actor` is the author of `resource`.
pub fn allow_mutate<R: Authored>(actor: Uuid, resource: &R) -> bool {
    actor == resource.author_id()
}

/// Gate applied before every update or delete. A mismatch is rejected with
/// `Forbidden`, never silently ignored.
pub fn ensure_author<R: Authored>(actor: Uuid, resource: &R) -> Result<(), DomainError> {
    if allow_mutate(actor, resource) {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}
