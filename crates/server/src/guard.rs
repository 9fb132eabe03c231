//! The ownership guard: one decision function for every owner-scoped access.
//!
//! Checks run in a fixed order so unauthenticated callers never learn whether
//! an id exists, and authenticated callers probing foreign ids learn only
//! "forbidden". Purely a decision function; re-evaluated per request, never
//! cached.

/// A resource with a recorded owner.
pub trait Owned {
    fn owner_id(&self) -> &str;
}

impl Owned for crate::database::models::Note {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Owned for crate::database::models::File {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

/// Reason an access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deny {
    /// No authenticated caller.
    Unauthenticated,
    /// The resource does not exist.
    NotFound,
    /// The resource exists but belongs to someone else.
    Forbidden,
}

/// Decide whether `user` may access `resource`.
pub fn authorize<R: Owned>(user: Option<&str>, resource: Option<&R>) -> Result<(), Deny> {
    let user = user.ok_or(Deny::Unauthenticated)?;
    let resource = resource.ok_or(Deny::NotFound)?;
    if resource.owner_id() != user {
        return Err(Deny::Forbidden);
    }
    Ok(())
}
