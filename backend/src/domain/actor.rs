//! The authenticated caller of a domain operation.

use serde::{Deserialize, Serialize};

use super::{Error, UserId};

/// Which account table an authenticated identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// A platform user who posts, comments and reacts.
    Member,
    /// A moderator account. Administrators see everything and may delete
    /// content but do not author any.
    Admin,
}

/// Identity of whoever triggered an operation, taken from the session.
///
/// # Examples
/// ```
/// use snapmate::domain::{Actor, UserId};
///
/// let admin = Actor::admin(UserId::random());
/// assert!(admin.is_admin());
/// assert!(admin.require_member().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: UserId,
    role: ActorRole,
}

impl Actor {
    /// A regular platform user.
    #[must_use]
    pub const fn member(id: UserId) -> Self {
        Self {
            id,
            role: ActorRole::Member,
        }
    }

    /// An administrator account.
    #[must_use]
    pub const fn admin(id: UserId) -> Self {
        Self {
            id,
            role: ActorRole::Admin,
        }
    }

    /// Build an actor from a stored role.
    #[must_use]
    pub const fn new(id: UserId, role: ActorRole) -> Self {
        Self { id, role }
    }

    /// Account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Account role.
    #[must_use]
    pub const fn role(&self) -> ActorRole {
        self.role
    }

    /// Whether the actor is an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, ActorRole::Admin)
    }

    /// Return the member id, rejecting administrators with `403 Forbidden`.
    ///
    /// Authoring operations are reserved for platform users.
    pub fn require_member(&self) -> Result<UserId, Error> {
        if self.is_admin() {
            return Err(Error::forbidden("Administrators cannot author content"));
        }
        Ok(self.id)
    }
}
