//! User profile data consumed by the post engine.
//!
//! Registration and profile editing live outside this service; the core only
//! needs enough of a user to attribute posts and word notifications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Account lifecycle state managed by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    /// The account may sign in and interact.
    Active,
    /// The account was suspended and may not sign in.
    Suspended,
}

impl AccountStatus {
    /// Stable storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Suspended => "Suspended",
        }
    }
}

/// Raised when a stored status string is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown account status: {0}")]
pub struct UnknownAccountStatus(pub String);

impl FromStr for AccountStatus {
    type Err = UnknownAccountStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Suspended" => Ok(Self::Suspended),
            other => Err(UnknownAccountStatus(other.to_owned())),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public face of a user as shown next to their posts.
///
/// # Examples
/// ```
/// use snapmate::domain::{UserId, UserProfile};
///
/// let profile = UserProfile::new(UserId::random(), "ada", "Ada Lovelace");
/// assert_eq!(profile.display_name, "Ada Lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable user identifier.
    pub id: UserId,
    /// Unique sign-in handle.
    pub username: String,
    /// Name rendered in feeds and notification messages.
    pub display_name: String,
}

impl UserProfile {
    /// Build a profile from its parts.
    pub fn new(id: UserId, username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
        }
    }
}
