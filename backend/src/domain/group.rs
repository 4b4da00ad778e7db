//! Groups as seen by the post engine: a name, a visibility and a roster.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{GroupId, UserId};

/// Whether non-members may read a group's posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupVisibility {
    /// Anyone signed in may read the group's posts.
    Public,
    /// Only members may read the group's posts.
    Private,
}

/// Raised when a stored visibility string is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown group visibility: {0}")]
pub struct UnknownGroupVisibility(pub String);

impl FromStr for GroupVisibility {
    type Err = UnknownGroupVisibility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Public" => Ok(Self::Public),
            "Private" => Ok(Self::Private),
            other => Err(UnknownGroupVisibility(other.to_owned())),
        }
    }
}

/// A group and its current members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Group identifier.
    pub id: GroupId,
    /// Display name used in notification messages.
    pub name: String,
    /// Read access policy.
    pub visibility: GroupVisibility,
    /// Current members, administrators of the group included.
    pub members: Vec<UserId>,
}

impl Group {
    /// Whether `user` is a current member.
    pub fn has_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }

    /// Whether `user` may read this group's posts.
    pub fn is_readable_by(&self, user: UserId) -> bool {
        matches!(self.visibility, GroupVisibility::Public) || self.has_member(user)
    }
}
