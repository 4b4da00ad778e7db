//! Notifications and the events that produce them.
//!
//! [`NotificationEvent`] is the only place display messages are formatted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NotificationId, UserId};

/// Category shown next to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    User,
    Group,
    Post,
    Comment,
    Reaction,
}

impl NotificationKind {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Group => "Group",
            Self::Post => "Post",
            Self::Comment => "Comment",
            Self::Reaction => "Reaction",
        }
    }
}

/// Raised when a stored notification kind is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notification kind: {0}")]
pub struct UnknownNotificationKind(pub String);

impl FromStr for NotificationKind {
    type Err = UnknownNotificationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Self::User),
            "Group" => Ok(Self::Group),
            "Post" => Ok(Self::Post),
            "Comment" => Ok(Self::Comment),
            "Reaction" => Ok(Self::Reaction),
            other => Err(UnknownNotificationKind(other.to_owned())),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that happened which somebody should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    /// A member posted in a group.
    GroupPost { group_name: String, author_name: String },
    /// A user published a personal post.
    FriendPost { author_name: String },
    /// Someone commented on a post.
    PostComment { actor_name: String },
    /// Someone reacted to a post.
    PostReaction { actor_name: String },
    /// Someone reacted to a comment.
    CommentReaction { actor_name: String },
}

impl NotificationEvent {
    /// Category recorded with the notification.
    pub const fn kind(&self) -> NotificationKind {
        match self {
            Self::GroupPost { .. } | Self::FriendPost { .. } => NotificationKind::Post,
            Self::PostComment { .. } => NotificationKind::Comment,
            Self::PostReaction { .. } | Self::CommentReaction { .. } => NotificationKind::Reaction,
        }
    }

    /// Display message stored with the notification.
    ///
    /// # Examples
    /// ```
    /// use snapmate::domain::NotificationEvent;
    ///
    /// let event = NotificationEvent::PostComment { actor_name: "Ada".into() };
    /// assert_eq!(event.message(), "Ada commented on your post.");
    /// ```
    pub fn message(&self) -> String {
        match self {
            Self::GroupPost {
                group_name,
                author_name,
            } => format!("New post in {group_name} created by {author_name}."),
            Self::FriendPost { author_name } => format!("{author_name} has created a new post."),
            Self::PostComment { actor_name } => format!("{actor_name} commented on your post."),
            Self::PostReaction { actor_name } => format!("{actor_name} reacted to your post."),
            Self::CommentReaction { actor_name } => {
                format!("{actor_name} reacted to your comment.")
            }
        }
    }
}

/// A message in one user's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: UserId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build an unread notification for `recipient`.
    pub fn unread(recipient: UserId, event: &NotificationEvent, now: DateTime<Utc>) -> Self {
        Self {
            id: NotificationId::random(),
            recipient,
            kind: event.kind(),
            message: event.message(),
            is_read: false,
            created_at: now,
        }
    }
}
