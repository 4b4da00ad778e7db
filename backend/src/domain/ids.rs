//! UUID-backed identifiers for domain entities.
//!
//! Each entity gets its own newtype so a comment id can never be passed where
//! a post id is expected. All of them serialise as bare UUID strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_uuid_id!(
    /// Identifier of a platform user or administrator account.
    UserId
);
define_uuid_id!(
    /// Identifier of a post aggregate.
    PostId
);
define_uuid_id!(
    /// Identifier of a comment, unique within its post.
    CommentId
);
define_uuid_id!(
    /// Identifier of a reaction, unique within its parent.
    ReactionId
);
define_uuid_id!(
    /// Identifier of a group.
    GroupId
);
define_uuid_id!(
    /// Identifier of a notification, unique within its recipient's inbox.
    NotificationId
);
