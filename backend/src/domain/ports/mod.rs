//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, `*Store`, `*Directory`, `*Inbox`) are
//! implemented by outbound adapters. Driving ports (`*Command`, `*Query`,
//! `*Service`) are implemented by domain services and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod inbox_service;
mod login_service;
mod notification_inbox;
mod post_command;
mod post_query;
mod post_repository;
mod relationship_store;
mod user_directory;

pub use inbox_service::InboxService;
#[cfg(test)]
pub use inbox_service::MockInboxService;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use notification_inbox::MockNotificationInbox;
pub use notification_inbox::{NotificationInbox, NotificationInboxError};
#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_command::{CreatePostRequest, PostCommand, ReactionTarget};
#[cfg(test)]
pub use post_query::MockPostQuery;
pub use post_query::{PostQuery, PostView};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use relationship_store::MockRelationshipStore;
pub use relationship_store::{RelationshipStore, RelationshipStoreError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
