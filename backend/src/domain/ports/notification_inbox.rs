//! Driven port for per-user notification inboxes.

use async_trait::async_trait;

use crate::domain::{Notification, NotificationId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification inbox adapters.
    pub enum NotificationInboxError {
        /// Inbox connection could not be established.
        Connection { message: String } => "notification inbox connection failed: {message}",
        /// Append or lookup failed during execution.
        Query { message: String } => "notification inbox query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// Append to the recipient's inbox.
    async fn append(&self, notification: &Notification) -> Result<(), NotificationInboxError>;

    /// The recipient's notifications, newest first.
    async fn list_for(&self, recipient: UserId)
    -> Result<Vec<Notification>, NotificationInboxError>;

    /// Flag one of the recipient's notifications as read. Returns `false`
    /// when the recipient has no notification with that id.
    async fn mark_read(
        &self,
        recipient: UserId,
        id: NotificationId,
    ) -> Result<bool, NotificationInboxError>;
}
