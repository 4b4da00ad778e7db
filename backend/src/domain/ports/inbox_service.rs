//! Driving port for a user reading their own notifications.

use async_trait::async_trait;

use crate::domain::{Error, Notification, NotificationId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InboxService: Send + Sync {
    /// The user's notifications, newest first.
    async fn list(&self, user: UserId) -> Result<Vec<Notification>, Error>;

    /// Flag one notification as read.
    async fn mark_read(&self, user: UserId, id: NotificationId) -> Result<(), Error>;
}
