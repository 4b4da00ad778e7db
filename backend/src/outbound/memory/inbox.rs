//! In-memory `NotificationInbox`.

use std::sync::RwLock;

use async_trait::async_trait;

use super::{read, write};
use crate::domain::ports::{NotificationInbox, NotificationInboxError};
use crate::domain::{Notification, NotificationId, UserId};

/// Every delivered notification, in delivery order.
#[derive(Debug, Default)]
pub struct MemoryNotificationInbox {
    notifications: RwLock<Vec<Notification>>,
}

impl MemoryNotificationInbox {
    /// Snapshot of everything delivered so far.
    pub fn delivered(&self) -> Vec<Notification> {
        read(&self.notifications).clone()
    }
}

#[async_trait]
impl NotificationInbox for MemoryNotificationInbox {
    async fn append(&self, notification: &Notification) -> Result<(), NotificationInboxError> {
        write(&self.notifications).push(notification.clone());
        Ok(())
    }

    async fn list_for(
        &self,
        recipient: UserId,
    ) -> Result<Vec<Notification>, NotificationInboxError> {
        let mut own: Vec<Notification> = read(&self.notifications)
            .iter()
            .filter(|notification| notification.recipient == recipient)
            .cloned()
            .collect();
        // Stable sort keeps later deliveries first among equal timestamps.
        own.reverse();
        own.sort_by_key(|notification| std::cmp::Reverse(notification.created_at));
        Ok(own)
    }

    async fn mark_read(
        &self,
        recipient: UserId,
        id: NotificationId,
    ) -> Result<bool, NotificationInboxError> {
        let mut notifications = write(&self.notifications);
        let target = notifications
            .iter_mut()
            .find(|notification| notification.id == id && notification.recipient == recipient);
        Ok(target.map(|notification| notification.is_read = true).is_some())
    }
}
