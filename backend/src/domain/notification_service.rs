//! Inbox reads and read-flag updates for the signed-in user.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{InboxService, NotificationInbox, NotificationInboxError};
use crate::domain::{Error, Notification, NotificationId, UserId};

/// Service implementing [`InboxService`] over a [`NotificationInbox`].
#[derive(Clone)]
pub struct NotificationService<N> {
    inbox: Arc<N>,
}

impl<N> NotificationService<N> {
    /// Create a service backed by `inbox`.
    pub fn new(inbox: Arc<N>) -> Self {
        Self { inbox }
    }
}

fn map_inbox_error(error: NotificationInboxError) -> Error {
    match error {
        NotificationInboxError::Connection { message } => {
            Error::service_unavailable(format!("notification inbox unavailable: {message}"))
        }
        NotificationInboxError::Query { message } => {
            Error::internal(format!("notification inbox error: {message}"))
        }
    }
}

#[async_trait]
impl<N> InboxService for NotificationService<N>
where
    N: NotificationInbox,
{
    async fn list(&self, user: UserId) -> Result<Vec<Notification>, Error> {
        self.inbox.list_for(user).await.map_err(map_inbox_error)
    }

    async fn mark_read(&self, user: UserId, id: NotificationId) -> Result<(), Error> {
        let found = self
            .inbox
            .mark_read(user, id)
            .await
            .map_err(map_inbox_error)?;
        if found {
            Ok(())
        } else {
            Err(Error::not_found("Notification not found"))
        }
    }
}
