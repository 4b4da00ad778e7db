//! Best-effort delivery of notifications into inboxes.
//!
//! Delivery never fails the operation that triggered it. Single deliveries
//! report whether they landed; batches report how many did. Failures are
//! logged and otherwise swallowed.

use std::sync::Arc;

use mockable::Clock;
use tracing::warn;

use crate::domain::ports::NotificationInbox;
use crate::domain::{Notification, NotificationEvent, UserId};

/// Outcome of [`NotificationFanout::notify_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutReport {
    /// Notifications appended.
    pub delivered: usize,
    /// Appends that failed.
    pub failed: usize,
}

/// Writes notifications for engine events.
pub struct NotificationFanout<N> {
    inbox: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<N> NotificationFanout<N> {
    /// Create a fan-out writer over `inbox`.
    pub fn new(inbox: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self { inbox, clock }
    }
}

impl<N: NotificationInbox> NotificationFanout<N> {
    /// Notify a single recipient unless they are the actor.
    ///
    /// Returns `true` when a notification was appended.
    pub async fn notify_one(
        &self,
        actor: UserId,
        recipient: UserId,
        event: &NotificationEvent,
    ) -> bool {
        if actor == recipient {
            return false;
        }
        self.deliver(recipient, event).await
    }

    /// Notify every recipient, one append each.
    ///
    /// No recipient is skipped, the actor included. Appends are independent:
    /// a failure for one recipient does not stop the rest.
    pub async fn notify_all(&self, recipients: &[UserId], event: &NotificationEvent) -> FanoutReport {
        let mut report = FanoutReport::default();
        for recipient in recipients {
            if self.deliver(*recipient, event).await {
                report.delivered += 1;
            } else {
                report.failed += 1;
            }
        }
        report
    }

    async fn deliver(&self, recipient: UserId, event: &NotificationEvent) -> bool {
        let notification = Notification::unread(recipient, event, self.clock.utc());
        match self.inbox.append(&notification).await {
            Ok(()) => true,
            Err(error) => {
                warn!(
                    %recipient,
                    kind = %notification.kind,
                    %error,
                    "notification delivery failed"
                );
                false
            }
        }
    }
}
