//! PostgreSQL-backed `NotificationInbox`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NotificationInbox, NotificationInboxError};
use crate::domain::{Notification, NotificationId, NotificationKind, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewNotificationRow, NotificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::notifications;

/// Diesel-backed implementation of the `NotificationInbox` port.
#[derive(Clone)]
pub struct DieselNotificationInbox {
    pool: DbPool,
}

impl DieselNotificationInbox {
    /// Create a new inbox with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NotificationInboxError {
    map_basic_pool_error(error, |message| NotificationInboxError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> NotificationInboxError {
    map_basic_diesel_error(
        error,
        NotificationInboxError::query,
        NotificationInboxError::connection,
    )
}

fn from_row(row: NotificationRow) -> Result<Notification, NotificationInboxError> {
    let kind = row.kind.parse::<NotificationKind>().map_err(|err| {
        NotificationInboxError::query(format!("notification {}: {err}", row.id))
    })?;
    Ok(Notification {
        id: NotificationId::from_uuid(row.id),
        recipient: UserId::from_uuid(row.recipient_id),
        kind,
        message: row.message,
        is_read: row.is_read,
        created_at: row.created_at,
    })
}

#[async_trait]
impl NotificationInbox for DieselNotificationInbox {
    async fn append(&self, notification: &Notification) -> Result<(), NotificationInboxError> {
        let row = NewNotificationRow {
            id: *notification.id.as_uuid(),
            recipient_id: *notification.recipient.as_uuid(),
            kind: notification.kind.as_str(),
            message: &notification.message,
            is_read: notification.is_read,
            created_at: notification.created_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(notifications::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for(
        &self,
        recipient: UserId,
    ) -> Result<Vec<Notification>, NotificationInboxError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NotificationRow> = notifications::table
            .filter(notifications::recipient_id.eq(recipient.as_uuid()))
            .select(NotificationRow::as_select())
            .order(notifications::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(from_row).collect()
    }

    async fn mark_read(
        &self,
        recipient: UserId,
        id: NotificationId,
    ) -> Result<bool, NotificationInboxError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            notifications::table
                .filter(notifications::id.eq(id.as_uuid()))
                .filter(notifications::recipient_id.eq(recipient.as_uuid())),
        )
        .set(notifications::is_read.eq(true))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }
}
