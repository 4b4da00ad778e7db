//! PostgreSQL-backed `UserDirectory` reading public columns of `users`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{UserId, UserProfile};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserProfileRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserDirectory` port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserDirectoryError {
    map_basic_pool_error(error, |message| UserDirectoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    map_basic_diesel_error(
        error,
        UserDirectoryError::query,
        UserDirectoryError::connection,
    )
}

fn to_profile(row: UserProfileRow) -> UserProfile {
    UserProfile::new(UserId::from_uuid(row.id), row.username, row.display_name)
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserProfileRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(to_profile))
    }

    async fn find_profiles(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, UserDirectoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let wanted: Vec<Uuid> = ids.iter().map(|&id| id.into()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserProfileRow> = users::table
            .filter(users::id.eq_any(wanted))
            .select(UserProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(to_profile).collect())
    }
}
