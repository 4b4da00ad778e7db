//! Diesel-backed `LoginService` checking Argon2 hashes in `admins` and
//! `users`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::LoginService;
use crate::domain::{AccountStatus, Actor, Error, LoginCredentials, UserId};
use crate::outbound::credentials::{StoredAccount, check_account};

use super::models::{AdminAccountRow, UserAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::{admins, users};

/// Diesel-backed implementation of the `LoginService` port.
///
/// Administrator accounts are matched first, then members.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn lookup(&self, username: &str) -> Result<Option<StoredAccount>, Error> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let admin: Option<AdminAccountRow> = admins::table
            .filter(admins::username.eq(username))
            .select(AdminAccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        if let Some(row) = admin {
            return Ok(Some(StoredAccount {
                actor: Actor::admin(UserId::from_uuid(row.id)),
                password_hash: row.password_hash,
                status: AccountStatus::Active,
            }));
        }

        let member: Option<UserAccountRow> = users::table
            .filter(users::username.eq(username))
            .select(UserAccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(member.map(member_account))
    }
}

fn map_pool_error(error: PoolError) -> Error {
    Error::service_unavailable(format!("account store unavailable: {error}"))
}

fn map_diesel_error(error: diesel::result::Error) -> Error {
    match error {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ClosedConnection,
            _,
        ) => Error::service_unavailable("account store unavailable"),
        other => Error::internal(format!("account lookup failed: {other}")),
    }
}

fn member_account(row: UserAccountRow) -> StoredAccount {
    let status = row.status.parse().unwrap_or_else(|_| {
        warn!(
            value = %row.status,
            user_id = %row.id,
            "unrecognised account status, treating account as suspended"
        );
        AccountStatus::Suspended
    });
    StoredAccount {
        actor: Actor::member(UserId::from_uuid(row.id)),
        password_hash: row.password_hash,
        status,
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Actor, Error> {
        let account = self.lookup(credentials.username()).await?;
        check_account(account, credentials.password())
    }
}
