//! PostgreSQL-backed `RelationshipStore` over `friendships`, `groups` and
//! `group_members`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{RelationshipStore, RelationshipStoreError};
use crate::domain::{Group, GroupId, GroupVisibility, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::GroupRow;
use super::pool::{DbPool, PoolError};
use super::schema::{friendships, group_members, groups};

/// Diesel-backed implementation of the `RelationshipStore` port.
#[derive(Clone)]
pub struct DieselRelationshipStore {
    pool: DbPool,
}

impl DieselRelationshipStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RelationshipStoreError {
    map_basic_pool_error(error, |message| RelationshipStoreError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> RelationshipStoreError {
    map_basic_diesel_error(
        error,
        RelationshipStoreError::query,
        RelationshipStoreError::connection,
    )
}

fn parse_visibility(row: &GroupRow) -> GroupVisibility {
    row.visibility.parse().unwrap_or_else(|_| {
        warn!(
            value = %row.visibility,
            group_id = %row.id,
            "unrecognised group visibility, treating group as private"
        );
        GroupVisibility::Private
    })
}

#[async_trait]
impl RelationshipStore for DieselRelationshipStore {
    async fn friends_of(&self, user: UserId) -> Result<Vec<UserId>, RelationshipStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<Uuid> = friendships::table
            .filter(friendships::user_id.eq(user.as_uuid()))
            .select(friendships::friend_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ids.into_iter().map(UserId::from_uuid).collect())
    }

    async fn is_friend(&self, a: UserId, b: UserId) -> Result<bool, RelationshipStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(
            friendships::table
                .filter(friendships::user_id.eq(a.as_uuid()))
                .filter(friendships::friend_id.eq(b.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn groups_of(&self, user: UserId) -> Result<Vec<GroupId>, RelationshipStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<Uuid> = group_members::table
            .filter(group_members::user_id.eq(user.as_uuid()))
            .select(group_members::group_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ids.into_iter().map(GroupId::from_uuid).collect())
    }

    async fn is_group_member(
        &self,
        group: GroupId,
        user: UserId,
    ) -> Result<bool, RelationshipStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(
            group_members::table
                .filter(group_members::group_id.eq(group.as_uuid()))
                .filter(group_members::user_id.eq(user.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn find_group(&self, group: GroupId) -> Result<Option<Group>, RelationshipStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<GroupRow> = groups::table
            .filter(groups::id.eq(group.as_uuid()))
            .select(GroupRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let members: Vec<Uuid> = group_members::table
            .filter(group_members::group_id.eq(row.id))
            .select(group_members::user_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(Group {
            id: GroupId::from_uuid(row.id),
            visibility: parse_visibility(&row),
            name: row.name,
            members: members.into_iter().map(UserId::from_uuid).collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Public", GroupVisibility::Public)]
    #[case("Private", GroupVisibility::Private)]
    #[case("hidden", GroupVisibility::Private)]
    fn visibility_column_falls_back_to_private(
        #[case] raw: &str,
        #[case] expected: GroupVisibility,
    ) {
        let row = GroupRow {
            id: Uuid::new_v4(),
            name: "Hikers".to_owned(),
            visibility: raw.to_owned(),
        };
        assert_eq!(parse_visibility(&row), expected);
    }
}
