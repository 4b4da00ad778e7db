//! PostgreSQL-backed `PostRepository`.
//!
//! Each post is one row. The aggregate travels as a `jsonb` document while
//! the author, group, visibility and creation time are duplicated into
//! indexed columns for feed queries. Saves replace the whole row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::feed::{FeedScope, TimelineAccess};
use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::posts::{Post, Visibility};
use crate::domain::{GroupId, PostId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{PostRecord, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, |message| PostRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

fn to_record(post: &Post) -> Result<PostRecord<'static>, PostRepositoryError> {
    let document = serde_json::to_value(post)
        .map_err(|err| PostRepositoryError::query(format!("serialise post {}: {err}", post.id())))?;
    Ok(PostRecord {
        id: *post.id().as_uuid(),
        author_id: *post.author().as_uuid(),
        group_id: post.group().map(|group| *group.as_uuid()),
        visibility: post.visibility().as_str(),
        created_at: post.created_at(),
        document,
    })
}

fn from_row(row: PostRow) -> Result<Post, PostRepositoryError> {
    serde_json::from_value(row.document)
        .map_err(|err| PostRepositoryError::query(format!("decode post {}: {err}", row.id)))
}

fn from_rows(rows: Vec<PostRow>) -> Result<Vec<Post>, PostRepositoryError> {
    rows.into_iter().map(from_row).collect()
}

fn uuids<T: Into<Uuid> + Copy>(ids: &[T]) -> Vec<Uuid> {
    ids.iter().map(|&id| id.into()).collect()
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let record = to_record(post)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(posts::table)
            .values(&record)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PostRow> = posts::table
            .filter(posts::id.eq(id.as_uuid()))
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(from_row).transpose()
    }

    async fn save(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let record = to_record(post)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(posts::table.filter(posts::id.eq(record.id)))
            .set(&record)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(PostRepositoryError::query(format!(
                "post {} does not exist",
                post.id()
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(posts::table.filter(posts::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list_feed(
        &self,
        scope: &FeedScope,
        page: PageRequest,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let offset = i64::try_from(page.offset())
            .map_err(|_| PostRepositoryError::query("page offset out of range"))?;
        let mut query = posts::table
            .select(PostRow::as_select())
            .order(posts::created_at.desc())
            .offset(offset)
            .limit(i64::from(page.limit()))
            .into_boxed();
        if let FeedScope::Scoped { authors, groups } = scope {
            query = query.filter(
                posts::author_id
                    .eq_any(uuids(authors))
                    .or(posts::group_id.assume_not_null().eq_any(uuids(groups))),
            );
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        from_rows(rows)
    }

    async fn list_by_author(
        &self,
        author: UserId,
        access: TimelineAccess,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let mut query = posts::table
            .filter(posts::author_id.eq(author.as_uuid()))
            .select(PostRow::as_select())
            .order(posts::created_at.desc())
            .into_boxed();
        if access == TimelineAccess::PublicOnly {
            query = query.filter(posts::visibility.eq(Visibility::Public.as_str()));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        from_rows(rows)
    }

    async fn list_by_group(&self, group: GroupId) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = posts::table
            .filter(posts::group_id.eq(group.as_uuid()))
            .select(PostRow::as_select())
            .order(posts::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        from_rows(rows)
    }
}
