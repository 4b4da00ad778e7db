//! Driven port for post document persistence.
//!
//! A post and everything it embeds is read and written as one document.
//! `save` replaces the whole document; concurrent writers race with
//! last-write-wins semantics.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::feed::{FeedScope, TimelineAccess};
use crate::domain::posts::Post;
use crate::domain::{GroupId, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store a new post.
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError>;

    /// Load a post with its comments, reactions and history.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Replace a stored post with `post`.
    async fn save(&self, post: &Post) -> Result<(), PostRepositoryError>;

    /// Hard-delete a post. Returns `false` when it did not exist.
    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError>;

    /// One page of posts inside `scope`, newest first.
    ///
    /// Each post appears at most once, even when it matches several arms of
    /// the scope (for example a friend's post in a shared group).
    async fn list_feed(
        &self,
        scope: &FeedScope,
        page: PageRequest,
    ) -> Result<Vec<Post>, PostRepositoryError>;

    /// Posts written by `author` that `access` admits, newest first.
    async fn list_by_author(
        &self,
        author: UserId,
        access: TimelineAccess,
    ) -> Result<Vec<Post>, PostRepositoryError>;

    /// Posts in `group`, newest first.
    async fn list_by_group(&self, group: GroupId) -> Result<Vec<Post>, PostRepositoryError>;
}
