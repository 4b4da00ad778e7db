//! In-memory `PostRepository`.

use std::sync::RwLock;

use async_trait::async_trait;
use pagination::PageRequest;

use super::{read, write};
use crate::domain::feed::{FeedScope, TimelineAccess};
use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::posts::Post;
use crate::domain::{GroupId, PostId, UserId};

/// Post documents held in insertion order.
#[derive(Debug, Default)]
pub struct MemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostRepository {
    /// Number of stored posts.
    pub fn len(&self) -> usize {
        read(&self.posts).len()
    }

    /// Whether no posts are stored.
    pub fn is_empty(&self) -> bool {
        read(&self.posts).is_empty()
    }

    fn newest_first(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut matching: Vec<Post> = read(&self.posts)
            .iter()
            .filter(|post| keep(post))
            .cloned()
            .collect();
        matching.sort_by_key(|post| std::cmp::Reverse(post.created_at()));
        matching
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let mut posts = write(&self.posts);
        if posts.iter().any(|stored| stored.id() == post.id()) {
            return Err(PostRepositoryError::query(format!(
                "post {} already exists",
                post.id()
            )));
        }
        posts.push(post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        Ok(read(&self.posts).iter().find(|post| post.id() == id).cloned())
    }

    async fn save(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let mut posts = write(&self.posts);
        match posts.iter_mut().find(|stored| stored.id() == post.id()) {
            Some(stored) => {
                *stored = post.clone();
                Ok(())
            }
            None => Err(PostRepositoryError::query(format!(
                "post {} does not exist",
                post.id()
            ))),
        }
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut posts = write(&self.posts);
        let before = posts.len();
        posts.retain(|post| post.id() != id);
        Ok(posts.len() != before)
    }

    async fn list_feed(
        &self,
        scope: &FeedScope,
        page: PageRequest,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(self
            .newest_first(|post| scope.includes(post))
            .into_iter()
            .skip(skip)
            .take(take)
            .collect())
    }

    async fn list_by_author(
        &self,
        author: UserId,
        access: TimelineAccess,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        Ok(self.newest_first(|post| post.author() == author && access.admits(post)))
    }

    async fn list_by_group(&self, group: GroupId) -> Result<Vec<Post>, PostRepositoryError> {
        Ok(self.newest_first(|post| post.group() == Some(group)))
    }
}
