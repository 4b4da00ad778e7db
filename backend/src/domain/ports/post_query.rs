//! Driving port for reading posts.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::posts::{HistoryEntry, Post};
use crate::domain::{Actor, Error, GroupId, PostId, UserId, UserProfile};

/// A post together with the profiles of everyone who appears in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub post: Post,
    /// Profiles for the author, commenters and reactors that still resolve.
    pub profiles: Vec<UserProfile>,
}

impl PostView {
    /// Profile for `user`, if it resolved.
    pub fn profile(&self, user: UserId) -> Option<&UserProfile> {
        self.profiles.iter().find(|profile| profile.id == user)
    }

    /// Profile of the post author, if it resolved.
    pub fn author(&self) -> Option<&UserProfile> {
        self.profile(self.post.author())
    }
}

/// Driving port for post read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostQuery: Send + Sync {
    /// The viewer's feed, newest first, comments newest first.
    async fn feed(&self, actor: Actor, page: PageRequest) -> Result<Vec<PostView>, Error>;

    /// Posts written by `subject` that the viewer may see.
    async fn user_posts(&self, actor: Actor, subject: UserId) -> Result<Vec<PostView>, Error>;

    /// Posts in a group the viewer may read.
    async fn group_posts(&self, actor: Actor, group: GroupId) -> Result<Vec<PostView>, Error>;

    /// One post the viewer may see.
    async fn post(&self, actor: Actor, post_id: PostId) -> Result<PostView, Error>;

    /// Resolved edit history of a post the viewer may see.
    async fn history(&self, actor: Actor, post_id: PostId) -> Result<Vec<HistoryEntry>, Error>;
}
