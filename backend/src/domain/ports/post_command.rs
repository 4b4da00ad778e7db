//! Driving port for post, comment and reaction mutations.
//!
//! Every call takes the acting [`Actor`] explicitly; nothing reads ambient
//! session state.

use async_trait::async_trait;

use crate::domain::posts::{Comment, Image, PostPatch, ReactOutcome, ReactionKind, Visibility};
use crate::domain::{Actor, CommentId, Error, GroupId, PostId};

/// Request to publish a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostRequest {
    pub content: String,
    pub images: Vec<Image>,
    pub visibility: Visibility,
    pub group: Option<GroupId>,
}

/// What a reaction is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTarget {
    /// The post itself.
    Post(PostId),
    /// One comment on the post.
    Comment(PostId, CommentId),
}

impl ReactionTarget {
    /// The post that owns the target.
    pub const fn post_id(self) -> PostId {
        match self {
            Self::Post(post_id) | Self::Comment(post_id, _) => post_id,
        }
    }
}

/// Driving port for post write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Publish a post and notify friends or group members.
    async fn create_post(&self, actor: Actor, request: CreatePostRequest)
    -> Result<PostId, Error>;

    /// Apply an author edit, recording the replaced values.
    async fn edit_post(&self, actor: Actor, post_id: PostId, patch: PostPatch)
    -> Result<(), Error>;

    /// Delete a post as its author or an administrator.
    async fn delete_post(&self, actor: Actor, post_id: PostId) -> Result<(), Error>;

    /// Comment on a post and notify its author.
    async fn add_comment(
        &self,
        actor: Actor,
        post_id: PostId,
        content: String,
    ) -> Result<Comment, Error>;

    /// Reword a comment as its author.
    async fn edit_comment(
        &self,
        actor: Actor,
        post_id: PostId,
        comment_id: CommentId,
        content: String,
    ) -> Result<Comment, Error>;

    /// Remove a comment as its author, the post author or an administrator.
    async fn delete_comment(
        &self,
        actor: Actor,
        post_id: PostId,
        comment_id: CommentId,
    ) -> Result<(), Error>;

    /// Add a reaction, or overwrite the actor's existing one.
    async fn react(
        &self,
        actor: Actor,
        target: ReactionTarget,
        kind: ReactionKind,
    ) -> Result<ReactOutcome, Error>;

    /// Change the actor's existing reaction.
    async fn change_reaction(
        &self,
        actor: Actor,
        target: ReactionTarget,
        kind: ReactionKind,
    ) -> Result<(), Error>;

    /// Remove the actor's reaction. Succeeds when there is none.
    async fn unreact(&self, actor: Actor, target: ReactionTarget) -> Result<(), Error>;
}
