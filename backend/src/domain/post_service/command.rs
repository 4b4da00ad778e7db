//! Write side of the post engine.

use async_trait::async_trait;
use tracing::{info, warn};

use super::{
    COMMENT_NOT_FOUND, POST_NOT_FOUND, PostService, REACTION_NOT_FOUND, map_post_error,
    map_validation_error,
};
use crate::domain::ports::{
    CreatePostRequest, NotificationInbox, PostCommand, PostRepository, ReactionTarget,
    RelationshipStore, UserDirectory,
};
use crate::domain::posts::{Comment, NewPost, Post, PostPatch, ReactOutcome, ReactionKind};
use crate::domain::{Actor, CommentId, Error, Group, NotificationEvent, PostId, UserId};

impl<P, R, U, N> PostService<P, R, U, N>
where
    P: PostRepository,
    R: RelationshipStore,
    U: UserDirectory,
    N: NotificationInbox,
{
    async fn save(&self, post: &Post) -> Result<(), Error> {
        self.posts.save(post).await.map_err(map_post_error)
    }

    /// Tell friends or group members about a new post.
    async fn announce_post(&self, post: &Post, group: Option<&Group>) {
        let author = post.author();
        let Some(author_name) = self.display_name(author).await else {
            return;
        };
        let (recipients, event) = match group {
            Some(group) => (
                group.members.clone(),
                NotificationEvent::GroupPost {
                    group_name: group.name.clone(),
                    author_name,
                },
            ),
            None => match self.relationships.friends_of(author).await {
                Ok(friends) => (friends, NotificationEvent::FriendPost { author_name }),
                Err(error) => {
                    warn!(%author, %error, "friend lookup for post fan-out failed");
                    return;
                }
            },
        };
        let report = self.fanout.notify_all(&recipients, &event).await;
        info!(
            post_id = %post.id(),
            delivered = report.delivered,
            failed = report.failed,
            "post creation fan-out finished"
        );
    }

    /// Notify the owner of a post or comment about an interaction.
    async fn notify_owner(
        &self,
        actor: UserId,
        owner: UserId,
        make_event: impl FnOnce(String) -> NotificationEvent + Send,
    ) {
        if actor == owner {
            return;
        }
        if let Some(actor_name) = self.display_name(actor).await {
            self.fanout
                .notify_one(actor, owner, &make_event(actor_name))
                .await;
        }
    }
}

#[async_trait]
impl<P, R, U, N> PostCommand for PostService<P, R, U, N>
where
    P: PostRepository,
    R: RelationshipStore,
    U: UserDirectory,
    N: NotificationInbox,
{
    async fn create_post(
        &self,
        actor: Actor,
        request: CreatePostRequest,
    ) -> Result<PostId, Error> {
        let author = actor.require_member()?;
        let group = match request.group {
            Some(group_id) => {
                let group = self.load_group(group_id).await?;
                if !group.has_member(author) {
                    return Err(Error::forbidden(
                        "You must be a member of this group to post in it",
                    ));
                }
                Some(group)
            }
            None => None,
        };

        let post = Post::create(
            PostId::random(),
            NewPost {
                author,
                content: request.content,
                images: request.images,
                visibility: request.visibility,
                group: request.group,
            },
            self.clock.utc(),
        )
        .map_err(map_validation_error)?;
        self.posts.insert(&post).await.map_err(map_post_error)?;

        self.announce_post(&post, group.as_ref()).await;
        Ok(post.id())
    }

    async fn edit_post(
        &self,
        actor: Actor,
        post_id: PostId,
        patch: PostPatch,
    ) -> Result<(), Error> {
        let mut post = self.load_post(post_id).await?;
        if post.author() != actor.id() {
            return Err(Error::forbidden("You are not authorized to edit this post"));
        }
        let changed = post
            .apply_edit(patch, self.clock.utc())
            .map_err(map_validation_error)?;
        if changed {
            self.save(&post).await?;
        }
        Ok(())
    }

    async fn delete_post(&self, actor: Actor, post_id: PostId) -> Result<(), Error> {
        let post = self.load_post(post_id).await?;
        if post.author() != actor.id() && !actor.is_admin() {
            return Err(Error::forbidden("You are not authorized to delete this post"));
        }
        let deleted = self.posts.delete(post_id).await.map_err(map_post_error)?;
        if !deleted {
            return Err(Error::not_found(POST_NOT_FOUND));
        }
        Ok(())
    }

    async fn add_comment(
        &self,
        actor: Actor,
        post_id: PostId,
        content: String,
    ) -> Result<Comment, Error> {
        let author = actor.require_member()?;
        let comment = Comment::new(CommentId::random(), author, &content, self.clock.utc())
            .map_err(map_validation_error)?;
        let mut post = self.load_post(post_id).await?;
        self.ensure_visible(&actor, &post).await?;

        post.add_comment(comment.clone());
        self.save(&post).await?;

        self.notify_owner(author, post.author(), |actor_name| {
            NotificationEvent::PostComment { actor_name }
        })
        .await;
        Ok(comment)
    }

    async fn edit_comment(
        &self,
        actor: Actor,
        post_id: PostId,
        comment_id: CommentId,
        content: String,
    ) -> Result<Comment, Error> {
        let mut post = self.load_post(post_id).await?;
        let now = self.clock.utc();
        let comment = post
            .comment_mut(comment_id)
            .ok_or_else(|| Error::not_found(COMMENT_NOT_FOUND))?;
        if comment.author() != actor.id() {
            return Err(Error::forbidden("You are not authorized to edit this comment"));
        }
        comment.edit(&content, now).map_err(map_validation_error)?;
        let edited = comment.clone();
        self.save(&post).await?;
        Ok(edited)
    }

    async fn delete_comment(
        &self,
        actor: Actor,
        post_id: PostId,
        comment_id: CommentId,
    ) -> Result<(), Error> {
        let mut post = self.load_post(post_id).await?;
        let comment = post
            .comment(comment_id)
            .ok_or_else(|| Error::not_found(COMMENT_NOT_FOUND))?;
        let permitted = comment.author() == actor.id()
            || post.author() == actor.id()
            || actor.is_admin();
        if !permitted {
            return Err(Error::forbidden(
                "You are not authorized to delete this comment",
            ));
        }
        post.remove_comment(comment_id);
        self.save(&post).await
    }

    async fn react(
        &self,
        actor: Actor,
        target: ReactionTarget,
        kind: ReactionKind,
    ) -> Result<ReactOutcome, Error> {
        let author = actor.require_member()?;
        let mut post = self.load_post(target.post_id()).await?;
        self.ensure_visible(&actor, &post).await?;

        let (outcome, owner) = match target {
            ReactionTarget::Post(_) => (post.react(author, kind), post.author()),
            ReactionTarget::Comment(_, comment_id) => {
                let comment = post
                    .comment_mut(comment_id)
                    .ok_or_else(|| Error::not_found(COMMENT_NOT_FOUND))?;
                (comment.reactions_mut().upsert(author, kind), comment.author())
            }
        };
        self.save(&post).await?;

        if outcome.is_new() {
            self.notify_owner(author, owner, |actor_name| match target {
                ReactionTarget::Post(_) => NotificationEvent::PostReaction { actor_name },
                ReactionTarget::Comment(..) => NotificationEvent::CommentReaction { actor_name },
            })
            .await;
        }
        Ok(outcome)
    }

    async fn change_reaction(
        &self,
        actor: Actor,
        target: ReactionTarget,
        kind: ReactionKind,
    ) -> Result<(), Error> {
        let author = actor.require_member()?;
        let mut post = self.load_post(target.post_id()).await?;
        let changed = match target {
            ReactionTarget::Post(_) => post.change_reaction(author, kind),
            ReactionTarget::Comment(_, comment_id) => post
                .comment_mut(comment_id)
                .ok_or_else(|| Error::not_found(COMMENT_NOT_FOUND))?
                .reactions_mut()
                .change(author, kind),
        };
        if !changed {
            return Err(Error::not_found(REACTION_NOT_FOUND));
        }
        self.save(&post).await
    }

    async fn unreact(&self, actor: Actor, target: ReactionTarget) -> Result<(), Error> {
        let mut post = self.load_post(target.post_id()).await?;
        let removed = match target {
            ReactionTarget::Post(_) => post.unreact(actor.id()),
            ReactionTarget::Comment(_, comment_id) => post
                .comment_mut(comment_id)
                .ok_or_else(|| Error::not_found(COMMENT_NOT_FOUND))?
                .reactions_mut()
                .remove(actor.id()),
        };
        if removed {
            self.save(&post).await?;
        }
        Ok(())
    }
}
