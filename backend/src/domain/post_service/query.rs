//! Read side of the post engine.

use async_trait::async_trait;
use pagination::PageRequest;

use super::{
    PostService, USER_NOT_FOUND, map_directory_error, map_post_error, map_relationship_error,
};
use crate::domain::feed::{FeedScope, TimelineAccess, can_read_group};
use crate::domain::ports::{
    NotificationInbox, PostQuery, PostRepository, PostView, RelationshipStore, UserDirectory,
};
use crate::domain::posts::HistoryEntry;
use crate::domain::{Actor, Error, GroupId, PostId, UserId};

impl<P, R, U, N> PostService<P, R, U, N>
where
    P: PostRepository,
    R: RelationshipStore,
    U: UserDirectory,
    N: NotificationInbox,
{
    async fn feed_scope(&self, actor: &Actor) -> Result<FeedScope, Error> {
        if actor.is_admin() {
            return Ok(FeedScope::Everything);
        }
        let friends = self
            .relationships
            .friends_of(actor.id())
            .await
            .map_err(map_relationship_error)?;
        let groups = self
            .relationships
            .groups_of(actor.id())
            .await
            .map_err(map_relationship_error)?;
        Ok(FeedScope::for_viewer(actor, friends, groups))
    }

    async fn timeline_access(&self, actor: &Actor, subject: UserId) -> Result<TimelineAccess, Error> {
        if actor.is_admin() || actor.id() == subject {
            return Ok(TimelineAccess::Full);
        }
        let is_friend = self
            .relationships
            .is_friend(actor.id(), subject)
            .await
            .map_err(map_relationship_error)?;
        Ok(TimelineAccess::for_viewer(actor, subject, is_friend))
    }
}

#[async_trait]
impl<P, R, U, N> PostQuery for PostService<P, R, U, N>
where
    P: PostRepository,
    R: RelationshipStore,
    U: UserDirectory,
    N: NotificationInbox,
{
    async fn feed(&self, actor: Actor, page: PageRequest) -> Result<Vec<PostView>, Error> {
        let scope = self.feed_scope(&actor).await?;
        let posts = self
            .posts
            .list_feed(&scope, page)
            .await
            .map_err(map_post_error)?;
        self.attach_profiles(posts).await
    }

    async fn user_posts(&self, actor: Actor, subject: UserId) -> Result<Vec<PostView>, Error> {
        self.users
            .find_profile(subject)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        let access = self.timeline_access(&actor, subject).await?;
        let posts = self
            .posts
            .list_by_author(subject, access)
            .await
            .map_err(map_post_error)?;
        self.attach_profiles(posts).await
    }

    async fn group_posts(&self, actor: Actor, group: GroupId) -> Result<Vec<PostView>, Error> {
        let group = self.load_group(group).await?;
        if !can_read_group(&actor, &group) {
            return Err(Error::forbidden(
                "You are not authorized to view posts in this group",
            ));
        }
        let posts = self
            .posts
            .list_by_group(group.id)
            .await
            .map_err(map_post_error)?;
        self.attach_profiles(posts).await
    }

    async fn post(&self, actor: Actor, post_id: PostId) -> Result<PostView, Error> {
        let post = self.load_post(post_id).await?;
        self.ensure_visible(&actor, &post).await?;
        let mut views = self.attach_profiles(vec![post]).await?;
        views
            .pop()
            .ok_or_else(|| Error::internal("post view was not assembled"))
    }

    async fn history(&self, actor: Actor, post_id: PostId) -> Result<Vec<HistoryEntry>, Error> {
        let post = self.load_post(post_id).await?;
        self.ensure_visible(&actor, &post).await?;
        Ok(post.history())
    }
}
