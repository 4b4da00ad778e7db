//! Post engine: the service behind [`PostCommand`] and [`PostQuery`].
//!
//! The service loads one post document, checks the actor against it,
//! mutates it through the aggregate and writes it back whole. Notification
//! side effects run after the write and never fail the operation.
//!
//! [`PostCommand`]: crate::domain::ports::PostCommand
//! [`PostQuery`]: crate::domain::ports::PostQuery

mod command;
mod query;

use std::sync::Arc;

use mockable::Clock;
use tracing::warn;

use crate::domain::feed::can_view_post;
use crate::domain::notification_fanout::NotificationFanout;
use crate::domain::ports::{
    NotificationInbox, PostRepository, PostRepositoryError, PostView, RelationshipStore,
    RelationshipStoreError, UserDirectory, UserDirectoryError,
};
use crate::domain::posts::{Post, PostValidationError, Visibility};
use crate::domain::{Actor, Error, Group, GroupId, PostId, UserId};

pub(crate) const POST_NOT_FOUND: &str = "Post not found";
pub(crate) const COMMENT_NOT_FOUND: &str = "Comment not found";
pub(crate) const REACTION_NOT_FOUND: &str = "Reaction not found";
pub(crate) const GROUP_NOT_FOUND: &str = "Group not found";
pub(crate) const USER_NOT_FOUND: &str = "User not found";

/// Post, comment and reaction service implementing the driving ports.
pub struct PostService<P, R, U, N> {
    posts: Arc<P>,
    relationships: Arc<R>,
    users: Arc<U>,
    fanout: NotificationFanout<N>,
    clock: Arc<dyn Clock>,
}

impl<P, R, U, N> PostService<P, R, U, N> {
    /// Create a service over its collaborators.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use mockable::DefaultClock;
    /// use snapmate::domain::PostService;
    /// use snapmate::outbound::memory::{
    ///     MemoryNotificationInbox, MemoryPostRepository, MemoryRelationshipStore,
    ///     MemoryUserDirectory,
    /// };
    ///
    /// let _service = PostService::new(
    ///     Arc::new(MemoryPostRepository::default()),
    ///     Arc::new(MemoryRelationshipStore::default()),
    ///     Arc::new(MemoryUserDirectory::default()),
    ///     Arc::new(MemoryNotificationInbox::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(
        posts: Arc<P>,
        relationships: Arc<R>,
        users: Arc<U>,
        inbox: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            relationships,
            users,
            fanout: NotificationFanout::new(inbox, Arc::clone(&clock)),
            clock,
        }
    }
}

pub(crate) fn map_post_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
    }
}

pub(crate) fn map_relationship_error(error: RelationshipStoreError) -> Error {
    match error {
        RelationshipStoreError::Connection { message } => {
            Error::service_unavailable(format!("relationship store unavailable: {message}"))
        }
        RelationshipStoreError::Query { message } => {
            Error::internal(format!("relationship store error: {message}"))
        }
    }
}

pub(crate) fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

pub(crate) fn map_validation_error(error: PostValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

impl<P, R, U, N> PostService<P, R, U, N>
where
    P: PostRepository,
    R: RelationshipStore,
    U: UserDirectory,
    N: NotificationInbox,
{
    async fn load_post(&self, id: PostId) -> Result<Post, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND))
    }

    async fn load_group(&self, id: GroupId) -> Result<Group, Error> {
        self.relationships
            .find_group(id)
            .await
            .map_err(map_relationship_error)?
            .ok_or_else(|| Error::not_found(GROUP_NOT_FOUND))
    }

    /// Fail with `Forbidden` unless `actor` may read `post`.
    ///
    /// Relationship lookups are skipped when the answer does not depend on
    /// them.
    async fn ensure_visible(&self, actor: &Actor, post: &Post) -> Result<(), Error> {
        if actor.is_admin() || actor.id() == post.author() {
            return Ok(());
        }
        let group = match post.group() {
            Some(group_id) => Some(self.load_group(group_id).await?),
            None => None,
        };
        let needs_friendship = group.is_none() && post.visibility() == Visibility::Friend;
        let is_friend = if needs_friendship {
            self.relationships
                .is_friend(actor.id(), post.author())
                .await
                .map_err(map_relationship_error)?
        } else {
            false
        };
        if can_view_post(actor, post, is_friend, group.as_ref()) {
            Ok(())
        } else {
            Err(Error::forbidden("You are not authorized to view this post"))
        }
    }

    /// Display name for notification messages.
    ///
    /// Lookup failures are logged and yield `None`; callers then skip the
    /// notification.
    async fn display_name(&self, user: UserId) -> Option<String> {
        match self.users.find_profile(user).await {
            Ok(Some(profile)) => Some(profile.display_name),
            Ok(None) => {
                warn!(%user, "no profile for notification actor");
                None
            }
            Err(error) => {
                warn!(%user, %error, "profile lookup for notification failed");
                None
            }
        }
    }

    /// Attach participant profiles to each post and order comments newest
    /// first.
    async fn attach_profiles(&self, posts: Vec<Post>) -> Result<Vec<PostView>, Error> {
        let mut ids: Vec<UserId> = Vec::new();
        for post in &posts {
            for user in post.participants() {
                if !ids.contains(&user) {
                    ids.push(user);
                }
            }
        }
        let profiles = if ids.is_empty() {
            Vec::new()
        } else {
            self.users
                .find_profiles(&ids)
                .await
                .map_err(map_directory_error)?
        };

        Ok(posts
            .into_iter()
            .map(|mut post| {
                post.sort_comments_newest_first();
                let participants = post.participants();
                let profiles = profiles
                    .iter()
                    .filter(|profile| participants.contains(&profile.id))
                    .cloned()
                    .collect();
                PostView { post, profiles }
            })
            .collect())
    }
}

#[cfg(test)]
mod query_tests;
#[cfg(test)]
mod test_fixtures;
