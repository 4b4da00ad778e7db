//! Response bodies shared by the post, comment and notification handlers.
//!
//! Domain aggregates never derive `ToSchema`; these DTOs shape them for
//! clients. Images become `data:` URIs and user ids are joined with the
//! profiles resolved by the query service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::PostView;
use crate::domain::posts::{Comment, HistoryEntry, Image, Reaction};
use crate::domain::{Notification, UserId, UserProfile};

/// `{ "message": "..." }` envelope returned by mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Post edited successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `201 Created` for a new post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostCreatedResponse {
    #[schema(example = "Post created successfully")]
    pub message: String,
    pub id: Uuid,
}

/// Body of `201 Created` for a new comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommentCreatedResponse {
    #[schema(example = "Comment added successfully")]
    pub message: String,
    pub comment: CommentResponse,
}

/// Public identity of a user referenced by a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
}

impl From<&UserProfile> for UserSummary {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: *profile.id.as_uuid(),
            username: profile.username.clone(),
            display_name: profile.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    /// Absent when the author's profile no longer resolves.
    pub author: Option<UserSummary>,
    #[serde(rename = "type")]
    #[schema(example = "Love")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author: Option<UserSummary>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Whether the comment has been reworded since it was posted.
    pub edited: bool,
    pub reactions: Vec<ReactionResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    /// Author profile; absent when it no longer resolves.
    pub user: Option<UserSummary>,
    pub group_id: Option<Uuid>,
    pub content: String,
    /// Images as `data:` URIs.
    pub images: Vec<String>,
    #[schema(example = "Public")]
    pub visibility: String,
    pub reactions: Vec<ReactionResponse>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
}

/// Post state that was live before one edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    pub content: String,
    pub images: Vec<String>,
    pub visibility: String,
    /// When the edit that replaced this state happened.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    #[schema(example = "Comment")]
    pub kind: String,
    #[schema(example = "Ada commented on your post.")]
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

fn data_uris(images: &[Image]) -> Vec<String> {
    images.iter().map(Image::data_uri).collect()
}

/// Resolves user ids against the profiles attached to a view.
struct Profiles<'a>(&'a [UserProfile]);

impl Profiles<'_> {
    fn summary(&self, id: UserId) -> Option<UserSummary> {
        self.0
            .iter()
            .find(|profile| profile.id == id)
            .map(UserSummary::from)
    }

    fn reaction(&self, reaction: &Reaction) -> ReactionResponse {
        ReactionResponse {
            id: *reaction.id().as_uuid(),
            author_id: *reaction.author().as_uuid(),
            author: self.summary(reaction.author()),
            kind: reaction.kind().as_str().to_owned(),
        }
    }

    fn comment(&self, comment: &Comment) -> CommentResponse {
        CommentResponse {
            id: *comment.id().as_uuid(),
            author_id: *comment.author().as_uuid(),
            author: self.summary(comment.author()),
            content: comment.content().to_owned(),
            created_at: comment.created_at(),
            edited: !comment.edit_history().is_empty(),
            reactions: comment
                .reactions()
                .iter()
                .map(|reaction| self.reaction(reaction))
                .collect(),
        }
    }
}

impl From<&PostView> for PostResponse {
    fn from(view: &PostView) -> Self {
        let profiles = Profiles(&view.profiles);
        let post = &view.post;
        Self {
            id: *post.id().as_uuid(),
            author_id: *post.author().as_uuid(),
            user: profiles.summary(post.author()),
            group_id: post.group().map(Uuid::from),
            content: post.content().to_owned(),
            images: data_uris(post.images()),
            visibility: post.visibility().as_str().to_owned(),
            reactions: post
                .reactions()
                .iter()
                .map(|reaction| profiles.reaction(reaction))
                .collect(),
            comments: post
                .comments()
                .iter()
                .map(|comment| profiles.comment(comment))
                .collect(),
            created_at: post.created_at(),
        }
    }
}

impl CommentResponse {
    /// Shape a single comment, resolving its author against `profiles`.
    pub fn with_profiles(comment: &Comment, profiles: &[UserProfile]) -> Self {
        Profiles(profiles).comment(comment)
    }
}

impl From<&HistoryEntry> for HistoryEntryResponse {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            content: entry.content.clone(),
            images: data_uris(&entry.images),
            visibility: entry.visibility.as_str().to_owned(),
            created_at: entry.taken_at,
        }
    }
}

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: *notification.id.as_uuid(),
            kind: notification.kind.as_str().to_owned(),
            message: notification.message.clone(),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}
