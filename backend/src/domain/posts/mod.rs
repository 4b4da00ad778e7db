//! The post aggregate.
//!
//! A [`Post`] is one document: its comments, reactions and edit history are
//! embedded and always loaded, mutated and persisted together. All
//! invariants that can be checked without collaborators are enforced here;
//! authorisation and notification side effects live in the services.
//!
//! ## Invariants
//! - A post has non-empty content or at least one image.
//! - A group post is always [`Visibility::Public`].
//! - At most one reaction per author on the post and on each comment.
//! - Edit history is append-only.

mod comment;
mod history;
mod image;
mod reaction;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommentId, GroupId, PostId, UserId};

pub use self::comment::{Comment, CommentRevision};
pub use self::history::{HistoryEntry, PostSnapshot};
pub use self::image::{Image, MAX_IMAGE_BYTES};
pub use self::reaction::{ReactOutcome, Reaction, ReactionKind, Reactions};

/// Audience of a personal post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Any signed-in user.
    Public,
    /// The author and their friends.
    Friend,
}

impl Visibility {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Friend => "Friend",
        }
    }
}

impl FromStr for Visibility {
    type Err = PostValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Public" => Ok(Self::Public),
            "Friend" => Ok(Self::Friend),
            other => Err(PostValidationError::InvalidVisibility {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures raised by the aggregate and its parts.
///
/// Messages are shown to end users as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    #[error("Content is required")]
    ContentRequired,
    #[error("Group posts must be public")]
    GroupPostMustBePublic,
    #[error("Invalid file type, only images are allowed!")]
    UnsupportedImageType { content_type: String },
    #[error("Image is {size} bytes, the limit is {max} bytes")]
    ImageTooLarge { size: usize, max: usize },
    #[error("Invalid reaction type")]
    InvalidReactionType { value: String },
    #[error("Invalid visibility")]
    InvalidVisibility { value: String },
}

/// Input for [`Post::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author: UserId,
    pub content: String,
    pub images: Vec<Image>,
    pub visibility: Visibility,
    pub group: Option<GroupId>,
}

/// Fields an author wants to change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub content: Option<String>,
    pub images: Option<Vec<Image>>,
    pub visibility: Option<Visibility>,
}

impl PostPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.images.is_none() && self.visibility.is_none()
    }
}

/// A post with its embedded comments, reactions and edit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    id: PostId,
    author: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<GroupId>,
    content: String,
    #[serde(default)]
    images: Vec<Image>,
    visibility: Visibility,
    created_at: DateTime<Utc>,
    #[serde(default)]
    reactions: Reactions,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(default)]
    edit_history: Vec<PostSnapshot>,
}

fn has_body(content: &str, images: &[Image]) -> bool {
    !content.is_empty() || !images.is_empty()
}

impl Post {
    /// Validate and build a new post.
    ///
    /// Group posts are forced to [`Visibility::Public`] whatever the caller
    /// asked for.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use snapmate::domain::{GroupId, PostId, UserId};
    /// use snapmate::domain::posts::{NewPost, Post, Visibility};
    ///
    /// let post = Post::create(
    ///     PostId::random(),
    ///     NewPost {
    ///         author: UserId::random(),
    ///         content: "hello group".into(),
    ///         images: Vec::new(),
    ///         visibility: Visibility::Friend,
    ///         group: Some(GroupId::random()),
    ///     },
    ///     Utc::now(),
    /// )
    /// .expect("valid post");
    /// assert_eq!(post.visibility(), Visibility::Public);
    /// ```
    pub fn create(
        id: PostId,
        new_post: NewPost,
        now: DateTime<Utc>,
    ) -> Result<Self, PostValidationError> {
        let NewPost {
            author,
            content,
            images,
            visibility,
            group,
        } = new_post;
        if !has_body(&content, &images) {
            return Err(PostValidationError::ContentRequired);
        }
        let visibility = if group.is_some() {
            Visibility::Public
        } else {
            visibility
        };
        Ok(Self {
            id,
            author,
            group,
            content,
            images,
            visibility,
            created_at: now,
            reactions: Reactions::default(),
            comments: Vec::new(),
            edit_history: Vec::new(),
        })
    }

    /// Apply an author edit.
    ///
    /// Records the pre-edit values of exactly the fields present in `patch`
    /// and then overwrites them. Returns `false` for an empty patch, which
    /// records nothing. A rejected patch leaves the post untouched.
    pub fn apply_edit(
        &mut self,
        patch: PostPatch,
        now: DateTime<Utc>,
    ) -> Result<bool, PostValidationError> {
        if patch.is_empty() {
            return Ok(false);
        }
        if self.group.is_some() && patch.visibility == Some(Visibility::Friend) {
            return Err(PostValidationError::GroupPostMustBePublic);
        }
        let next_content = patch.content.as_deref().unwrap_or(&self.content);
        let next_images = patch.images.as_deref().unwrap_or(&self.images);
        if !has_body(next_content, next_images) {
            return Err(PostValidationError::ContentRequired);
        }

        let PostPatch {
            content,
            images,
            visibility,
        } = patch;
        let snapshot = PostSnapshot {
            content: content.map(|next| std::mem::replace(&mut self.content, next)),
            images: images.map(|next| std::mem::replace(&mut self.images, next)),
            visibility: visibility.map(|next| std::mem::replace(&mut self.visibility, next)),
            taken_at: now,
        };
        self.edit_history.push(snapshot);
        Ok(true)
    }

    /// Resolved edit history, first edit first.
    ///
    /// Each entry is the complete state that was live just before the
    /// corresponding edit.
    pub fn history(&self) -> Vec<HistoryEntry> {
        let live = history::LiveState {
            content: &self.content,
            images: &self.images,
            visibility: self.visibility,
        };
        history::resolve(&live, &self.edit_history)
    }

    /// React to the post, or overwrite the actor's existing reaction.
    pub fn react(&mut self, actor: UserId, kind: ReactionKind) -> ReactOutcome {
        self.reactions.upsert(actor, kind)
    }

    /// Change the actor's existing reaction. `false` when there is none.
    pub fn change_reaction(&mut self, actor: UserId, kind: ReactionKind) -> bool {
        self.reactions.change(actor, kind)
    }

    /// Remove the actor's reaction. `false` when there was none.
    pub fn unreact(&mut self, actor: UserId) -> bool {
        self.reactions.remove(actor)
    }

    /// Append a comment.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Find a comment by id.
    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id() == id)
    }

    /// Find a comment by id for mutation.
    pub fn comment_mut(&mut self, id: CommentId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id() == id)
    }

    /// Remove a comment together with its reactions.
    pub fn remove_comment(&mut self, id: CommentId) -> Option<Comment> {
        let index = self.comments.iter().position(|c| c.id() == id)?;
        Some(self.comments.remove(index))
    }

    /// Everyone who authored the post, a comment or a reaction, without
    /// duplicates, author first.
    pub fn participants(&self) -> Vec<UserId> {
        let mut users = vec![self.author];
        let reactors = self.reactions.iter().map(Reaction::author);
        let commenters = self.comments.iter().flat_map(|comment| {
            std::iter::once(comment.author()).chain(comment.reactions().iter().map(Reaction::author))
        });
        for user in reactors.chain(commenters) {
            if !users.contains(&user) {
                users.push(user);
            }
        }
        users
    }

    /// Order comments newest first, as feeds present them.
    pub fn sort_comments_newest_first(&mut self) {
        self.comments
            .sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    }

    pub const fn id(&self) -> PostId {
        self.id
    }

    pub const fn author(&self) -> UserId {
        self.author
    }

    pub const fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn reactions(&self) -> &Reactions {
        &self.reactions
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Raw sparse snapshots, oldest first.
    pub fn edit_history(&self) -> &[PostSnapshot] {
        &self.edit_history
    }
}
