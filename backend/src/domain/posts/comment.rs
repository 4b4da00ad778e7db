//! Comments embedded in a post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PostValidationError, Reactions};
use crate::domain::{CommentId, UserId};

/// Previous wording of a comment, captured before an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRevision {
    /// Content before the edit.
    pub content: String,
    /// When the edit happened.
    pub taken_at: DateTime<Utc>,
}

/// A comment with its own reactions and edit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: CommentId,
    author: UserId,
    content: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    reactions: Reactions,
    #[serde(default)]
    edit_history: Vec<CommentRevision>,
}

impl Comment {
    /// Start a comment with no reactions and no history.
    pub fn new(
        id: CommentId,
        author: UserId,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, PostValidationError> {
        Ok(Self {
            id,
            author,
            content: require_text(content)?,
            created_at,
            reactions: Reactions::default(),
            edit_history: Vec::new(),
        })
    }

    /// Replace the content, pushing the previous wording into the history.
    pub fn edit(&mut self, content: &str, now: DateTime<Utc>) -> Result<(), PostValidationError> {
        let next = require_text(content)?;
        let previous = std::mem::replace(&mut self.content, next);
        self.edit_history.push(CommentRevision {
            content: previous,
            taken_at: now,
        });
        Ok(())
    }

    /// Comment identifier.
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Who wrote the comment.
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Current wording.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Creation time.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reactions on this comment.
    pub const fn reactions(&self) -> &Reactions {
        &self.reactions
    }

    /// Mutable access for reaction changes.
    pub fn reactions_mut(&mut self) -> &mut Reactions {
        &mut self.reactions
    }

    /// Earlier wordings, oldest first.
    pub fn edit_history(&self) -> &[CommentRevision] {
        &self.edit_history
    }
}

fn require_text(content: &str) -> Result<String, PostValidationError> {
    if content.is_empty() {
        return Err(PostValidationError::ContentRequired);
    }
    Ok(content.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn empty_comments_are_rejected() {
        let err = Comment::new(CommentId::random(), UserId::random(), "", at(0))
            .expect_err("empty comment");
        assert_eq!(err, PostValidationError::ContentRequired);
    }

    #[test]
    fn whitespace_comments_are_kept_verbatim() {
        let comment = Comment::new(CommentId::random(), UserId::random(), "  \n", at(0))
            .expect("whitespace is content");
        assert_eq!(comment.content(), "  \n");
    }

    #[test]
    fn edits_keep_previous_wording() {
        let mut comment =
            Comment::new(CommentId::random(), UserId::random(), "first", at(0)).expect("valid");
        comment.edit("second", at(1)).expect("valid edit");
        comment.edit("third", at(2)).expect("valid edit");

        assert_eq!(comment.content(), "third");
        let history: Vec<_> = comment
            .edit_history()
            .iter()
            .map(|rev| (rev.content.as_str(), rev.taken_at))
            .collect();
        assert_eq!(history, vec![("first", at(1)), ("second", at(2))]);
    }

    #[test]
    fn rejected_edit_leaves_comment_untouched() {
        let mut comment =
            Comment::new(CommentId::random(), UserId::random(), "keep", at(0)).expect("valid");
        assert!(comment.edit("", at(1)).is_err());
        assert_eq!(comment.content(), "keep");
        assert!(comment.edit_history().is_empty());
    }
}
