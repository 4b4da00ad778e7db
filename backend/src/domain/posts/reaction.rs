//! Reactions attached to posts and comments.
//!
//! A parent holds at most one reaction per author. [`Reactions`] enforces
//! that rule for both posts and comments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PostValidationError;
use crate::domain::{ReactionId, UserId};

/// Kind of reaction. Parsing is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionKind {
    /// Thumbs up.
    Like,
    /// Heart.
    Love,
    /// Laughing face.
    Haha,
    /// Angry face.
    Angry,
}

impl ReactionKind {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "Like",
            Self::Love => "Love",
            Self::Haha => "Haha",
            Self::Angry => "Angry",
        }
    }
}

impl FromStr for ReactionKind {
    type Err = PostValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Like" => Ok(Self::Like),
            "Love" => Ok(Self::Love),
            "Haha" => Ok(Self::Haha),
            "Angry" => Ok(Self::Angry),
            other => Err(PostValidationError::InvalidReactionType {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One author's reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    id: ReactionId,
    author: UserId,
    #[serde(rename = "type")]
    kind: ReactionKind,
}

impl Reaction {
    /// Reaction identifier.
    pub const fn id(&self) -> ReactionId {
        self.id
    }

    /// Who reacted.
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Current reaction kind.
    pub const fn kind(&self) -> ReactionKind {
        self.kind
    }
}

/// What [`Reactions::upsert`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactOutcome {
    /// The author had no reaction; a new one was appended.
    Added(ReactionId),
    /// The author's existing reaction was overwritten in place.
    Replaced {
        /// Kind before the overwrite.
        previous: ReactionKind,
    },
}

impl ReactOutcome {
    /// Whether a new reaction was created.
    pub const fn is_new(self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Ordered reactions on a post or comment, unique per author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reactions(Vec<Reaction>);

impl Reactions {
    /// Add a reaction for `author`, or overwrite the kind of their existing one.
    ///
    /// # Examples
    /// ```
    /// use snapmate::domain::UserId;
    /// use snapmate::domain::posts::{ReactionKind, Reactions};
    ///
    /// let mut reactions = Reactions::default();
    /// let author = UserId::random();
    /// assert!(reactions.upsert(author, ReactionKind::Like).is_new());
    /// assert!(!reactions.upsert(author, ReactionKind::Love).is_new());
    /// assert_eq!(reactions.len(), 1);
    /// ```
    pub fn upsert(&mut self, author: UserId, kind: ReactionKind) -> ReactOutcome {
        if let Some(existing) = self.0.iter_mut().find(|r| r.author == author) {
            let previous = existing.kind;
            existing.kind = kind;
            return ReactOutcome::Replaced { previous };
        }
        let id = ReactionId::random();
        self.0.push(Reaction { id, author, kind });
        ReactOutcome::Added(id)
    }

    /// Overwrite the kind of `author`'s reaction. Returns `false` when the
    /// author has not reacted.
    pub fn change(&mut self, author: UserId, kind: ReactionKind) -> bool {
        match self.0.iter_mut().find(|r| r.author == author) {
            Some(existing) => {
                existing.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Remove `author`'s reaction. Returns `false` when there was none.
    pub fn remove(&mut self, author: UserId) -> bool {
        let before = self.0.len();
        self.0.retain(|r| r.author != author);
        self.0.len() != before
    }

    /// The reaction left by `author`, if any.
    pub fn by(&self, author: UserId) -> Option<&Reaction> {
        self.0.iter().find(|r| r.author == author)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Reaction> {
        self.0.iter()
    }

    /// Number of reactions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no one has reacted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Like", ReactionKind::Like)]
    #[case("Love", ReactionKind::Love)]
    #[case("Haha", ReactionKind::Haha)]
    #[case("Angry", ReactionKind::Angry)]
    fn parses_known_kinds(#[case] raw: &str, #[case] expected: ReactionKind) {
        assert_eq!(raw.parse::<ReactionKind>(), Ok(expected));
    }

    #[rstest]
    #[case("like")]
    #[case("LOVE")]
    #[case("Wow")]
    #[case("")]
    fn rejects_unknown_or_miscased_kinds(#[case] raw: &str) {
        assert!(raw.parse::<ReactionKind>().is_err());
    }

    #[rstest]
    fn repeated_upserts_keep_one_reaction_with_latest_kind() {
        let mut reactions = Reactions::default();
        let author = UserId::random();
        for kind in [
            ReactionKind::Like,
            ReactionKind::Angry,
            ReactionKind::Haha,
            ReactionKind::Love,
        ] {
            reactions.upsert(author, kind);
        }
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions.by(author).map(Reaction::kind), Some(ReactionKind::Love));
    }

    #[rstest]
    fn upsert_replacement_keeps_reaction_id() {
        let mut reactions = Reactions::default();
        let author = UserId::random();
        let ReactOutcome::Added(id) = reactions.upsert(author, ReactionKind::Like) else {
            panic!("first reaction must be added");
        };
        let outcome = reactions.upsert(author, ReactionKind::Haha);
        assert_eq!(
            outcome,
            ReactOutcome::Replaced {
                previous: ReactionKind::Like
            }
        );
        assert_eq!(reactions.by(author).map(Reaction::id), Some(id));
    }

    #[rstest]
    fn change_requires_existing_reaction() {
        let mut reactions = Reactions::default();
        let author = UserId::random();
        assert!(!reactions.change(author, ReactionKind::Love));
        reactions.upsert(author, ReactionKind::Like);
        assert!(reactions.change(author, ReactionKind::Love));
        assert_eq!(reactions.by(author).map(Reaction::kind), Some(ReactionKind::Love));
    }

    #[rstest]
    fn remove_only_touches_the_author() {
        let mut reactions = Reactions::default();
        let (alice, bob) = (UserId::random(), UserId::random());
        reactions.upsert(alice, ReactionKind::Like);
        reactions.upsert(bob, ReactionKind::Angry);

        assert!(reactions.remove(alice));
        assert!(!reactions.remove(alice));
        assert_eq!(reactions.len(), 1);
        assert!(reactions.by(bob).is_some());
    }
}
