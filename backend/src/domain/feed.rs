//! Read-access rules for posts.
//!
//! These functions are pure: services gather the relationship facts from
//! ports and pass them in.

use super::posts::{Post, Visibility};
use super::{Actor, Group, GroupId, UserId};

/// Which posts a feed query may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    /// Every post on the platform.
    Everything,
    /// Posts written by `authors` or posted in `groups`.
    Scoped {
        authors: Vec<UserId>,
        groups: Vec<GroupId>,
    },
}

impl FeedScope {
    /// Scope for a viewer: their friends and themselves, plus their groups.
    /// Administrators see everything.
    pub fn for_viewer(actor: &Actor, friends: Vec<UserId>, groups: Vec<GroupId>) -> Self {
        if actor.is_admin() {
            return Self::Everything;
        }
        let mut authors = friends;
        if !authors.contains(&actor.id()) {
            authors.push(actor.id());
        }
        Self::Scoped { authors, groups }
    }

    /// Whether `post` falls inside the scope.
    pub fn includes(&self, post: &Post) -> bool {
        match self {
            Self::Everything => true,
            Self::Scoped { authors, groups } => {
                authors.contains(&post.author())
                    || post.group().is_some_and(|group| groups.contains(&group))
            }
        }
    }
}

/// How much of a user's timeline a viewer may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineAccess {
    /// Every post.
    Full,
    /// Only posts with [`Visibility::Public`].
    PublicOnly,
}

impl TimelineAccess {
    /// Administrators, friends and the subject themself get full access.
    pub fn for_viewer(actor: &Actor, subject: UserId, is_friend: bool) -> Self {
        if actor.is_admin() || actor.id() == subject || is_friend {
            Self::Full
        } else {
            Self::PublicOnly
        }
    }

    /// Whether `post` is visible at this access level.
    pub fn admits(self, post: &Post) -> bool {
        match self {
            Self::Full => true,
            Self::PublicOnly => post.visibility() == Visibility::Public,
        }
    }
}

/// Whether `actor` may read a group's posts.
pub fn can_read_group(actor: &Actor, group: &Group) -> bool {
    actor.is_admin() || group.is_readable_by(actor.id())
}

/// Whether `actor` may read a single post.
///
/// `is_friend_of_author` and `group` are the facts the caller looked up:
/// friendship between viewer and author, and the post's group when it has
/// one.
pub fn can_view_post(
    actor: &Actor,
    post: &Post,
    is_friend_of_author: bool,
    group: Option<&Group>,
) -> bool {
    if actor.is_admin() || actor.id() == post.author() {
        return true;
    }
    if let Some(group) = group {
        return group.is_readable_by(actor.id());
    }
    match post.visibility() {
        Visibility::Public => true,
        Visibility::Friend => is_friend_of_author,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::posts::NewPost;
    use crate::domain::{GroupVisibility, PostId};
    use chrono::Utc;
    use rstest::rstest;

    fn post(author: UserId, visibility: Visibility, group: Option<GroupId>) -> Post {
        Post::create(
            PostId::random(),
            NewPost {
                author,
                content: "content".to_owned(),
                images: Vec::new(),
                visibility,
                group,
            },
            Utc::now(),
        )
        .expect("valid post")
    }

    #[rstest]
    fn admin_scope_is_everything() {
        let scope = FeedScope::for_viewer(&Actor::admin(UserId::random()), Vec::new(), Vec::new());
        assert_eq!(scope, FeedScope::Everything);
    }

    #[rstest]
    fn member_scope_covers_self_friends_and_groups() {
        let viewer = UserId::random();
        let friend = UserId::random();
        let stranger = UserId::random();
        let group = GroupId::random();
        let scope = FeedScope::for_viewer(&Actor::member(viewer), vec![friend], vec![group]);

        assert!(scope.includes(&post(viewer, Visibility::Friend, None)));
        assert!(scope.includes(&post(friend, Visibility::Friend, None)));
        assert!(scope.includes(&post(stranger, Visibility::Public, Some(group))));
        assert!(!scope.includes(&post(stranger, Visibility::Public, None)));
    }

    #[rstest]
    #[case(false, false, false, TimelineAccess::PublicOnly)]
    #[case(true, false, false, TimelineAccess::Full)]
    #[case(false, true, false, TimelineAccess::Full)]
    #[case(false, false, true, TimelineAccess::Full)]
    fn timeline_access_matrix(
        #[case] is_admin: bool,
        #[case] is_self: bool,
        #[case] is_friend: bool,
        #[case] expected: TimelineAccess,
    ) {
        let viewer = UserId::random();
        let subject = if is_self { viewer } else { UserId::random() };
        let actor = if is_admin {
            Actor::admin(viewer)
        } else {
            Actor::member(viewer)
        };
        assert_eq!(TimelineAccess::for_viewer(&actor, subject, is_friend), expected);
    }

    #[rstest]
    fn public_only_access_hides_friend_posts() {
        let author = UserId::random();
        assert!(TimelineAccess::PublicOnly.admits(&post(author, Visibility::Public, None)));
        assert!(!TimelineAccess::PublicOnly.admits(&post(author, Visibility::Friend, None)));
    }

    #[rstest]
    #[case(Visibility::Public, false, true)]
    #[case(Visibility::Friend, false, false)]
    #[case(Visibility::Friend, true, true)]
    fn personal_post_visibility(
        #[case] visibility: Visibility,
        #[case] is_friend: bool,
        #[case] expected: bool,
    ) {
        let viewer = Actor::member(UserId::random());
        let target = post(UserId::random(), visibility, None);
        assert_eq!(can_view_post(&viewer, &target, is_friend, None), expected);
    }

    #[rstest]
    fn private_group_posts_need_membership() {
        let viewer = UserId::random();
        let group = Group {
            id: GroupId::random(),
            name: "Quiet".to_owned(),
            visibility: GroupVisibility::Private,
            members: Vec::new(),
        };
        let target = post(UserId::random(), Visibility::Public, Some(group.id));

        assert!(!can_view_post(&Actor::member(viewer), &target, true, Some(&group)));
        assert!(can_view_post(&Actor::admin(viewer), &target, false, Some(&group)));
        assert!(!can_read_group(&Actor::member(viewer), &group));
    }
}
