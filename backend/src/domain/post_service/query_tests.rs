//! Unit coverage for feeds, timelines and single-post reads.

use chrono::Duration;
use pagination::PageRequest;
use rstest::rstest;

use super::test_fixtures::{Collaborators, group, group_post, personal_post, profile};
use crate::domain::feed::{FeedScope, TimelineAccess};
use crate::domain::ports::{PostQuery, PostView};
use crate::domain::posts::{Comment, PostPatch, Visibility};
use crate::domain::{Actor, CommentId, ErrorCode, GroupVisibility, UserId};

#[rstest]
#[tokio::test]
async fn admin_feed_is_unscoped() {
    let post = personal_post(UserId::random(), Visibility::Friend);
    let mut deps = Collaborators::default();
    deps.relationships.expect_friends_of().never();
    deps.posts
        .expect_list_feed()
        .withf(|scope, _| *scope == FeedScope::Everything)
        .return_once(move |_, _| Ok(vec![post]));
    deps.known_profiles(Vec::new());

    let views = deps
        .into_service()
        .feed(Actor::admin(UserId::random()), PageRequest::default())
        .await
        .expect("feed");
    assert_eq!(views.len(), 1);
}

#[rstest]
#[tokio::test]
async fn member_feed_sorts_comments_newest_first() {
    let viewer = UserId::random();
    let friend = UserId::random();
    let mut post = personal_post(friend, Visibility::Friend);
    for offset in [1, 3, 2] {
        post.add_comment(
            Comment::new(
                CommentId::random(),
                viewer,
                "c",
                post.created_at() + Duration::minutes(offset),
            )
            .expect("comment"),
        );
    }
    let mut deps = Collaborators::default();
    deps.relationships
        .expect_friends_of()
        .returning(move |_| Ok(vec![friend]));
    deps.relationships
        .expect_groups_of()
        .returning(|_| Ok(Vec::new()));
    deps.posts
        .expect_list_feed()
        .withf(move |scope, page| {
            matches!(scope, FeedScope::Scoped { authors, .. } if authors.contains(&viewer) && authors.contains(&friend))
                && page.limit() == 10
        })
        .return_once(move |_, _| Ok(vec![post]));
    deps.known_profiles(vec![profile(friend, "Fay"), profile(viewer, "Vic")]);

    let views = deps
        .into_service()
        .feed(Actor::member(viewer), PageRequest::default())
        .await
        .expect("feed");

    assert_eq!(views.len(), 1);
    let view = views.first().expect("one view");
    assert_eq!(view.author().map(|p| p.display_name.as_str()), Some("Fay"));
    assert!(view.profile(viewer).is_some());
    let times: Vec<_> = view.post.comments().iter().map(Comment::created_at).collect();
    let mut sorted = times.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(times, sorted);
}

#[rstest]
#[case::stranger(false, TimelineAccess::PublicOnly)]
#[case::friend(true, TimelineAccess::Full)]
#[tokio::test]
async fn user_timeline_access_follows_friendship(
    #[case] is_friend: bool,
    #[case] expected: TimelineAccess,
) {
    let subject = UserId::random();
    let mut deps = Collaborators::default();
    deps.known_profiles(vec![profile(subject, "Sam")]);
    deps.relationships
        .expect_is_friend()
        .returning(move |_, _| Ok(is_friend));
    deps.posts
        .expect_list_by_author()
        .withf(move |author, access| *author == subject && *access == expected)
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    deps.into_service()
        .user_posts(Actor::member(UserId::random()), subject)
        .await
        .expect("timeline");
}

#[rstest]
#[tokio::test]
async fn unknown_subject_is_not_found() {
    let mut deps = Collaborators::default();
    deps.known_profiles(Vec::new());

    let err = deps
        .into_service()
        .user_posts(Actor::member(UserId::random()), UserId::random())
        .await
        .expect_err("unknown user");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found");
}

#[rstest]
#[case::member_of_private(GroupVisibility::Private, true, false, true)]
#[case::stranger_to_private(GroupVisibility::Private, false, false, false)]
#[case::admin_to_private(GroupVisibility::Private, false, true, true)]
#[case::stranger_to_public(GroupVisibility::Public, false, false, true)]
#[tokio::test]
async fn group_listing_access(
    #[case] visibility: GroupVisibility,
    #[case] is_member: bool,
    #[case] is_admin: bool,
    #[case] permitted: bool,
) {
    let viewer = UserId::random();
    let members = if is_member { vec![viewer] } else { Vec::new() };
    let target = group(visibility, members);
    let group_id = target.id;
    let mut deps = Collaborators::default();
    deps.relationships
        .expect_find_group()
        .returning(move |_| Ok(Some(target.clone())));
    deps.posts
        .expect_list_by_group()
        .times(usize::from(permitted))
        .returning(|_| Ok(Vec::new()));

    let actor = if is_admin {
        Actor::admin(viewer)
    } else {
        Actor::member(viewer)
    };
    let result = deps.into_service().group_posts(actor, group_id).await;
    match result {
        Ok(views) => {
            assert!(permitted);
            assert!(views.is_empty());
        }
        Err(err) => {
            assert!(!permitted);
            assert_eq!(err.code(), ErrorCode::Forbidden);
            assert_eq!(
                err.message(),
                "You are not authorized to view posts in this group"
            );
        }
    }
}

#[rstest]
#[tokio::test]
async fn missing_post_is_not_found() {
    let mut deps = Collaborators::default();
    deps.posts.expect_find_by_id().returning(|_| Ok(None));

    let err = deps
        .into_service()
        .post(Actor::member(UserId::random()), crate::domain::PostId::random())
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Post not found");
}

#[rstest]
#[tokio::test]
async fn friend_only_post_is_forbidden_to_strangers() {
    let post = personal_post(UserId::random(), Visibility::Friend);
    let mut deps = Collaborators::default();
    deps.serve_post(&post);
    deps.relationships
        .expect_is_friend()
        .returning(|_, _| Ok(false));

    let err = deps
        .into_service()
        .post(Actor::member(UserId::random()), post.id())
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn group_post_is_readable_in_public_group() {
    let public = group(GroupVisibility::Public, Vec::new());
    let author = UserId::random();
    let post = group_post(author, public.id);
    let mut deps = Collaborators::default();
    deps.serve_post(&post);
    deps.relationships
        .expect_find_group()
        .returning(move |_| Ok(Some(public.clone())));
    deps.known_profiles(vec![profile(author, "Gus")]);

    let view: PostView = deps
        .into_service()
        .post(Actor::member(UserId::random()), post.id())
        .await
        .expect("visible");
    assert_eq!(view.post.id(), post.id());
}

#[rstest]
#[tokio::test]
async fn history_round_trip_after_two_edits() {
    let author = UserId::random();
    let mut post = personal_post(author, Visibility::Public);
    let e1 = post.created_at() + Duration::minutes(1);
    let e2 = post.created_at() + Duration::minutes(2);
    post.apply_edit(
        PostPatch {
            content: Some("edited".to_owned()),
            ..PostPatch::default()
        },
        e1,
    )
    .expect("E1");
    post.apply_edit(
        PostPatch {
            visibility: Some(Visibility::Friend),
            ..PostPatch::default()
        },
        e2,
    )
    .expect("E2");
    let mut deps = Collaborators::default();
    deps.serve_post(&post);

    let history = deps
        .into_service()
        .history(Actor::member(author), post.id())
        .await
        .expect("history");

    assert_eq!(history.len(), 2);
    let first = history.first().expect("entry before E1");
    assert_eq!(first.content, "hello");
    assert_eq!(first.visibility, Visibility::Public);
    assert_eq!(first.taken_at, e1);
    let second = history.get(1).expect("entry before E2");
    assert_eq!(second.content, "edited");
    assert_eq!(second.visibility, Visibility::Public);
    assert_eq!(post.content(), "edited");
    assert_eq!(post.visibility(), Visibility::Friend);
}
