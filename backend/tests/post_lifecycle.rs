//! End-to-end behaviour of posts, comments, reactions and notifications
//! through the REST surface, backed by the in-memory adapters.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use snapmate::domain::{Group, GroupId, GroupVisibility, UserId};
use support::{World, create_post, json_body, login, text_form};

struct Cast {
    world: World,
    alice: UserId,
    carol: UserId,
}

#[fixture]
fn cast() -> Cast {
    let world = World::default();
    let alice = world.member("alice", "Alice");
    let bob = world.member("bob", "Bob");
    let carol = world.member("carol", "Carol");
    world.relationships.befriend(alice, bob);
    Cast { world, alice, carol }
}

fn messages(notifications: &Value) -> Vec<&str> {
    notifications
        .as_array()
        .expect("notification list")
        .iter()
        .filter_map(|n| n["message"].as_str())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn friend_post_reaches_friends_only(cast: Cast) {
    let app = test::init_service(cast.world.app()).await;
    let alice = login(&app, "alice").await;
    let bob = login(&app, "bob").await;
    let carol = login(&app, "carol").await;

    let id = create_post(&app, &alice, &[("content", "Sunset"), ("visibility", "Friend")]).await;

    let bob_feed = json_body(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/posts").cookie(bob.clone()).to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(bob_feed[0]["id"], id.as_str());
    assert_eq!(bob_feed[0]["user"]["displayName"], "Alice");
    assert_eq!(bob_feed[0]["visibility"], "Friend");

    let carol_feed = json_body(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/posts").cookie(carol.clone()).to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(carol_feed, json!([]));

    let direct = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/posts/{id}"))
            .cookie(carol.clone())
            .to_request(),
    )
    .await;
    assert_eq!(direct.status(), StatusCode::FORBIDDEN);

    let inbox = json_body(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/notifications").cookie(bob).to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(messages(&inbox), vec!["Alice has created a new post."]);
    assert_eq!(inbox[0]["type"], "Post");
    assert_eq!(inbox[0]["isRead"], false);
}

#[rstest]
#[actix_web::test]
async fn interactions_notify_the_owner_once(cast: Cast) {
    let app = test::init_service(cast.world.app()).await;
    let alice = login(&app, "alice").await;
    let bob = login(&app, "bob").await;
    let id = create_post(&app, &alice, &[("content", "Lake day")]).await;

    let comment = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/posts/{id}/comment"))
            .cookie(bob.clone())
            .set_json(json!({"content": "Looks great"}))
            .to_request(),
    )
    .await;
    assert_eq!(comment.status(), StatusCode::CREATED);
    let comment_id = json_body(comment).await["comment"]["id"]
        .as_str()
        .expect("comment id")
        .to_owned();

    for (method, kind) in [("POST", "Love"), ("PATCH", "Haha")] {
        let request = match method {
            "POST" => test::TestRequest::post(),
            _ => test::TestRequest::patch(),
        };
        let response = test::call_service(
            &app,
            request
                .uri(&format!("/api/v1/posts/{id}/reaction"))
                .cookie(bob.clone())
                .set_json(json!({"type": kind}))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success(), "{method} reaction failed");
    }

    // Alice reacting to Bob's comment notifies Bob, not Alice.
    let on_comment = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/posts/{id}/comment/{comment_id}/reaction"))
            .cookie(alice.clone())
            .set_json(json!({"type": "Like"}))
            .to_request(),
    )
    .await;
    assert_eq!(on_comment.status(), StatusCode::CREATED);

    let post = json_body(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/posts/{id}"))
                .cookie(alice.clone())
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(post["reactions"].as_array().map(Vec::len), Some(1));
    assert_eq!(post["reactions"][0]["type"], "Haha");
    assert_eq!(post["comments"][0]["reactions"][0]["type"], "Like");

    let alice_inbox = json_body(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/notifications")
                .cookie(alice.clone())
                .to_request(),
        )
        .await,
    )
    .await;
    let alice_messages = messages(&alice_inbox);
    assert_eq!(alice_messages.len(), 2);
    assert!(alice_messages.contains(&"Bob commented on your post."));
    assert!(alice_messages.contains(&"Bob reacted to your post."));

    let bob_inbox = json_body(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/notifications").cookie(bob).to_request(),
        )
        .await,
    )
    .await;
    let bob_messages = messages(&bob_inbox);
    assert_eq!(bob_messages.len(), 2);
    assert!(bob_messages.contains(&"Alice has created a new post."));
    assert!(bob_messages.contains(&"Alice reacted to your comment."));

    let first = alice_inbox[0]["id"].as_str().expect("notification id");
    let marked = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/notifications/{first}"))
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    assert_eq!(marked.status(), StatusCode::OK);
    let reread = json_body(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/notifications")
                .cookie(alice)
                .to_request(),
        )
        .await,
    )
    .await;
    let flags: Vec<_> = reread
        .as_array()
        .expect("list")
        .iter()
        .filter(|n| n["id"] == first)
        .map(|n| n["isRead"].clone())
        .collect();
    assert_eq!(flags, vec![json!(true)]);
}

#[rstest]
#[actix_web::test]
async fn edits_are_recorded_in_history(cast: Cast) {
    let app = test::init_service(cast.world.app()).await;
    let alice = login(&app, "alice").await;
    let id = create_post(&app, &alice, &[("content", "First draft")]).await;

    let (content_type, body) = text_form(&[("content", "Second draft"), ("visibility", "Friend")]);
    let edited = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/posts/{id}"))
            .cookie(alice.clone())
            .insert_header(("content-type", content_type))
            .set_payload(body)
            .to_request(),
    )
    .await;
    assert_eq!(edited.status(), StatusCode::OK);

    let history = json_body(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/posts/{id}/history"))
                .cookie(alice.clone())
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(history.as_array().map(Vec::len), Some(1));
    assert_eq!(history[0]["content"], "First draft");
    assert_eq!(history[0]["visibility"], "Public");

    let current = json_body(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/posts/{id}"))
                .cookie(alice)
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(current["content"], "Second draft");
    assert_eq!(current["visibility"], "Friend");
}

#[rstest]
#[actix_web::test]
async fn deleted_commented_post_reads_as_not_found(cast: Cast) {
    let app = test::init_service(cast.world.app()).await;
    let alice = login(&app, "alice").await;
    let bob = login(&app, "bob").await;
    let id = create_post(&app, &alice, &[("content", "Gone soon")]).await;
    let comment = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/posts/{id}/comment"))
            .cookie(bob.clone())
            .set_json(json!({"content": "Catch it while you can"}))
            .to_request(),
    )
    .await;
    assert_eq!(comment.status(), StatusCode::CREATED);

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/posts/{id}"))
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert!(cast.world.posts.is_empty());

    for cookie in [alice, bob] {
        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/posts/{id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["message"], "Post not found");
    }
}

#[rstest]
#[case::comment_author("bob", StatusCode::OK)]
#[case::post_author("alice", StatusCode::OK)]
#[case::bystander("dave", StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn comment_deletion_rights(
    cast: Cast,
    #[case] deleter: &str,
    #[case] expected: StatusCode,
) {
    let dave = cast.world.member("dave", "Dave");
    cast.world.relationships.befriend(cast.alice, dave);
    let app = test::init_service(cast.world.app()).await;
    let alice = login(&app, "alice").await;
    let bob = login(&app, "bob").await;
    let id = create_post(&app, &alice, &[("content", "Picnic")]).await;
    let comment = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/posts/{id}/comment"))
            .cookie(bob)
            .set_json(json!({"content": "Count me in"}))
            .to_request(),
    )
    .await;
    let comment_id = json_body(comment).await["comment"]["id"]
        .as_str()
        .expect("comment id")
        .to_owned();

    let cookie = login(&app, deleter).await;
    let response = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/posts/{id}/comment/{comment_id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn group_posts_fan_out_to_members(cast: Cast) {
    let group = Group {
        id: GroupId::random(),
        name: "Hikers".to_owned(),
        visibility: GroupVisibility::Private,
        members: vec![cast.alice, cast.carol],
    };
    let group_id = group.id;
    cast.world.relationships.add_group(group);
    let app = test::init_service(cast.world.app()).await;
    let alice = login(&app, "alice").await;
    let bob = login(&app, "bob").await;
    let carol = login(&app, "carol").await;

    let group_field = group_id.to_string();
    let id = create_post(&app, &alice, &[("content", "Trail at 8"), ("group_id", group_field.as_str())]).await;

    let carol_feed = json_body(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/posts").cookie(carol.clone()).to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(carol_feed[0]["id"], id.as_str());
    assert_eq!(carol_feed[0]["groupId"], group_field.as_str());

    let carol_inbox = json_body(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/notifications").cookie(carol).to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(
        messages(&carol_inbox),
        vec!["New post in Hikers created by Alice."]
    );

    let outsider = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/posts/group/{group_id}"))
            .cookie(bob)
            .to_request(),
    )
    .await;
    assert_eq!(outsider.status(), StatusCode::FORBIDDEN);
}
