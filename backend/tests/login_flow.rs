//! Login outcomes against the in-memory account store.

// Shared harness helpers are not all used by this suite.
#[allow(dead_code)]
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::json;
use snapmate::domain::{AccountStatus, ActorRole};
use support::{PASSWORD, World, json_body};

#[rstest]
#[case::wrong_password("alice", "nope", StatusCode::UNAUTHORIZED, "Invalid username or password")]
#[case::unknown_user("zed", PASSWORD, StatusCode::UNAUTHORIZED, "Invalid username or password")]
#[case::suspended(
    "mallory",
    PASSWORD,
    StatusCode::FORBIDDEN,
    "Account is suspended. Please contact the Admin to get support."
)]
#[actix_web::test]
async fn rejected_logins(
    #[case] username: &str,
    #[case] password: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let world = World::default();
    world.member("alice", "Alice");
    let mallory = world.member("mallory", "Mallory");
    world.accounts.set_status(mallory, AccountStatus::Suspended);
    let app = test::init_service(world.app()).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": username, "password": password}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), status);
    assert_eq!(json_body(response).await["message"], message);
}

#[rstest]
#[actix_web::test]
async fn administrators_cannot_author_posts() {
    let world = World::default();
    world.register("root", "Root", ActorRole::Admin);
    let app = test::init_service(world.app()).await;

    let login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": "root", "password": PASSWORD}))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let cookie = login
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.into_owned())
        .expect("session cookie");
    assert_eq!(json_body(login).await["isAdmin"], true);

    let (content_type, body) = support::text_form(&[("content", "Announcement")]);
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/posts")
            .cookie(cookie.clone())
            .insert_header(("content-type", content_type))
            .set_payload(body)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let logout = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::OK);
}
