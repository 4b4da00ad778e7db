//! Shared harness for end-to-end API tests over the in-memory adapters.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};
use snapmate::domain::ports::{InboxService, LoginService, PostCommand, PostQuery};
use snapmate::domain::{ActorRole, NotificationService, PostService, UserId, UserProfile};
use snapmate::inbound::http::configure_api;
use snapmate::inbound::http::state::HttpState;
use snapmate::outbound::memory::{
    MemoryAccounts, MemoryNotificationInbox, MemoryPostRepository, MemoryRelationshipStore,
    MemoryUserDirectory,
};

pub const PASSWORD: &str = "correct horse battery";
const BOUNDARY: &str = "snapmate-e2e-boundary";

/// Every in-memory store, shared with the services under test.
#[derive(Default)]
pub struct World {
    pub accounts: Arc<MemoryAccounts>,
    pub users: Arc<MemoryUserDirectory>,
    pub relationships: Arc<MemoryRelationshipStore>,
    pub posts: Arc<MemoryPostRepository>,
    pub inbox: Arc<MemoryNotificationInbox>,
}

impl World {
    /// Register an account with [`PASSWORD`] and a matching profile.
    pub fn register(&self, username: &str, display_name: &str, role: ActorRole) -> UserId {
        let id = self
            .accounts
            .register(username, PASSWORD, role)
            .expect("register account");
        self.users
            .add_profile(UserProfile::new(id, username, display_name));
        id
    }

    pub fn member(&self, username: &str, display_name: &str) -> UserId {
        self.register(username, display_name, ActorRole::Member)
    }

    pub fn state(&self) -> web::Data<HttpState> {
        let service = Arc::new(PostService::new(
            Arc::clone(&self.posts),
            Arc::clone(&self.relationships),
            Arc::clone(&self.users),
            Arc::clone(&self.inbox),
            Arc::new(DefaultClock),
        ));
        let posts: Arc<dyn PostCommand> = service.clone();
        let posts_query: Arc<dyn PostQuery> = service;
        let notifications: Arc<dyn InboxService> =
            Arc::new(NotificationService::new(Arc::clone(&self.inbox)));
        let login: Arc<dyn LoginService> = self.accounts.clone();
        web::Data::new(HttpState::new(
            login,
            posts,
            posts_query,
            notifications,
        ))
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = Error,
            InitError = (),
        > + use<>,
    > {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .build();
        App::new()
            .app_data(self.state())
            .service(web::scope("/api/v1").wrap(session).configure(configure_api))
    }
}

/// Log `username` in and return the session cookie.
pub async fn login<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": username, "password": PASSWORD}))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login failed for {username}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

pub async fn json_body(response: ServiceResponse) -> Value {
    let body = test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}

/// Multipart body made of text fields only.
pub fn text_form(fields: &[(&str, &str)]) -> (String, Vec<u8>) {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        body.into_bytes(),
    )
}

/// `POST /posts` with text fields; returns the new post id.
pub async fn create_post<S>(app: &S, cookie: &Cookie<'static>, fields: &[(&str, &str)]) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let (content_type, body) = text_form(fields);
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/posts")
            .cookie(cookie.clone())
            .insert_header(("content-type", content_type))
            .set_payload(body)
            .to_request(),
    )
    .await;
    assert_eq!(response.status().as_u16(), 201, "post creation failed");
    json_body(response).await["id"]
        .as_str()
        .expect("post id")
        .to_owned()
}
