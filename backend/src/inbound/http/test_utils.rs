//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, HttpResponse, Scope, test, web};
use serde_json::Value;

use crate::domain::ports::{MockInboxService, MockLoginService, MockPostCommand, MockPostQuery};
use crate::domain::{Actor, Error as DomainError};
use crate::inbound::http::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Session middleware with a fresh key, cookie name `session` and no
/// `Secure` flag so plain HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// An app with only the test session middleware installed.
pub fn session_test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new().wrap(test_session_middleware())
}

/// The `session` cookie set by `response`.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Mocked driving ports for handler tests.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub posts: MockPostCommand,
    pub posts_query: MockPostQuery,
    pub notifications: MockInboxService,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(self.login),
            Arc::new(self.posts),
            Arc::new(self.posts_query),
            Arc::new(self.notifications),
        ))
    }
}

/// Route that signs `actor` in, for tests that need an authenticated cookie.
pub const SIGN_IN_PATH: &str = "/test/sign-in";

/// App with session middleware, a sign-in route for `actor`, the extractor
/// error handlers and the `api` scope.
pub fn api_test_app(
    state: web::Data<HttpState>,
    actor: Actor,
    api: Scope,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    session_test_app()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .route(
            SIGN_IN_PATH,
            web::get().to(move |session: SessionContext| async move {
                session.persist_actor(actor)?;
                Ok::<_, DomainError>(HttpResponse::Ok().finish())
            }),
        )
        .service(api)
}

/// Sign in through [`SIGN_IN_PATH`] and return the session cookie.
pub async fn sign_in<S>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let response = test::call_service(app, test::TestRequest::get().uri(SIGN_IN_PATH).to_request()).await;
    assert!(response.status().is_success(), "sign-in route failed");
    session_cookie(&response)
}

/// Read a JSON body from `response`.
pub async fn json_body(response: ServiceResponse) -> Value {
    let body = test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}

/// Boundary used by [`multipart_body`].
pub const MULTIPART_BOUNDARY: &str = "snapmate-test-boundary";

/// One part of a multipart test body.
pub struct Part<'a> {
    pub name: &'a str,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            content_type: None,
            data: value.as_bytes(),
        }
    }

    pub fn file(name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            content_type: Some(content_type),
            data,
        }
    }
}

/// Encode `parts` as `multipart/form-data`, returning the content type
/// header value and the body.
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        match part.content_type {
            Some(content_type) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"upload\"\r\nContent-Type: {content_type}\r\n\r\n",
                        part.name
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    (
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        body,
    )
}
