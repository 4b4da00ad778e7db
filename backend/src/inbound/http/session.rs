//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie carries the signed-in user's id and whether they logged in as
//! an administrator. Handlers only see an [`Actor`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Actor, ActorRole, Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const IS_ADMIN_KEY: &str = "is_admin";

const LOGIN_REQUIRED: &str = "Unauthorized: Please log in to access this resource";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the signed-in actor, replacing any previous session state.
    pub fn persist_actor(&self, actor: Actor) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, actor.id().to_string())
            .and_then(|()| self.0.insert(IS_ADMIN_KEY, actor.is_admin()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop all session state.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// The signed-in actor, if the cookie carries a valid one.
    pub fn actor(&self) -> Option<Actor> {
        let id = match self.0.get::<String>(USER_ID_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                warn!(%error, "unreadable user id in session cookie");
                return None;
            }
        };
        let id = match id.parse::<UserId>() {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                return None;
            }
        };
        let is_admin = self.0.get::<bool>(IS_ADMIN_KEY).ok().flatten().unwrap_or(false);
        let role = if is_admin {
            ActorRole::Admin
        } else {
            ActorRole::Member
        };
        Some(Actor::new(id, role))
    }

    /// Require a signed-in actor or return `401 Unauthorized`.
    pub fn require_actor(&self) -> Result<Actor, Error> {
        self.actor()
            .ok_or_else(|| Error::unauthorized(LOGIN_REQUIRED))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{HttpResponse, test, web};
    use rstest::rstest;

    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, session_test_app};

    const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    #[case::member(false, "member")]
    #[case::admin(true, "admin")]
    #[actix_web::test]
    async fn round_trips_the_actor(#[case] as_admin: bool, #[case] expected_role: &str) {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(move |session: SessionContext| async move {
                        let id: UserId = FIXTURE_ID.parse().expect("fixture id");
                        let actor = if as_admin {
                            Actor::admin(id)
                        } else {
                            Actor::member(id)
                        };
                        session.persist_actor(actor)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let actor = session.require_actor()?;
                        let role = if actor.is_admin() { "admin" } else { "member" };
                        Ok::<_, Error>(HttpResponse::Ok().body(format!("{}:{role}", actor.id())))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set_res);

        let get_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, format!("{FIXTURE_ID}:{expected_role}"));
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_actor_is_unauthorised() {
        let app = test::init_service(session_test_app().route(
            "/require",
            web::get().to(|session: SessionContext| async move {
                session.require_actor()?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn tampered_user_id_is_unauthorised() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .expect("set invalid user id");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/require",
                    web::get().to(|session: SessionContext| async move {
                        session.require_actor()?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/require").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
