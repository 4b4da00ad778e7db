//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the DTO schemas and the domain
//! error wrappers from [`crate::inbound::http::schemas`], plus the session
//! cookie security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::comments::CommentRequest;
use crate::inbound::http::dto::{
    CommentCreatedResponse, CommentResponse, HistoryEntryResponse, MessageResponse,
    NotificationResponse, PostCreatedResponse, PostResponse, ReactionResponse, UserSummary,
};
use crate::inbound::http::reactions::ReactionRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{LoginRequest, LoginResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SnapMate API",
        description = "Posts, comments, reactions, feeds and notifications for SnapMate."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::posts::list_feed,
        crate::inbound::http::posts::list_user_posts,
        crate::inbound::http::posts::list_group_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::get_post_history,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::edit_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::comments::add_comment,
        crate::inbound::http::comments::edit_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::reactions::react_to_post,
        crate::inbound::http::reactions::change_post_reaction,
        crate::inbound::http::reactions::remove_post_reaction,
        crate::inbound::http::reactions::react_to_comment,
        crate::inbound::http::reactions::change_comment_reaction,
        crate::inbound::http::reactions::remove_comment_reaction,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::mark_notification_read,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        LoginResponse,
        MessageResponse,
        PostCreatedResponse,
        PostResponse,
        HistoryEntryResponse,
        CommentRequest,
        CommentResponse,
        CommentCreatedResponse,
        ReactionRequest,
        ReactionResponse,
        UserSummary,
        NotificationResponse,
    )),
    tags(
        (name = "users", description = "Login and logout"),
        (name = "posts", description = "Feeds, timelines and post mutations"),
        (name = "comments", description = "Comments on posts"),
        (name = "reactions", description = "Reactions on posts and comments"),
        (name = "notifications", description = "The signed-in user's inbox"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
