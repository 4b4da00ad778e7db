//! Reaction handlers for posts and comments.
//!
//! ```text
//! POST|PATCH|DELETE /api/v1/posts/{id}/reaction                {"type":"Love"}
//! POST|PATCH|DELETE /api/v1/posts/{id}/comment/{cid}/reaction  {"type":"Love"}
//! ```
//!
//! `DELETE` ignores any body. Reaction types are case-sensitive.

use actix_web::{HttpResponse, delete, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ReactionTarget;
use crate::domain::posts::ReactionKind;
use crate::inbound::http::ApiResult;
use crate::inbound::http::comments::parse_comment_path;
use crate::inbound::http::dto::MessageResponse;
use crate::inbound::http::posts::parse_post_id;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_value};

const TYPE: FieldName = FieldName::new("type");
const INVALID_REACTION_TYPE: &str = "Invalid reaction type";

/// Body for adding or changing a reaction.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReactionRequest {
    /// One of `Like`, `Love`, `Haha`, `Angry`.
    #[serde(rename = "type", default)]
    #[schema(example = "Love")]
    pub kind: Option<String>,
}

impl ReactionRequest {
    fn reaction_kind(&self) -> ApiResult<ReactionKind> {
        let raw = self
            .kind
            .as_deref()
            .ok_or_else(|| missing_field_error(TYPE, INVALID_REACTION_TYPE))?;
        parse_value(raw, TYPE, INVALID_REACTION_TYPE)
    }
}

async fn react(
    state: &HttpState,
    session: &SessionContext,
    target: ReactionTarget,
    payload: &ReactionRequest,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let kind = payload.reaction_kind()?;
    state.posts.react(actor, target, kind).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Reaction added successfully")))
}

async fn change(
    state: &HttpState,
    session: &SessionContext,
    target: ReactionTarget,
    payload: &ReactionRequest,
) -> ApiResult<web::Json<MessageResponse>> {
    let actor = session.require_actor()?;
    let kind = payload.reaction_kind()?;
    state.posts.change_reaction(actor, target, kind).await?;
    Ok(web::Json(MessageResponse::new("Reaction edited successfully")))
}

async fn remove(
    state: &HttpState,
    session: &SessionContext,
    target: ReactionTarget,
) -> ApiResult<web::Json<MessageResponse>> {
    let actor = session.require_actor()?;
    state.posts.unreact(actor, target).await?;
    Ok(web::Json(MessageResponse::new("Reaction deleted successfully")))
}

/// React to a post, replacing any earlier reaction by the same user.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/reaction",
    params(("id" = uuid::Uuid, Path, description = "Post identifier")),
    request_body = ReactionRequest,
    responses(
        (status = 201, description = "Reaction recorded", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Post not visible or admin session", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["reactions"],
    operation_id = "reactToPost",
    security(("SessionCookie" = []))
)]
#[post("/posts/{id}/reaction")]
pub async fn react_to_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReactionRequest>,
) -> ApiResult<HttpResponse> {
    let target = ReactionTarget::Post(parse_post_id(&path)?);
    react(&state, &session, target, &payload).await
}

/// Change the caller's reaction on a post.
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}/reaction",
    params(("id" = uuid::Uuid, Path, description = "Post identifier")),
    request_body = ReactionRequest,
    responses(
        (status = 200, description = "Reaction changed", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Post or reaction not found", body = ErrorSchema)
    ),
    tags = ["reactions"],
    operation_id = "changePostReaction",
    security(("SessionCookie" = []))
)]
#[patch("/posts/{id}/reaction")]
pub async fn change_post_reaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReactionRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let target = ReactionTarget::Post(parse_post_id(&path)?);
    change(&state, &session, target, &payload).await
}

/// Remove the caller's reaction on a post. Succeeds when there is none.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}/reaction",
    params(("id" = uuid::Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Reaction removed", body = MessageResponse),
        (status = 400, description = "Invalid post ID", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["reactions"],
    operation_id = "removePostReaction",
    security(("SessionCookie" = []))
)]
#[delete("/posts/{id}/reaction")]
pub async fn remove_post_reaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let target = ReactionTarget::Post(parse_post_id(&path)?);
    remove(&state, &session, target).await
}

/// React to a comment, replacing any earlier reaction by the same user.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/comment/{cid}/reaction",
    params(
        ("id" = uuid::Uuid, Path, description = "Post identifier"),
        ("cid" = uuid::Uuid, Path, description = "Comment identifier")
    ),
    request_body = ReactionRequest,
    responses(
        (status = 201, description = "Reaction recorded", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Post not visible or admin session", body = ErrorSchema),
        (status = 404, description = "Post or comment not found", body = ErrorSchema)
    ),
    tags = ["reactions"],
    operation_id = "reactToComment",
    security(("SessionCookie" = []))
)]
#[post("/posts/{id}/comment/{cid}/reaction")]
pub async fn react_to_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
    payload: web::Json<ReactionRequest>,
) -> ApiResult<HttpResponse> {
    let (post_id, comment_id) = parse_comment_path(&path)?;
    react(&state, &session, ReactionTarget::Comment(post_id, comment_id), &payload).await
}

/// Change the caller's reaction on a comment.
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}/comment/{cid}/reaction",
    params(
        ("id" = uuid::Uuid, Path, description = "Post identifier"),
        ("cid" = uuid::Uuid, Path, description = "Comment identifier")
    ),
    request_body = ReactionRequest,
    responses(
        (status = 200, description = "Reaction changed", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Post, comment or reaction not found", body = ErrorSchema)
    ),
    tags = ["reactions"],
    operation_id = "changeCommentReaction",
    security(("SessionCookie" = []))
)]
#[patch("/posts/{id}/comment/{cid}/reaction")]
pub async fn change_comment_reaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
    payload: web::Json<ReactionRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let (post_id, comment_id) = parse_comment_path(&path)?;
    change(&state, &session, ReactionTarget::Comment(post_id, comment_id), &payload).await
}

/// Remove the caller's reaction on a comment. Succeeds when there is none.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}/comment/{cid}/reaction",
    params(
        ("id" = uuid::Uuid, Path, description = "Post identifier"),
        ("cid" = uuid::Uuid, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "Reaction removed", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Post or comment not found", body = ErrorSchema)
    ),
    tags = ["reactions"],
    operation_id = "removeCommentReaction",
    security(("SessionCookie" = []))
)]
#[delete("/posts/{id}/comment/{cid}/reaction")]
pub async fn remove_comment_reaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<MessageResponse>> {
    let (post_id, comment_id) = parse_comment_path(&path)?;
    remove(&state, &session, ReactionTarget::Comment(post_id, comment_id)).await
}
