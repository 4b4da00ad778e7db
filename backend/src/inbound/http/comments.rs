//! Comment HTTP handlers.
//!
//! ```text
//! POST   /api/v1/posts/{id}/comment        {"content":"..."}
//! PATCH  /api/v1/posts/{id}/comment/{cid}  {"content":"..."}
//! DELETE /api/v1/posts/{id}/comment/{cid}
//! ```

use actix_web::{HttpResponse, delete, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CommentId, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CommentCreatedResponse, CommentResponse, MessageResponse};
use crate::inbound::http::posts::parse_post_id;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Body for adding or rewording a comment. A missing `content` is treated
/// as empty and rejected by the domain.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CommentRequest {
    #[serde(default)]
    #[schema(example = "Lovely shot!")]
    pub content: String,
}

pub(crate) fn parse_comment_path(raw: &(String, String)) -> ApiResult<(PostId, CommentId)> {
    let post_id = parse_post_id(&raw.0)?;
    let comment_id = parse_id(&raw.1, FieldName::new("cid"), "Invalid comment ID")?;
    Ok((post_id, comment_id))
}

/// Comment on a post. Notifies the post author unless they wrote it.
///
/// The returned comment carries `authorId` only; the caller is its author.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/comment",
    params(("id" = uuid::Uuid, Path, description = "Post identifier")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment added", body = CommentCreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Post not visible or admin session", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "addComment",
    security(("SessionCookie" = []))
)]
#[post("/posts/{id}/comment")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let post_id = parse_post_id(&path)?;
    let comment = state
        .posts
        .add_comment(actor, post_id, payload.into_inner().content)
        .await?;
    Ok(HttpResponse::Created().json(CommentCreatedResponse {
        message: "Comment added successfully".to_owned(),
        comment: CommentResponse::with_profiles(&comment, &[]),
    }))
}

/// Reword a comment as its author.
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}/comment/{cid}",
    params(
        ("id" = uuid::Uuid, Path, description = "Post identifier"),
        ("cid" = uuid::Uuid, Path, description = "Comment identifier")
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment edited", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the comment author", body = ErrorSchema),
        (status = 404, description = "Post or comment not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "editComment",
    security(("SessionCookie" = []))
)]
#[patch("/posts/{id}/comment/{cid}")]
pub async fn edit_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let actor = session.require_actor()?;
    let (post_id, comment_id) = parse_comment_path(&path)?;
    state
        .posts
        .edit_comment(actor, post_id, comment_id, payload.into_inner().content)
        .await?;
    Ok(web::Json(MessageResponse::new("Comment edited successfully")))
}

/// Remove a comment as its author, the post author or an administrator.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}/comment/{cid}",
    params(
        ("id" = uuid::Uuid, Path, description = "Post identifier"),
        ("cid" = uuid::Uuid, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not permitted", body = ErrorSchema),
        (status = 404, description = "Post or comment not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment",
    security(("SessionCookie" = []))
)]
#[delete("/posts/{id}/comment/{cid}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<MessageResponse>> {
    let actor = session.require_actor()?;
    let (post_id, comment_id) = parse_comment_path(&path)?;
    state
        .posts
        .delete_comment(actor, post_id, comment_id)
        .await?;
    Ok(web::Json(MessageResponse::new("Comment deleted successfully")))
}
