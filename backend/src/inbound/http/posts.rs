//! Post HTTP handlers: feed, timelines, single posts and post mutations.
//!
//! ```text
//! GET    /api/v1/posts?page=1&limit=10
//! GET    /api/v1/posts/user/{id}
//! GET    /api/v1/posts/group/{id}
//! GET    /api/v1/posts/{id}
//! GET    /api/v1/posts/{id}/history
//! POST   /api/v1/posts            (multipart)
//! PATCH  /api/v1/posts/{id}       (multipart)
//! DELETE /api/v1/posts/{id}
//! ```

use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use crate::domain::ports::PostView;
use crate::domain::{GroupId, PostId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    HistoryEntryResponse, MessageResponse, PostCreatedResponse, PostResponse,
};
use crate::inbound::http::post_form::PostForm;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, page_request, parse_id};

pub(crate) const INVALID_POST_ID: &str = "Invalid post ID";
pub(crate) const POST_ID: FieldName = FieldName::new("id");

/// Feed paging parameters. Values are validated by the handler so bad input
/// yields a field-level error instead of a generic query failure.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct FeedQuery {
    /// 1-based page number, default 1.
    pub page: Option<String>,
    /// Page size between 1 and 100, default 10.
    pub limit: Option<String>,
}

pub(crate) fn parse_post_id(raw: &str) -> ApiResult<PostId> {
    parse_id(raw, POST_ID, INVALID_POST_ID)
}

fn responses(views: &[PostView]) -> Vec<PostResponse> {
    views.iter().map(PostResponse::from).collect()
}

/// The signed-in user's feed, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(FeedQuery),
    responses(
        (status = 200, description = "Feed page", body = [PostResponse]),
        (status = 400, description = "Invalid paging", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listFeed",
    security(("SessionCookie" = []))
)]
#[get("/posts")]
pub async fn list_feed(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<FeedQuery>,
) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let actor = session.require_actor()?;
    let page = page_request(query.page.as_deref(), query.limit.as_deref())?;
    let views = state.posts_query.feed(actor, page).await?;
    Ok(web::Json(responses(&views)))
}

/// Posts written by a user, filtered by what the viewer may see.
#[utoipa::path(
    get,
    path = "/api/v1/posts/user/{id}",
    params(("id" = uuid::Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Timeline", body = [PostResponse]),
        (status = 400, description = "Invalid user ID", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listUserPosts",
    security(("SessionCookie" = []))
)]
#[get("/posts/user/{id}")]
pub async fn list_user_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let actor = session.require_actor()?;
    let subject: UserId = parse_id(&path, FieldName::new("id"), "Invalid user ID")?;
    let views = state.posts_query.user_posts(actor, subject).await?;
    Ok(web::Json(responses(&views)))
}

/// Posts in a group the viewer may read.
#[utoipa::path(
    get,
    path = "/api/v1/posts/group/{id}",
    params(("id" = uuid::Uuid, Path, description = "Group identifier")),
    responses(
        (status = 200, description = "Group posts", body = [PostResponse]),
        (status = 400, description = "Invalid group ID", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Private group", body = ErrorSchema),
        (status = 404, description = "Group not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listGroupPosts",
    security(("SessionCookie" = []))
)]
#[get("/posts/group/{id}")]
pub async fn list_group_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let actor = session.require_actor()?;
    let group: GroupId = parse_id(&path, FieldName::new("id"), "Invalid group ID")?;
    let views = state.posts_query.group_posts(actor, group).await?;
    Ok(web::Json(responses(&views)))
}

/// One post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = uuid::Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 400, description = "Invalid post ID", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not visible to the viewer", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost",
    security(("SessionCookie" = []))
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostResponse>> {
    let actor = session.require_actor()?;
    let post_id = parse_post_id(&path)?;
    let view = state.posts_query.post(actor, post_id).await?;
    Ok(web::Json(PostResponse::from(&view)))
}

/// Resolved edit history. The first entry is the state before the first
/// edit; the last is the state before the latest edit.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}/history",
    params(("id" = uuid::Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Edit history", body = [HistoryEntryResponse]),
        (status = 400, description = "Invalid post ID", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not visible to the viewer", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPostHistory",
    security(("SessionCookie" = []))
)]
#[get("/posts/{id}/history")]
pub async fn get_post_history(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<HistoryEntryResponse>>> {
    let actor = session.require_actor()?;
    let post_id = parse_post_id(&path)?;
    let history = state.posts_query.history(actor, post_id).await?;
    Ok(web::Json(
        history.iter().map(HistoryEntryResponse::from).collect(),
    ))
}

/// Publish a post from a multipart form.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body(content_type = "multipart/form-data", description = "content, visibility, images[], group_id"),
    responses(
        (status = 201, description = "Post created", body = PostCreatedResponse),
        (status = 400, description = "Invalid form", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not allowed to post here", body = ErrorSchema),
        (status = 404, description = "Group not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost",
    security(("SessionCookie" = []))
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let request = PostForm::read(payload).await?.into_create_request()?;
    let id = state.posts.create_post(actor, request).await?;
    info!(post_id = %id, author = %actor.id(), "post created");
    Ok(HttpResponse::Created().json(PostCreatedResponse {
        message: "Post created successfully".to_owned(),
        id: id.into(),
    }))
}

/// Edit a post from a multipart form carrying only the changed parts.
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}",
    params(("id" = uuid::Uuid, Path, description = "Post identifier")),
    request_body(content_type = "multipart/form-data", description = "content?, visibility?, images[]?"),
    responses(
        (status = 200, description = "Post edited", body = MessageResponse),
        (status = 400, description = "Invalid form", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "editPost",
    security(("SessionCookie" = []))
)]
#[patch("/posts/{id}")]
pub async fn edit_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Multipart,
) -> ApiResult<web::Json<MessageResponse>> {
    let actor = session.require_actor()?;
    let post_id = parse_post_id(&path)?;
    let patch = PostForm::read(payload).await?.into_patch()?;
    state.posts.edit_post(actor, post_id, patch).await?;
    Ok(web::Json(MessageResponse::new("Post edited successfully")))
}

/// Delete a post as its author or an administrator.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = uuid::Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 400, description = "Invalid post ID", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost",
    security(("SessionCookie" = []))
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let actor = session.require_actor()?;
    let post_id = parse_post_id(&path)?;
    state.posts.delete_post(actor, post_id).await?;
    info!(post_id = %post_id, actor = %actor.id(), "post deleted");
    Ok(web::Json(MessageResponse::new("Post deleted successfully")))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
