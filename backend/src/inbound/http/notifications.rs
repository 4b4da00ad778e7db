//! Notification inbox handlers for the signed-in user.
//!
//! ```text
//! GET   /api/v1/notifications
//! PATCH /api/v1/notifications/{id}
//! ```

use actix_web::{get, patch, web};

use crate::domain::NotificationId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{MessageResponse, NotificationResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// The caller's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Inbox", body = [NotificationResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications",
    security(("SessionCookie" = []))
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<NotificationResponse>>> {
    let actor = session.require_actor()?;
    let notifications = state.notifications.list(actor.id()).await?;
    Ok(web::Json(
        notifications.iter().map(NotificationResponse::from).collect(),
    ))
}

/// Flag one of the caller's notifications as read.
#[utoipa::path(
    patch,
    path = "/api/v1/notifications/{id}",
    params(("id" = uuid::Uuid, Path, description = "Notification identifier")),
    responses(
        (status = 200, description = "Marked as read", body = MessageResponse),
        (status = 400, description = "Invalid notification ID", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Notification not found", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead",
    security(("SessionCookie" = []))
)]
#[patch("/notifications/{id}")]
pub async fn mark_notification_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let actor = session.require_actor()?;
    let id: NotificationId = parse_id(&path, FieldName::new("id"), "Invalid notification ID")?;
    state.notifications.mark_read(actor.id(), id).await?;
    Ok(web::Json(MessageResponse::new(
        "Notification marked as read successfully",
    )))
}
