//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed post engine used by the HTTP and
//! persistence adapters. Aggregates enforce their own invariants; services
//! add authorisation and notification side effects on top.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: API error payload and stable identifier.
//! - `posts`: the post aggregate with comments, reactions and history.
//! - `feed`: read-access rules.
//! - `PostService`, `NotificationService`: driving port implementations.

pub mod actor;
pub mod auth;
pub mod error;
pub mod feed;
pub mod group;
pub mod ids;
pub mod notification;
pub mod notification_fanout;
pub mod notification_service;
pub mod ports;
pub mod post_service;
pub mod posts;
pub mod trace_id;
pub mod user;

pub use self::actor::{Actor, ActorRole};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::group::{Group, GroupVisibility, UnknownGroupVisibility};
pub use self::ids::{CommentId, GroupId, NotificationId, PostId, ReactionId, UserId};
pub use self::notification::{
    Notification, NotificationEvent, NotificationKind, UnknownNotificationKind,
};
pub use self::notification_fanout::{FanoutReport, NotificationFanout};
pub use self::notification_service::NotificationService;
pub use self::post_service::PostService;
pub use self::trace_id::TraceId;
pub use self::user::{AccountStatus, UnknownAccountStatus, UserProfile};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use snapmate::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
