//! HTTP inbound adapter exposing REST endpoints.

pub mod comments;
pub mod dto;
pub mod error;
pub mod health;
pub mod notifications;
mod post_form;
pub mod posts;
pub mod reactions;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` endpoint and the extractor error handlers on
/// `cfg`. The caller supplies the session middleware and [`state::HttpState`].
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use snapmate::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(users::login)
        .service(users::logout)
        .service(posts::list_feed)
        .service(posts::list_user_posts)
        .service(posts::list_group_posts)
        .service(posts::create_post)
        .service(posts::get_post)
        .service(posts::get_post_history)
        .service(posts::edit_post)
        .service(posts::delete_post)
        .service(comments::add_comment)
        .service(comments::edit_comment)
        .service(comments::delete_comment)
        .service(reactions::react_to_post)
        .service(reactions::change_post_reaction)
        .service(reactions::remove_post_reaction)
        .service(reactions::react_to_comment)
        .service(reactions::change_comment_reaction)
        .service(reactions::remove_comment_reaction)
        .service(notifications::list_notifications)
        .service(notifications::mark_notification_read);
}
