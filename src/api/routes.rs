//! HTTP 路由配置

use actix_web::{HttpRequest, error::JsonPayloadError, web};

use super::response::ApiError;
use super::services::{
    delete_shorturl, get_link_stats, handle_redirect, health_check, post_shorturl,
};
use crate::errors::ShorturlError;

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::from(ShorturlError::invalid_input(format!(
        "invalid request body: {}",
        err
    )))
    .into()
}

/// Register every route. Shared state is added by the caller.
///
/// `/health` is registered before `/{code}` because "health" is itself a
/// valid short code.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health_check))
        .route("/shorturl", web::post().to(post_shorturl))
        .route("/shorturl/{code}", web::delete().to(delete_shorturl))
        .route("/{code}/+", web::get().to(get_link_stats))
        .route("/{code}", web::get().to(handle_redirect));
}
