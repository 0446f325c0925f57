use actix_web::http::header::{CACHE_CONTROL, LOCATION, REFERER};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use chrono::Utc;

use crate::api::response::error_from_shorturl;
use crate::services::{RedirectService, VisitContext};

/// `GET /{code}`
pub async fn handle_redirect(
    req: HttpRequest,
    code: web::Path<String>,
    redirects: web::Data<RedirectService>,
) -> impl Responder {
    let referrer = req.headers().get(REFERER).and_then(|h| h.to_str().ok());
    let ctx = VisitContext::new(referrer, Utc::now());

    match redirects.redirect(&code, ctx).await {
        Ok(url) => HttpResponse::Found()
            .insert_header((LOCATION, url))
            // 每次访问都必须经过服务端计数
            .insert_header((CACHE_CONTROL, "no-store"))
            .finish(),
        Err(e) => error_from_shorturl(&e),
    }
}
