use actix_web::{Responder, web};
use chrono::Utc;

use crate::api::identity::Owner;
use crate::api::response::{error_from_shorturl, success_response};
use crate::errors::Result;
use crate::services::{AnalyticsService, LinkService, LinkStats};

async fn owned_stats(
    owner: Owner,
    code: &str,
    links: &LinkService,
    analytics: &AnalyticsService,
) -> Result<LinkStats> {
    let link = links.resolve_owned(owner.id(), code).await?;
    analytics.link_stats(&link, Utc::now()).await
}

/// `GET /{code}/+`
pub async fn get_link_stats(
    owner: Owner,
    code: web::Path<String>,
    links: web::Data<LinkService>,
    analytics: web::Data<AnalyticsService>,
) -> impl Responder {
    match owned_stats(owner, &code, &links, &analytics).await {
        Ok(stats) => success_response(stats),
        Err(e) => error_from_shorturl(&e),
    }
}
