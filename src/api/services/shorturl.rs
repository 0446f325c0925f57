//! Owner-scoped short URL endpoints

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::api::identity::Owner;
use crate::api::response::{created_response, error_from_shorturl};
use crate::services::{CreateLinkRequest, LinkService};

#[derive(Debug, Deserialize)]
pub struct PostShortUrl {
    pub url: String,
    #[serde(default)]
    pub expiration_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EncodedShortUrl {
    pub encoded: String,
}

/// `POST /shorturl`
pub async fn post_shorturl(
    owner: Owner,
    body: web::Json<PostShortUrl>,
    links: web::Data<LinkService>,
) -> impl Responder {
    let body = body.into_inner();
    trace!("post_shorturl: owner={} url={}", owner.id(), body.url);

    let req = CreateLinkRequest {
        url: body.url,
        expires_at: body.expiration_date,
    };
    match links.create_link(owner.id(), req).await {
        Ok(created) => created_response(EncodedShortUrl {
            encoded: created.code.into_string(),
        }),
        Err(e) => error_from_shorturl(&e),
    }
}

/// `DELETE /shorturl/{code}`
pub async fn delete_shorturl(
    owner: Owner,
    code: web::Path<String>,
    links: web::Data<LinkService>,
) -> impl Responder {
    match links.delete_link(owner.id(), &code).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_from_shorturl(&e),
    }
}
