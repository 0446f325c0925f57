//! Bearer-token identity extractor

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header::AUTHORIZATION, web};
use futures_util::future::{Ready, ready};
use jsonwebtoken::errors::ErrorKind;
use tracing::{debug, trace};

use super::error_code::ErrorCode;
use super::jwt::JwtService;
use super::response::ApiError;
use crate::errors::ShorturlError;
use crate::storage::OwnerId;

/// Authenticated owner of the request.
///
/// No `Authorization: Bearer` header yields 401; a token that fails
/// validation yields 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub OwnerId);

impl Owner {
    pub fn id(&self) -> OwnerId {
        self.0
    }
}

/// 从 Authorization header 提取 Bearer token
fn extract_bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
}

fn authenticate(req: &HttpRequest) -> Result<Owner, ApiError> {
    let jwt = req
        .app_data::<web::Data<JwtService>>()
        .ok_or_else(|| ShorturlError::config("JwtService is not registered"))?;

    let token = extract_bearer_token(req)
        .ok_or_else(|| ShorturlError::unauthenticated("missing bearer token"))?;

    let claims = jwt.validate_access_token(token).map_err(|e| {
        debug!("Bearer token validation failed: {}", e);
        let code = match e.kind() {
            ErrorKind::ExpiredSignature => ErrorCode::TokenExpired,
            _ => ErrorCode::TokenInvalid,
        };
        ApiError::with_code(ShorturlError::forbidden(e.to_string()), code)
    })?;

    let owner = claims.owner_id().ok_or_else(|| {
        ApiError::with_code(
            ShorturlError::forbidden(format!("token subject '{}' is not an owner id", claims.sub)),
            ErrorCode::TokenInvalid,
        )
    })?;

    trace!("Bearer token accepted for owner {}", owner);
    Ok(Owner(owner))
}

impl FromRequest for Owner {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
