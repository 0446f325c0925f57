//! Response envelope helpers
//!
//! Every JSON body is `{"code", "message", "data"}`; handlers build it
//! explicitly through these functions.

use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_TYPE, RETRY_AFTER};
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::error_code::ErrorCode;
use crate::errors::ShorturlError;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: ErrorCode,
    pub message: String,
    pub data: Option<T>,
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiResponse {
            code,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// Map a domain error to its status and code, logging it once.
pub fn error_from_shorturl(err: &ShorturlError) -> HttpResponse {
    error_with_code(err, ErrorCode::from(err))
}

fn error_with_code(err: &ShorturlError, code: ErrorCode) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("{} [{}]: {}", err.error_type(), err.code(), err.message());
    } else {
        warn!("{} [{}]: {}", err.error_type(), err.code(), err.message());
    }

    let mut response = error_response(status, code, err.message());
    if err.is_retryable() {
        response
            .headers_mut()
            .insert(RETRY_AFTER, actix_web::http::header::HeaderValue::from_static("1"));
    }
    response
}

/// Error raised by extractors, rendered in the same envelope as handler errors.
#[derive(Debug)]
pub struct ApiError {
    error: ShorturlError,
    code: ErrorCode,
}

impl ApiError {
    pub fn with_code(error: ShorturlError, code: ErrorCode) -> Self {
        Self { error, code }
    }

    pub fn error(&self) -> &ShorturlError {
        &self.error
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl From<ShorturlError> for ApiError {
    fn from(error: ShorturlError) -> Self {
        let code = ErrorCode::from(&error);
        Self { error, code }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.error.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        error_with_code(&self.error, self.code)
    }
}
