//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::ShorturlError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 认证错误 2000-2099
    TokenExpired = 2001,
    TokenInvalid = 2002,

    // 链接错误 3000-3099
    LinkNotFound = 3000,
    LinkAlreadyExists = 3001,
    LinkInvalidUrl = 3002,
    LinkInvalidExpireTime = 3003,
    LinkInvalidCode = 3007,
    LinkExpired = 3008,
}

impl From<&ShorturlError> for ErrorCode {
    fn from(err: &ShorturlError) -> Self {
        match err {
            ShorturlError::InvalidUrl(_) => ErrorCode::LinkInvalidUrl,
            ShorturlError::InvalidExpiration(_) => ErrorCode::LinkInvalidExpireTime,
            ShorturlError::InvalidCode(_) => ErrorCode::LinkInvalidCode,
            ShorturlError::InvalidInput(_) => ErrorCode::BadRequest,
            ShorturlError::DuplicateUrl(_) => ErrorCode::LinkAlreadyExists,
            ShorturlError::NotFound(_) => ErrorCode::LinkNotFound,
            ShorturlError::Expired(_) => ErrorCode::LinkExpired,
            ShorturlError::Unauthenticated(_) => ErrorCode::Unauthorized,
            ShorturlError::Forbidden(_) => ErrorCode::Forbidden,
            ShorturlError::TransientStoreFailure(_) => ErrorCode::ServiceUnavailable,
            ShorturlError::Storage(_) | ShorturlError::Config(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
