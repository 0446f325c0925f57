use std::fmt;

use actix_web::http::StatusCode;

use crate::utils::url_validator::UrlValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShorturlError {
    InvalidUrl(String),
    InvalidExpiration(String),
    InvalidCode(String),
    InvalidInput(String),
    DuplicateUrl(String),
    NotFound(String),
    Expired(String),
    Unauthenticated(String),
    Forbidden(String),
    TransientStoreFailure(String),
    Storage(String),
    Config(String),
}

impl ShorturlError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShorturlError::InvalidUrl(_) => "E001",
            ShorturlError::InvalidExpiration(_) => "E002",
            ShorturlError::InvalidCode(_) => "E003",
            ShorturlError::InvalidInput(_) => "E004",
            ShorturlError::DuplicateUrl(_) => "E005",
            ShorturlError::NotFound(_) => "E006",
            ShorturlError::Expired(_) => "E007",
            ShorturlError::Unauthenticated(_) => "E008",
            ShorturlError::Forbidden(_) => "E009",
            ShorturlError::TransientStoreFailure(_) => "E010",
            ShorturlError::Storage(_) => "E011",
            ShorturlError::Config(_) => "E012",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShorturlError::InvalidUrl(_) => "Invalid URL",
            ShorturlError::InvalidExpiration(_) => "Invalid Expiration",
            ShorturlError::InvalidCode(_) => "Invalid Short Code",
            ShorturlError::InvalidInput(_) => "Invalid Input",
            ShorturlError::DuplicateUrl(_) => "Duplicate URL",
            ShorturlError::NotFound(_) => "Short Link Not Found",
            ShorturlError::Expired(_) => "Short Link Expired",
            ShorturlError::Unauthenticated(_) => "Unauthenticated",
            ShorturlError::Forbidden(_) => "Forbidden",
            ShorturlError::TransientStoreFailure(_) => "Transient Store Failure",
            ShorturlError::Storage(_) => "Storage Error",
            ShorturlError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShorturlError::InvalidUrl(msg)
            | ShorturlError::InvalidExpiration(msg)
            | ShorturlError::InvalidCode(msg)
            | ShorturlError::InvalidInput(msg)
            | ShorturlError::DuplicateUrl(msg)
            | ShorturlError::NotFound(msg)
            | ShorturlError::Expired(msg)
            | ShorturlError::Unauthenticated(msg)
            | ShorturlError::Forbidden(msg)
            | ShorturlError::TransientStoreFailure(msg)
            | ShorturlError::Storage(msg)
            | ShorturlError::Config(msg) => msg,
        }
    }

    /// Only transient store failures may be retried by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ShorturlError::TransientStoreFailure(_))
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            ShorturlError::InvalidUrl(_)
            | ShorturlError::InvalidExpiration(_)
            | ShorturlError::InvalidCode(_)
            | ShorturlError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ShorturlError::DuplicateUrl(_) => StatusCode::CONFLICT,
            ShorturlError::NotFound(_) => StatusCode::NOT_FOUND,
            ShorturlError::Expired(_) => StatusCode::GONE,
            ShorturlError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ShorturlError::Forbidden(_) => StatusCode::FORBIDDEN,
            ShorturlError::TransientStoreFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
            ShorturlError::Storage(_) | ShorturlError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 格式化为彩色输出（用于启动失败时的终端输出）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShorturlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShorturlError {}

// 便捷的构造函数
impl ShorturlError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        ShorturlError::InvalidUrl(msg.into())
    }

    pub fn invalid_expiration<T: Into<String>>(msg: T) -> Self {
        ShorturlError::InvalidExpiration(msg.into())
    }

    pub fn invalid_code<T: Into<String>>(msg: T) -> Self {
        ShorturlError::InvalidCode(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        ShorturlError::InvalidInput(msg.into())
    }

    pub fn duplicate_url<T: Into<String>>(msg: T) -> Self {
        ShorturlError::DuplicateUrl(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShorturlError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        ShorturlError::Expired(msg.into())
    }

    pub fn unauthenticated<T: Into<String>>(msg: T) -> Self {
        ShorturlError::Unauthenticated(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        ShorturlError::Forbidden(msg.into())
    }

    pub fn transient<T: Into<String>>(msg: T) -> Self {
        ShorturlError::TransientStoreFailure(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        ShorturlError::Storage(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShorturlError::Config(msg.into())
    }
}

impl From<sea_orm::DbErr> for ShorturlError {
    fn from(err: sea_orm::DbErr) -> Self {
        if crate::storage::backend::retry::is_retryable_error(&err) {
            ShorturlError::TransientStoreFailure(err.to_string())
        } else {
            ShorturlError::Storage(err.to_string())
        }
    }
}

impl From<UrlValidationError> for ShorturlError {
    fn from(err: UrlValidationError) -> Self {
        ShorturlError::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShorturlError>;
