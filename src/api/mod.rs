//! HTTP surface: routes, handlers, bearer identity and the response envelope

pub mod error_code;
pub mod identity;
pub mod jwt;
pub mod response;
pub mod routes;
pub mod services;

pub use error_code::ErrorCode;
pub use identity::Owner;
pub use jwt::JwtService;
pub use response::{ApiError, ApiResponse};
pub use routes::configure;
