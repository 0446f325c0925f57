pub mod time_parser;
pub mod url_validator;

pub use time_parser::parse_expire_time;
pub use url_validator::{UrlValidationError, validate_url};

/// Random alphanumeric token drawn from the thread-local CSPRNG.
pub fn generate_secure_token(length: usize) -> String {
    use std::iter;

    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}
