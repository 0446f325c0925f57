mod health;
mod redirect;
mod shorturl;
mod stats;

pub use health::{HealthResponse, health_check};
pub use redirect::handle_redirect;
pub use shorturl::{EncodedShortUrl, PostShortUrl, delete_shorturl, post_shorturl};
pub use stats::get_link_stats;
