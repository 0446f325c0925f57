//! Service layer for business logic
//!
//! Services depend on the storage traits only and are shared by the HTTP
//! handlers through `web::Data`.

mod analytics_service;
mod link_service;
mod redirect;

pub use analytics_service::*;
pub use link_service::*;
pub use redirect::*;
