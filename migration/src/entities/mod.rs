pub mod short_url;
pub mod visit;

pub use short_url::Entity as ShortUrlEntity;
pub use visit::Entity as VisitEntity;
