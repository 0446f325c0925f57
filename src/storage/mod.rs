pub mod backend;
pub mod models;
pub mod traits;

pub use backend::SeaOrmStorage;
pub use models::{LinkId, LinkState, NewShortLink, NewVisit, OwnerId, ShortLink, VisitEvent};
pub use traits::{LinkStore, VisitLog, VisitQuery};
