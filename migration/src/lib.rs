pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20241001_000001_short_url;
mod m20241001_000002_visit;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241001_000001_short_url::Migration),
            Box::new(m20241001_000002_visit::Migration),
        ]
    }
}
