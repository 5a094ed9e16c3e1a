pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_artists_table;
mod m20250301_000002_create_genres_table;
mod m20250302_000003_create_artworks_table;
mod m20250303_000004_create_events_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_artists_table::Migration),
            Box::new(m20250301_000002_create_genres_table::Migration),
            Box::new(m20250302_000003_create_artworks_table::Migration),
            Box::new(m20250303_000004_create_events_table::Migration),
        ]
    }
}
