use sea_orm_migration::async_trait;
pub use sea_orm_migration::{MigrationTrait, MigratorTrait};

mod m001_create_access_tables;
mod m002_create_catalog_tables;
mod m003_create_account_tables;
mod m004_create_vehicle_table;
mod m005_create_message_table;
mod m006_create_listing_indices;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m001_create_access_tables::Migration),
            Box::new(m002_create_catalog_tables::Migration),
            Box::new(m003_create_account_tables::Migration),
            Box::new(m004_create_vehicle_table::Migration),
            Box::new(m005_create_message_table::Migration),
            Box::new(m006_create_listing_indices::Migration),
        ]
    }
}
