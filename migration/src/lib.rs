pub use sea_orm_migration::prelude::*;

mod m20260114_000001_create_carrier_table;
mod m20260114_000002_create_mission_table;
mod m20260114_000003_create_webhook_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260114_000001_create_carrier_table::Migration),
            Box::new(m20260114_000002_create_mission_table::Migration),
            Box::new(m20260114_000003_create_webhook_table::Migration),
        ]
    }
}
