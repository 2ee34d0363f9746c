pub use sea_orm_migration::prelude::*;

mod m20250710_000001_create_current_state_tables;
mod m20250710_000002_create_history_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250710_000001_create_current_state_tables::Migration),
            Box::new(m20250710_000002_create_history_tables::Migration),
        ]
    }
}
