use sea_orm_migration::prelude::*;

mod m20260810_000001_create_users;
mod m20260810_000002_create_taxonomy;
mod m20260810_000003_create_animals;
mod m20260810_000004_create_adoptions;
mod m20260810_000005_create_events;
mod m20260811_000001_create_daily_tasks;
mod m20260811_000002_create_refresh_tokens;
mod m20260812_000001_create_shelter_configuration;
mod m20260818_000001_adoption_active_unique;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_000001_create_users::Migration),
            Box::new(m20260810_000002_create_taxonomy::Migration),
            Box::new(m20260810_000003_create_animals::Migration),
            Box::new(m20260810_000004_create_adoptions::Migration),
            Box::new(m20260810_000005_create_events::Migration),
            Box::new(m20260811_000001_create_daily_tasks::Migration),
            Box::new(m20260811_000002_create_refresh_tokens::Migration),
            Box::new(m20260812_000001_create_shelter_configuration::Migration),
            Box::new(m20260818_000001_adoption_active_unique::Migration),
        ]
    }
}
