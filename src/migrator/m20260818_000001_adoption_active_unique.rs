use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // At most one non-terminal adoption per animal. A partial unique index
        // makes the rule hold under concurrent inserts, where the service-level
        // pre-check alone would race. Raw SQL because the statement builder has
        // no partial-index support; the clause is valid on both Postgres and
        // SQLite.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_adoptions_one_active \
                 ON adoptions (animal_id) \
                 WHERE status IN ('pending', 'approved')",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX idx_adoptions_one_active")
            .await?;
        Ok(())
    }
}
