use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyTasks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyTasks::AnimalId).integer().not_null())
                    .col(ColumnDef::new(DailyTasks::Date).date().not_null())
                    .col(ColumnDef::new(DailyTasks::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(DailyTasks::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_tasks_animal")
                            .from(DailyTasks::Table, DailyTasks::AnimalId)
                            .to(Animals::Table, Animals::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One task per animal per calendar date.
        manager
            .create_index(
                Index::create()
                    .name("idx_daily_tasks_animal_date")
                    .table(DailyTasks::Table)
                    .col(DailyTasks::AnimalId)
                    .col(DailyTasks::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DailyTaskEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyTaskEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DailyTaskEntries::DailyTaskId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DailyTaskEntries::Title).string().not_null())
                    .col(
                        ColumnDef::new(DailyTaskEntries::IsDone)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(DailyTaskEntries::CompletedAt).date_time())
                    .col(ColumnDef::new(DailyTaskEntries::CompletedByUserId).integer())
                    .col(
                        ColumnDef::new(DailyTaskEntries::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyTaskEntries::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_task_entries_task")
                            .from(DailyTaskEntries::Table, DailyTaskEntries::DailyTaskId)
                            .to(DailyTasks::Table, DailyTasks::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_task_entries_completed_by")
                            .from(
                                DailyTaskEntries::Table,
                                DailyTaskEntries::CompletedByUserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DailyTaskDefaultEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyTaskDefaultEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DailyTaskDefaultEntries::AnimalId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyTaskDefaultEntries::Title)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyTaskDefaultEntries::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyTaskDefaultEntries::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_task_default_entries_animal")
                            .from(
                                DailyTaskDefaultEntries::Table,
                                DailyTaskDefaultEntries::AnimalId,
                            )
                            .to(Animals::Table, Animals::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(DailyTaskDefaultEntries::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(DailyTaskEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyTasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DailyTasks {
    Table,
    Id,
    AnimalId,
    Date,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DailyTaskEntries {
    Table,
    Id,
    DailyTaskId,
    Title,
    IsDone,
    CompletedAt,
    CompletedByUserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DailyTaskDefaultEntries {
    Table,
    Id,
    AnimalId,
    Title,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Animals {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
