use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::AnimalId).integer().not_null())
                    .col(ColumnDef::new(Events::UserId).integer().not_null())
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(ColumnDef::new(Events::Description).text())
                    .col(ColumnDef::new(Events::StartsAt).date_time().not_null())
                    .col(
                        ColumnDef::new(Events::IsDone)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Events::CompletedAt).date_time())
                    .col(ColumnDef::new(Events::CompletedByUserId).integer())
                    .col(ColumnDef::new(Events::CostCents).big_integer())
                    .col(ColumnDef::new(Events::CostCurrency).string_len(3))
                    .col(ColumnDef::new(Events::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Events::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_animal")
                            .from(Events::Table, Events::AnimalId)
                            .to(Animals::Table, Animals::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_user")
                            .from(Events::Table, Events::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_completed_by_user")
                            .from(Events::Table, Events::CompletedByUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_animal_id")
                    .table(Events::Table)
                    .col(Events::AnimalId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_is_done")
                    .table(Events::Table)
                    .col(Events::IsDone)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    AnimalId,
    UserId,
    Title,
    Description,
    StartsAt,
    IsDone,
    CompletedAt,
    CompletedByUserId,
    CostCents,
    CostCurrency,
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
