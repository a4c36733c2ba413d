use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Adoptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Adoptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Adoptions::AnimalId).integer().not_null())
                    .col(
                        ColumnDef::new(Adoptions::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Adoptions::AdoptionDate).date())
                    .col(ColumnDef::new(Adoptions::PersonName).string().not_null())
                    .col(ColumnDef::new(Adoptions::PersonEmail).string())
                    .col(ColumnDef::new(Adoptions::PersonPhone).string())
                    .col(ColumnDef::new(Adoptions::PersonDocument).string())
                    .col(ColumnDef::new(Adoptions::PersonAddress).text())
                    .col(ColumnDef::new(Adoptions::Notes).text())
                    .col(ColumnDef::new(Adoptions::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Adoptions::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_adoptions_animal")
                            .from(Adoptions::Table, Adoptions::AnimalId)
                            .to(Animals::Table, Animals::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_adoptions_animal_id")
                    .table(Adoptions::Table)
                    .col(Adoptions::AnimalId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_adoptions_status")
                    .table(Adoptions::Table)
                    .col(Adoptions::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Adoptions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Adoptions {
    Table,
    Id,
    AnimalId,
    Status,
    AdoptionDate,
    PersonName,
    PersonEmail,
    PersonPhone,
    PersonDocument,
    PersonAddress,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Animals {
    Table,
    Id,
}
