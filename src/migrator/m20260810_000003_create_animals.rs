use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Animals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Animals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Animals::BreedId).integer().not_null())
                    .col(ColumnDef::new(Animals::Name).string().not_null())
                    .col(
                        ColumnDef::new(Animals::Sex)
                            .string_len(16)
                            .not_null()
                            .default("unknown"),
                    )
                    .col(
                        ColumnDef::new(Animals::Status)
                            .string_len(16)
                            .not_null()
                            .default("sheltered"),
                    )
                    .col(ColumnDef::new(Animals::BirthDate).date())
                    .col(ColumnDef::new(Animals::IntakeDate).date().not_null())
                    .col(ColumnDef::new(Animals::Description).text())
                    .col(ColumnDef::new(Animals::ImageObject).string())
                    .col(ColumnDef::new(Animals::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Animals::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_animals_breed")
                            .from(Animals::Table, Animals::BreedId)
                            .to(Breeds::Table, Breeds::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_animals_status")
                    .table(Animals::Table)
                    .col(Animals::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_animals_breed_id")
                    .table(Animals::Table)
                    .col(Animals::BreedId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Animals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Animals {
    Table,
    Id,
    BreedId,
    Name,
    Sex,
    Status,
    BirthDate,
    IntakeDate,
    Description,
    ImageObject,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Breeds {
    Table,
    Id,
}
