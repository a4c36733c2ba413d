use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Species::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Species::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Species::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Species::Description).text())
                    .col(ColumnDef::new(Species::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Species::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Breeds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Breeds::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Breeds::SpeciesId).integer().not_null())
                    .col(ColumnDef::new(Breeds::Name).string().not_null())
                    .col(ColumnDef::new(Breeds::Description).text())
                    .col(ColumnDef::new(Breeds::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Breeds::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_breeds_species")
                            .from(Breeds::Table, Breeds::SpeciesId)
                            .to(Species::Table, Species::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Breed names are unique within their species.
        manager
            .create_index(
                Index::create()
                    .name("idx_breeds_species_name")
                    .table(Breeds::Table)
                    .col(Breeds::SpeciesId)
                    .col(Breeds::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Breeds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Species::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Species {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Breeds {
    Table,
    Id,
    SpeciesId,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}
