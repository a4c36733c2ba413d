use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShelterConfiguration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShelterConfiguration::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ShelterConfiguration::Name)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ShelterConfiguration::Address).text())
                    .col(ColumnDef::new(ShelterConfiguration::Phone).string())
                    .col(ColumnDef::new(ShelterConfiguration::Email).string())
                    .col(
                        ColumnDef::new(ShelterConfiguration::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShelterConfiguration::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShelterConfiguration::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShelterConfiguration {
    Table,
    Id,
    Name,
    Address,
    Phone,
    Email,
    CreatedAt,
    UpdatedAt,
}
