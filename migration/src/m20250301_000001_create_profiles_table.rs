use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `profiles` table and its columns.
#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    Slot,
    Name,
    Email,
    Education,
    Github,
    Linkedin,
    Portfolio,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // Always 1. The unique key keeps the table at a single row even
                    // when two creates race past the existence check.
                    .col(
                        ColumnDef::new(Profiles::Slot)
                            .integer()
                            .not_null()
                            .default(1)
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profiles::Name).string_len(120).not_null())
                    .col(
                        ColumnDef::new(Profiles::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Profiles::Education)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Profiles::Github).string_len(255).null())
                    .col(ColumnDef::new(Profiles::Linkedin).string_len(255).null())
                    .col(ColumnDef::new(Profiles::Portfolio).string_len(255).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}
