use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `skills` dictionary table.
#[derive(DeriveIden)]
enum Skills {
    Table,
    Id,
    Name,
    NameKey,
    Level,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Skills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Skills::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Skills::Name).string_len(80).not_null())
                    // Case-folded, trimmed name. Uniqueness is enforced here rather
                    // than on `name` so it does not depend on the database collation.
                    // Folding can double a name's length.
                    .col(
                        ColumnDef::new(Skills::NameKey)
                            .string_len(160)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Skills::Level).integer().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Skills::Table).to_owned())
            .await
    }
}
