use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `work` table and its columns.
#[derive(DeriveIden)]
enum Work {
    Table,
    Id,
    ProfileId,
    Company,
    Title,
    StartDate,
    EndDate,
    Description,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Work::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Work::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Work::ProfileId).integer().not_null())
                    .col(ColumnDef::new(Work::Company).string_len(200).not_null())
                    .col(ColumnDef::new(Work::Title).string_len(200).not_null())
                    // ISO date strings, kept as text.
                    .col(ColumnDef::new(Work::StartDate).string_len(20).not_null())
                    .col(ColumnDef::new(Work::EndDate).string_len(20).null())
                    .col(ColumnDef::new(Work::Description).text().not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_profile_id")
                            .from(Work::Table, Work::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Work::Table).to_owned())
            .await
    }
}
