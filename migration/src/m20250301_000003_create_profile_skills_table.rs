use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum ProfileSkills {
    Table,
    ProfileId,
    SkillId,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Skills {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProfileSkills::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProfileSkills::ProfileId).integer().not_null())
                    .col(ColumnDef::new(ProfileSkills::SkillId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ProfileSkills::ProfileId)
                            .col(ProfileSkills::SkillId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_skills_profile_id")
                            .from(ProfileSkills::Table, ProfileSkills::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_skills_skill_id")
                            .from(ProfileSkills::Table, ProfileSkills::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProfileSkills::Table).to_owned())
            .await
    }
}
