use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Projects {
    Table,
    ProfileId,
    Title,
}

#[derive(DeriveIden)]
enum ProjectLinks {
    Table,
    ProjectId,
}

#[derive(DeriveIden)]
enum ProjectSkills {
    Table,
    SkillId,
}

#[derive(DeriveIden)]
enum Work {
    Table,
    ProfileId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on projects.profile_id for tearing down a profile's projects
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_profile_id")
                    .table(Projects::Table)
                    .col(Projects::ProfileId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_title")
                    .table(Projects::Table)
                    .col(Projects::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_links_project_id")
                    .table(ProjectLinks::Table)
                    .col(ProjectLinks::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Index on project_skills.skill_id for the skill filter and usage ranking
        manager
            .create_index(
                Index::create()
                    .name("idx_project_skills_skill_id")
                    .table(ProjectSkills::Table)
                    .col(ProjectSkills::SkillId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_work_profile_id")
                    .table(Work::Table)
                    .col(Work::ProfileId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_projects_profile_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_title").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_project_links_project_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_project_skills_skill_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_work_profile_id").to_owned())
            .await?;

        Ok(())
    }
}
