pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_profiles_table;
mod m20250301_000002_create_skills_table;
mod m20250301_000003_create_profile_skills_table;
mod m20250301_000004_create_projects_table;
mod m20250301_000005_create_project_children_tables;
mod m20250301_000006_create_work_table;
mod m20250302_000001_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_profiles_table::Migration),
            Box::new(m20250301_000002_create_skills_table::Migration),
            Box::new(m20250301_000003_create_profile_skills_table::Migration),
            Box::new(m20250301_000004_create_projects_table::Migration),
            Box::new(m20250301_000005_create_project_children_tables::Migration),
            Box::new(m20250301_000006_create_work_table::Migration),
            Box::new(m20250302_000001_add_lookup_indexes::Migration),
        ]
    }
}
