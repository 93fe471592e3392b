use sea_orm::FromQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Longest accepted skill name, in characters.
pub const NAME_MAX_LEN: usize = 80;

/// Column width of `name_key`. Lowercasing can lengthen a name ("İ" folds to
/// two characters) but never more than doubles it.
pub const NAME_KEY_MAX_LEN: usize = 2 * NAME_MAX_LEN;

/// SeaORM entity for the shared `skills` dictionary.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Case-folded `name`; the unique lookup key.
    #[sea_orm(unique)]
    pub name_key: String,
    pub level: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::profile_skills::Entity")]
    ProfileSkills,
    #[sea_orm(has_many = "super::project_skills::Entity")]
    ProjectSkills,
}

impl Related<super::profile_skills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfileSkills.def()
    }
}

impl Related<super::project_skills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectSkills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// One row of the `GET /skills/top` ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillUsage {
    pub skill: String,
    pub count: i64,
}

/// Raw aggregate row before ranking.
#[derive(Debug, Clone, FromQueryResult)]
pub struct SkillUsageRow {
    pub name: String,
    pub name_key: String,
    pub count: i64,
}
