use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::project_links::{LinkInput, LinkOut};

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub profile_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Lowercased `title`, matched by text search.
    pub title_key: String,
    #[sea_orm(column_type = "Text")]
    pub description_key: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ProfileId",
        to = "super::profiles::Column::Id"
    )]
    Profile,
    #[sea_orm(has_many = "super::project_links::Entity")]
    Links,
    #[sea_orm(has_many = "super::project_skills::Entity")]
    ProjectSkills,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::project_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Links.def()
    }
}

impl Related<super::project_skills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectSkills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub links: Vec<LinkInput>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A project with its links and skills, in stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOut {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub links: Vec<LinkOut>,
    pub skills: Vec<String>,
}
