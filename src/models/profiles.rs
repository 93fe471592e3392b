use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::project_links::LinkInput;
use super::projects::{ProjectInput, ProjectOut};
use super::skills;
use super::work::{WorkInput, WorkOut};
use super::{ValidationError, check_email, check_optional_len, check_required};

/// Value of `slot` on the one permitted profile row.
pub const PROFILE_SLOT: i32 = 1;

/// SeaORM entity for the `profiles` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slot: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub education: String,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::projects::Entity")]
    Projects,
    #[sea_orm(has_many = "super::work::Entity")]
    Work,
    #[sea_orm(has_many = "super::profile_skills::Entity")]
    ProfileSkills,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Work.def()
    }
}

impl Related<super::profile_skills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfileSkills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// External links stored as scalar columns on the profile row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLinks {
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
}

impl ProfileLinks {
    /// Blank strings are stored as absent links.
    pub fn normalized(&self) -> Self {
        fn clean(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            github: clean(&self.github),
            linkedin: clean(&self.linkedin),
            portfolio: clean(&self.portfolio),
        }
    }
}

/// The complete profile document accepted by `POST /profile` and `PUT /profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ProjectInput>,
    #[serde(default)]
    pub work: Vec<WorkInput>,
    #[serde(default)]
    pub links: ProfileLinks,
}

impl ProfileInput {
    /// Check every field of the document. Runs before any transaction is opened,
    /// so a rejected document never touches storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required("name", &self.name, 120)?;
        check_email("email", &self.email)?;

        for (i, skill) in self.skills.iter().enumerate() {
            check_skill_name(&format!("skills[{i}]"), skill)?;
        }

        for (i, project) in self.projects.iter().enumerate() {
            let path = format!("projects[{i}]");
            check_required(&format!("{path}.title"), &project.title, 200)?;
            for (j, link) in project.links.iter().enumerate() {
                check_link(&format!("{path}.links[{j}]"), link)?;
            }
            for (j, skill) in project.skills.iter().enumerate() {
                check_skill_name(&format!("{path}.skills[{j}]"), skill)?;
            }
        }

        for (i, job) in self.work.iter().enumerate() {
            let path = format!("work[{i}]");
            check_required(&format!("{path}.company"), &job.company, 200)?;
            check_required(&format!("{path}.title"), &job.title, 200)?;
            check_required(&format!("{path}.start_date"), &job.start_date, 20)?;
            check_optional_len(&format!("{path}.end_date"), job.end_date.as_deref(), 20)?;
        }

        check_optional_len("links.github", self.links.github.as_deref(), 255)?;
        check_optional_len("links.linkedin", self.links.linkedin.as_deref(), 255)?;
        check_optional_len("links.portfolio", self.links.portfolio.as_deref(), 255)?;

        Ok(())
    }
}

fn check_skill_name(field: &str, name: &str) -> Result<(), ValidationError> {
    check_required(field, name, skills::NAME_MAX_LEN)
}

fn check_link(path: &str, link: &LinkInput) -> Result<(), ValidationError> {
    check_required(&format!("{path}.label"), &link.label, 100)?;
    check_required(&format!("{path}.url"), &link.url, 500)
}

/// The materialized profile tree returned by every profile operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileOut {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub education: String,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectOut>,
    pub work: Vec<WorkOut>,
    pub links: ProfileLinks,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(value: serde_json::Value) -> ProfileInput {
        serde_json::from_value(value).expect("valid profile document")
    }

    #[test]
    fn test_minimal_document_defaults_collections() {
        let input = document(serde_json::json!({ "name": "A", "email": "a@x.com" }));
        assert_eq!(input.education, "");
        assert!(input.skills.is_empty() && input.projects.is_empty() && input.work.is_empty());
        assert_eq!(input.links, ProfileLinks::default());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_error_names_the_offending_item() {
        let input = document(serde_json::json!({
            "name": "A",
            "email": "a@x.com",
            "projects": [
                { "title": "one", "description": "" },
                { "title": "two", "description": "" },
                { "title": "  ", "description": "" }
            ]
        }));
        let err = input.validate().unwrap_err();
        assert_eq!(err.field, "projects[2].title");
    }

    #[test]
    fn test_blank_skill_and_work_fields_are_rejected() {
        let input = document(serde_json::json!({
            "name": "A", "email": "a@x.com", "skills": ["Go", " "]
        }));
        assert_eq!(input.validate().unwrap_err().field, "skills[1]");

        let input = document(serde_json::json!({
            "name": "A", "email": "a@x.com",
            "work": [{ "company": "Acme", "title": "Dev", "start_date": "" }]
        }));
        assert_eq!(input.validate().unwrap_err().field, "work[0].start_date");

        let input = document(serde_json::json!({
            "name": "A", "email": "a@x.com",
            "projects": [{ "title": "p", "description": "d", "links": [{ "label": "src", "url": "" }] }]
        }));
        assert_eq!(input.validate().unwrap_err().field, "projects[0].links[0].url");
    }

    #[test]
    fn test_blank_links_are_dropped() {
        let links = ProfileLinks {
            github: Some(" https://github.com/a ".into()),
            linkedin: Some("   ".into()),
            portfolio: None,
        };
        assert_eq!(
            links.normalized(),
            ProfileLinks {
                github: Some("https://github.com/a".into()),
                linkedin: None,
                portfolio: None,
            }
        );
    }
}
