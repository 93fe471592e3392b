//! Full-replacement reconciliation of a profile's child collections.
//!
//! Every function here deletes the parent's existing children and rebuilds them
//! from the target list, in input order. Callers run them inside one
//! transaction so the delete and the rebuild commit together.

use sea_orm::*;
use std::collections::HashSet;

use super::skills::resolve_skill;
use crate::models::profile_skills;
use crate::models::profiles::ProfileInput;
use crate::models::project_links;
use crate::models::project_skills;
use crate::models::projects::{self, ProjectInput};
use crate::models::work::{self, WorkInput};

/// Row counts written by one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub skills: usize,
    pub projects: usize,
    pub links: usize,
    pub work: usize,
}

/// Rebuild skills, projects (with their links and skills) and work for a profile.
pub async fn reconcile_profile_children<C: ConnectionTrait>(
    conn: &C,
    profile_id: i32,
    input: &ProfileInput,
) -> Result<ReconcileSummary, DbErr> {
    let skills = reconcile_profile_skills(conn, profile_id, &input.skills).await?;
    let (projects, links) = reconcile_projects(conn, profile_id, &input.projects).await?;
    let work = reconcile_work(conn, profile_id, &input.work).await?;

    Ok(ReconcileSummary {
        skills,
        projects,
        links,
        work,
    })
}

/// Replace the profile's skill associations. Names that resolve to the same
/// dictionary entry are associated once. Returns the number of associations.
pub async fn reconcile_profile_skills<C: ConnectionTrait>(
    conn: &C,
    profile_id: i32,
    names: &[String],
) -> Result<usize, DbErr> {
    profile_skills::Entity::delete_many()
        .filter(profile_skills::Column::ProfileId.eq(profile_id))
        .exec(conn)
        .await?;

    let mut linked: HashSet<i32> = HashSet::new();
    for name in names {
        let skill = resolve_skill(conn, name).await?;
        if !linked.insert(skill.id) {
            continue;
        }

        profile_skills::Entity::insert(profile_skills::ActiveModel {
            profile_id: Set(profile_id),
            skill_id: Set(skill.id),
        })
        .exec_without_returning(conn)
        .await?;
    }

    Ok(linked.len())
}

/// Replace the profile's projects. Returns `(projects, links)` written.
pub async fn reconcile_projects<C: ConnectionTrait>(
    conn: &C,
    profile_id: i32,
    targets: &[ProjectInput],
) -> Result<(usize, usize), DbErr> {
    delete_projects(conn, profile_id).await?;

    let mut links = 0;
    for target in targets {
        links += insert_project(conn, profile_id, target).await?;
    }

    Ok((targets.len(), links))
}

/// Replace the profile's work entries. Returns the number written.
pub async fn reconcile_work<C: ConnectionTrait>(
    conn: &C,
    profile_id: i32,
    targets: &[WorkInput],
) -> Result<usize, DbErr> {
    work::Entity::delete_many()
        .filter(work::Column::ProfileId.eq(profile_id))
        .exec(conn)
        .await?;

    for target in targets {
        let end_date = target
            .end_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        work::ActiveModel {
            id: NotSet,
            profile_id: Set(profile_id),
            company: Set(target.company.trim().to_string()),
            title: Set(target.title.trim().to_string()),
            start_date: Set(target.start_date.trim().to_string()),
            end_date: Set(end_date),
            description: Set(target.description.clone()),
        }
        .insert(conn)
        .await?;
    }

    Ok(targets.len())
}

/// Delete a profile's projects together with their links and skill rows.
/// Children go first so no row is left pointing at a deleted project.
async fn delete_projects<C: ConnectionTrait>(conn: &C, profile_id: i32) -> Result<(), DbErr> {
    let ids: Vec<i32> = projects::Entity::find()
        .select_only()
        .column(projects::Column::Id)
        .filter(projects::Column::ProfileId.eq(profile_id))
        .into_tuple()
        .all(conn)
        .await?;

    if ids.is_empty() {
        return Ok(());
    }

    project_links::Entity::delete_many()
        .filter(project_links::Column::ProjectId.is_in(ids.clone()))
        .exec(conn)
        .await?;

    project_skills::Entity::delete_many()
        .filter(project_skills::Column::ProjectId.is_in(ids.clone()))
        .exec(conn)
        .await?;

    projects::Entity::delete_many()
        .filter(projects::Column::Id.is_in(ids))
        .exec(conn)
        .await?;

    Ok(())
}

/// Insert one project with its links and skill associations. Returns the
/// number of links written.
async fn insert_project<C: ConnectionTrait>(
    conn: &C,
    profile_id: i32,
    target: &ProjectInput,
) -> Result<usize, DbErr> {
    let title = target.title.trim();
    let project = projects::ActiveModel {
        id: NotSet,
        profile_id: Set(profile_id),
        title: Set(title.to_string()),
        description: Set(target.description.clone()),
        title_key: Set(title.to_lowercase()),
        description_key: Set(target.description.to_lowercase()),
    }
    .insert(conn)
    .await?;

    for link in &target.links {
        project_links::ActiveModel {
            id: NotSet,
            project_id: Set(project.id),
            label: Set(link.label.trim().to_string()),
            url: Set(link.url.trim().to_string()),
        }
        .insert(conn)
        .await?;
    }

    let mut tagged: HashSet<i32> = HashSet::new();
    for name in &target.skills {
        let skill = resolve_skill(conn, name).await?;
        // position follows the first occurrence of each distinct skill
        let position = tagged.len() as i32;
        if !tagged.insert(skill.id) {
            continue;
        }

        project_skills::Entity::insert(project_skills::ActiveModel {
            project_id: Set(project.id),
            skill_id: Set(skill.id),
            position: Set(position),
        })
        .exec_without_returning(conn)
        .await?;
    }

    Ok(target.links.len())
}
