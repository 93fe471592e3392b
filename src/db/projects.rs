use sea_orm::sea_query::{Expr, IntoColumnRef, SimpleExpr};
use sea_orm::*;
use std::collections::HashMap;

use super::contains_pattern;
use super::skills::{fold_name, get_skills_by_ids};
use crate::models::project_links::{self, LinkOut};
use crate::models::project_skills;
use crate::models::projects::{self, ProjectOut};
use crate::models::skills;

/// List projects, most recent first.
///
/// `skill` keeps projects tagged with that skill (case-insensitive exact match);
/// `text` keeps projects whose title or description contains it
/// (case-insensitive, compared on the stored lowercase keys). Both filters apply together, then `limit`/`offset`.
/// Blank filters are ignored.
pub async fn list_projects<C: ConnectionTrait>(
    conn: &C,
    skill: Option<&str>,
    text: Option<&str>,
    limit: u64,
    offset: u64,
) -> Result<Vec<ProjectOut>, DbErr> {
    let mut query = projects::Entity::find();

    if let Some(skill) = skill.map(str::trim).filter(|s| !s.is_empty()) {
        query = query
            .join(JoinType::InnerJoin, projects::Relation::ProjectSkills.def())
            .join(JoinType::InnerJoin, project_skills::Relation::Skill.def())
            .filter(skills::Column::NameKey.eq(fold_name(skill)));
    }

    if let Some(text) = text.filter(|t| !t.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(folded_contains(
                    (projects::Entity, projects::Column::TitleKey),
                    text,
                ))
                .add(folded_contains(
                    (projects::Entity, projects::Column::DescriptionKey),
                    text,
                )),
        );
    }

    let rows = query
        .order_by_desc(projects::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;

    materialize_projects(conn, rows).await
}

/// Projects owned by a profile, in insertion order.
pub async fn get_projects_by_profile<C: ConnectionTrait>(
    conn: &C,
    profile_id: i32,
) -> Result<Vec<ProjectOut>, DbErr> {
    let rows = projects::Entity::find()
        .filter(projects::Column::ProfileId.eq(profile_id))
        .order_by_asc(projects::Column::Id)
        .all(conn)
        .await?;

    materialize_projects(conn, rows).await
}

/// Attach links and skill names to project rows, keeping the rows' order.
/// Loads children for all rows in three queries.
pub async fn materialize_projects<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<projects::Model>,
) -> Result<Vec<ProjectOut>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = rows.iter().map(|p| p.id).collect();

    let links = project_links::Entity::find()
        .filter(project_links::Column::ProjectId.is_in(ids.clone()))
        .order_by_asc(project_links::Column::Id)
        .all(conn)
        .await?;

    let tags = project_skills::Entity::find()
        .filter(project_skills::Column::ProjectId.is_in(ids))
        .order_by_asc(project_skills::Column::ProjectId)
        .order_by_asc(project_skills::Column::Position)
        .all(conn)
        .await?;

    let dictionary = get_skills_by_ids(conn, tags.iter().map(|t| t.skill_id).collect()).await?;

    let mut links_by_project: HashMap<i32, Vec<LinkOut>> = HashMap::new();
    for link in links {
        links_by_project
            .entry(link.project_id)
            .or_default()
            .push(link.into());
    }

    let mut skills_by_project: HashMap<i32, Vec<String>> = HashMap::new();
    for tag in tags {
        if let Some(skill) = dictionary.get(&tag.skill_id) {
            skills_by_project
                .entry(tag.project_id)
                .or_default()
                .push(skill.name.clone());
        }
    }

    Ok(rows
        .into_iter()
        .map(|p| ProjectOut {
            links: links_by_project.remove(&p.id).unwrap_or_default(),
            skills: skills_by_project.remove(&p.id).unwrap_or_default(),
            id: p.id,
            title: p.title,
            description: p.description,
        })
        .collect())
}

/// `column LIKE %query%` over an already lowercased column, with the query
/// lowercased and escaped.
fn folded_contains(column: impl IntoColumnRef, query: &str) -> SimpleExpr {
    sea_orm::sea_query::ExprTrait::like(Expr::col(column), contains_pattern(query))
}
