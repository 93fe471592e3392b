use sea_orm::*;

use super::begin_read;
use super::projects::get_projects_by_profile;
use super::reconcile::reconcile_profile_children;
use super::skills::get_skills_by_ids;
use crate::error::ProfileError;
use crate::models::profile_skills;
use crate::models::profiles::{self, PROFILE_SLOT, ProfileInput, ProfileLinks, ProfileOut};
use crate::models::work::{self, WorkOut};

/// Create the profile and all of its children in one transaction.
///
/// Fails with `AlreadyExists` when a profile is already stored, or `Conflict`
/// when a concurrent create commits first.
pub async fn create_profile(
    db: &DatabaseConnection,
    input: ProfileInput,
) -> Result<ProfileOut, ProfileError> {
    input.validate()?;

    let txn = db.begin().await?;

    let existing = find_profile(&txn)
        .await
        .map_err(ProfileError::from_profile_create)?;
    if existing.is_some() {
        return Err(ProfileError::AlreadyExists);
    }

    let links = input.links.normalized();
    let profile = profiles::ActiveModel {
        id: NotSet,
        slot: Set(PROFILE_SLOT),
        name: Set(input.name.trim().to_string()),
        email: Set(input.email.trim().to_string()),
        education: Set(input.education.clone()),
        github: Set(links.github),
        linkedin: Set(links.linkedin),
        portfolio: Set(links.portfolio),
    }
    .insert(&txn)
    .await
    .map_err(ProfileError::from_profile_create)?;

    let summary = reconcile_profile_children(&txn, profile.id, &input).await?;
    let tree = load_tree(&txn, profile).await?;
    txn.commit().await?;

    tracing::info!(
        profile_id = tree.id,
        skills = summary.skills,
        projects = summary.projects,
        links = summary.links,
        work = summary.work,
        "Profile created"
    );

    Ok(tree)
}

/// Overwrite the profile's scalar fields and rebuild every child collection
/// from `input`, in one transaction.
pub async fn replace_profile(
    db: &DatabaseConnection,
    input: ProfileInput,
) -> Result<ProfileOut, ProfileError> {
    input.validate()?;

    let txn = db.begin().await?;

    let profile = find_profile(&txn).await?.ok_or(ProfileError::NotFound)?;

    // Updating the row first takes its write lock, so concurrent replaces
    // rebuild children one after the other.
    let links = input.links.normalized();
    let mut active: profiles::ActiveModel = profile.into();
    active.name = Set(input.name.trim().to_string());
    active.email = Set(input.email.trim().to_string());
    active.education = Set(input.education.clone());
    active.github = Set(links.github);
    active.linkedin = Set(links.linkedin);
    active.portfolio = Set(links.portfolio);
    let profile = active.update(&txn).await?;

    let summary = reconcile_profile_children(&txn, profile.id, &input).await?;
    let tree = load_tree(&txn, profile).await?;
    txn.commit().await?;

    tracing::info!(
        profile_id = tree.id,
        skills = summary.skills,
        projects = summary.projects,
        links = summary.links,
        work = summary.work,
        "Profile replaced"
    );

    Ok(tree)
}

/// Read the stored profile tree from one snapshot.
pub async fn read_profile(db: &DatabaseConnection) -> Result<ProfileOut, ProfileError> {
    let txn = begin_read(db).await?;
    let tree = load_profile(&txn).await?;
    txn.commit().await?;
    Ok(tree)
}

/// Read the stored profile tree through `conn`.
pub async fn load_profile<C: ConnectionTrait>(conn: &C) -> Result<ProfileOut, ProfileError> {
    let profile = find_profile(conn).await?.ok_or(ProfileError::NotFound)?;
    Ok(load_tree(conn, profile).await?)
}

/// Whether a profile row exists.
pub async fn profile_exists<C: ConnectionTrait>(conn: &C) -> Result<bool, DbErr> {
    Ok(profiles::Entity::find().count(conn).await? > 0)
}

async fn find_profile<C: ConnectionTrait>(conn: &C) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .order_by_asc(profiles::Column::Id)
        .one(conn)
        .await
}

/// Materialize the full tree: skills sorted case-insensitively, projects and
/// work in stored order.
async fn load_tree<C: ConnectionTrait>(
    conn: &C,
    profile: profiles::Model,
) -> Result<ProfileOut, DbErr> {
    let skill_ids: Vec<i32> = profile_skills::Entity::find()
        .select_only()
        .column(profile_skills::Column::SkillId)
        .filter(profile_skills::Column::ProfileId.eq(profile.id))
        .into_tuple()
        .all(conn)
        .await?;

    let mut skills: Vec<_> = get_skills_by_ids(conn, skill_ids)
        .await?
        .into_values()
        .collect();
    skills.sort_by(|a, b| a.name_key.cmp(&b.name_key).then_with(|| a.name.cmp(&b.name)));

    let projects = get_projects_by_profile(conn, profile.id).await?;

    let work = work::Entity::find()
        .filter(work::Column::ProfileId.eq(profile.id))
        .order_by_asc(work::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(WorkOut::from)
        .collect();

    Ok(ProfileOut {
        id: profile.id,
        name: profile.name,
        email: profile.email,
        education: profile.education,
        skills: skills.into_iter().map(|s| s.name).collect(),
        projects,
        work,
        links: ProfileLinks {
            github: profile.github,
            linkedin: profile.linkedin,
            portfolio: profile.portfolio,
        },
    })
}
